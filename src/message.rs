use chrono::NaiveDate;

use crate::bill::BillView;
use crate::schemas::Tenant;

const MESSAGE_SEPARATOR: &str = "\n\n";

// Amounts inside the breakdown print in their shortest form: 7500, 89.5
fn rupees(amount: f64) -> String {
    format!("₹{}", amount)
}

pub fn generate_message(
    tenant: &Tenant,
    maid_share: f64,
    water_share: f64,
    bore_share: f64,
    total: f64,
) -> String {
    let mut parts = vec![
        format!("{} rent", rupees(tenant.rent)),
        format!("{} maid", rupees(maid_share)),
        format!("{} water", rupees(water_share)),
        format!("{} bore", rupees(bore_share)),
    ];
    if tenant.power > 0.0 {
        parts.push(format!("{} power", rupees(tenant.power)));
    }

    format!(
        "Hi {} 👋,\nThis month's total is ₹{:.2}\n({}). 😊",
        tenant.name,
        total,
        parts.join(" + ")
    )
}

/// All messages in tenant order, separated by one blank line.
pub fn export_payload<'a>(messages: impl IntoIterator<Item = &'a str>) -> String {
    messages
        .into_iter()
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("WhatsApp_Messages_{}.txt", date.format("%Y-%m-%d"))
}

fn table_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Plain-text version of the calculated shares table.
pub fn render_table(view: &BillView) -> String {
    let header = [
        "Name",
        "Rent (₹)",
        "Power (₹)",
        "Maid (₹)",
        "Water share (₹)",
        "Bore share (₹)",
        "Total (₹)",
    ];
    let rows: Vec<[String; 7]> = view
        .rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                table_amount(row.rent),
                if row.power > 0.0 {
                    table_amount(row.power)
                } else {
                    "—".to_string()
                },
                table_amount(row.maid),
                table_amount(row.water),
                table_amount(row.bore),
                table_amount(row.total),
            ]
        })
        .collect();

    let mut widths = header.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line(&header.map(String::from), &widths));
    for row in &rows {
        lines.push(render_line(row, &widths));
    }
    lines.join("\n")
}

// Name is left aligned, every amount right aligned
fn render_line(cells: &[String; 7], widths: &[usize; 7]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, width))| {
            let padding = " ".repeat(width - cell.chars().count());
            if column == 0 {
                format!("{}{}", cell, padding)
            } else {
                format!("{}{}", padding, cell)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::compute_bill_from_state;
    use crate::schemas::BillState;

    #[test]
    fn message_without_power() {
        let tenant = Tenant::new("Naveen", 7500.0, 0.0);
        let message = generate_message(&tenant, 100.0, 89.0, 0.0, 7689.0);
        assert_eq!(
            message,
            "Hi Naveen 👋,\nThis month's total is ₹7689.00\n(₹7500 rent + ₹100 maid + ₹89 water + ₹0 bore). 😊"
        );
        assert!(!message.contains("power"));
    }

    #[test]
    fn message_with_power_has_one_power_item() {
        let tenant = Tenant::new("Ravi", 6000.0, 450.5);
        let message = generate_message(&tenant, 100.0, 89.5, 0.0, 6640.0);
        assert!(message.contains("(₹6000 rent + ₹100 maid + ₹89.5 water + ₹0 bore + ₹450.5 power)"));
        assert_eq!(message.matches("power").count(), 1);
        assert!(message.contains("₹6640.00"));
    }

    #[test]
    fn payload_separates_messages_with_blank_line() {
        let view = compute_bill_from_state(&BillState::default());
        let payload = export_payload(view.rows.iter().map(|row| row.message.as_str()));
        let expected = format!(
            "{}\n\n{}\n\n{}",
            view.rows[0].message, view.rows[1].message, view.rows[2].message
        );
        assert_eq!(payload, expected);
        assert_eq!(export_payload(Vec::<&str>::new()), "");
    }

    #[test]
    fn filename_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_filename(date), "WhatsApp_Messages_2024-03-07.txt");
    }

    #[test]
    fn table_shows_dash_for_missing_power() {
        let mut state = BillState::default();
        state.tenants[1].power = 312.0;
        let table = render_table(&compute_bill_from_state(&state));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("Naveen"));
        assert!(lines[1].contains("—"));
        assert!(lines[1].ends_with("7689.00"));
        assert!(lines[2].contains("312.00"));
        assert!(lines[2].ends_with("8501.00"));
    }
}
