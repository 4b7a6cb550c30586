use crate::schemas::FieldValue;

/// Coerces raw field input into a usable amount. Anything that isn't a
/// finite, non-negative number becomes zero.
pub fn parse_amount(value: &FieldValue) -> f64 {
    let amount = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(text) => parse_text(text),
        FieldValue::Unreadable(_) => 0.0,
    };
    clamp_amount(amount)
}

pub fn clamp_amount(amount: f64) -> f64 {
    // `-0.0 > 0.0` is false, so negative zero ends up as plain zero too
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

fn parse_text(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse::<f64>().unwrap_or(0.0)
}
