use crate::error::BillError;
use crate::input::{clamp_amount, parse_amount};
use crate::schemas::{BillState, ExpenseKind, FieldValue, Tenant, TenantField};

/// Every way the form can be edited.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddTenant(Tenant),
    RemoveTenant(usize),
    EditTenant(usize, TenantField, FieldValue),
    EditExpense(ExpenseKind, FieldValue),
    SetIncludeOwner(bool),
    ToggleIncludeOwner,
}

/// Produces the state that follows `action`. The given state is never
/// touched, so on error the caller still holds the previous one.
pub fn apply(state: &BillState, action: Action) -> Result<BillState, BillError> {
    let mut next = state.clone();
    match action {
        Action::AddTenant(tenant) => next.tenants.push(Tenant {
            rent: clamp_amount(tenant.rent),
            power: clamp_amount(tenant.power),
            ..tenant
        }),
        Action::RemoveTenant(index) => {
            if index >= next.tenants.len() {
                return Err(BillError::TenantNotFound(index));
            }
            next.tenants.remove(index);
        }
        Action::EditTenant(index, field, value) => {
            let tenant = next
                .tenants
                .get_mut(index)
                .ok_or(BillError::TenantNotFound(index))?;
            match field {
                TenantField::Name => tenant.name = value.as_text(),
                TenantField::Rent => tenant.rent = parse_amount(&value),
                TenantField::Power => tenant.power = parse_amount(&value),
            }
        }
        Action::EditExpense(kind, value) => next.totals.set(kind, parse_amount(&value)),
        Action::SetIncludeOwner(include_owner) => next.include_owner = include_owner,
        Action::ToggleIncludeOwner => next.include_owner = !next.include_owner,
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn add_then_remove_restores_tenants() {
        let state = BillState::default();
        let added = apply(&state, Action::AddTenant(Tenant::default())).unwrap();
        assert_eq!(added.tenants.len(), 4);
        assert_eq!(added.tenants[3], Tenant::new("New Member", 0.0, 0.0));

        let removed = apply(&added, Action::RemoveTenant(3)).unwrap();
        assert_eq!(removed, state);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let state = apply(&BillState::default(), Action::RemoveTenant(0)).unwrap();
        let names: Vec<&str> = state.tenants.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Yalamandha", "Kannababu"]);
    }

    #[test]
    fn bad_index_leaves_state_alone() {
        let state = BillState::default();
        assert!(matches!(
            apply(&state, Action::RemoveTenant(3)),
            Err(BillError::TenantNotFound(3))
        ));
        assert!(matches!(
            apply(&state, Action::EditTenant(9, TenantField::Rent, text("10"))),
            Err(BillError::TenantNotFound(9))
        ));
        assert_eq!(state, BillState::default());
    }

    #[test]
    fn edits_coerce_numeric_fields() {
        let state = BillState::default();
        let state = apply(&state, Action::EditTenant(0, TenantField::Rent, text("oops"))).unwrap();
        let state = apply(&state, Action::EditTenant(1, TenantField::Power, text("312.5"))).unwrap();
        let state = apply(&state, Action::EditTenant(2, TenantField::Name, text(" Kanna "))).unwrap();
        let state = apply(&state, Action::EditExpense(ExpenseKind::Bore, FieldValue::Number(-50.0))).unwrap();
        let state = apply(&state, Action::EditExpense(ExpenseKind::Water, text("400"))).unwrap();

        assert_eq!(state.tenants[0].rent, 0.0);
        assert_eq!(state.tenants[1].power, 312.5);
        assert_eq!(state.tenants[2].name, " Kanna ");
        assert_eq!(state.totals.bore, 0.0);
        assert_eq!(state.totals.water, 400.0);
    }

    #[test]
    fn added_tenant_amounts_are_clamped() {
        let state = apply(
            &BillState::empty(),
            Action::AddTenant(Tenant::new("Ravi", -100.0, f64::NAN)),
        )
        .unwrap();
        assert_eq!(state.tenants[0], Tenant::new("Ravi", 0.0, 0.0));
    }

    #[test]
    fn owner_policy() {
        let state = apply(&BillState::default(), Action::ToggleIncludeOwner).unwrap();
        assert!(!state.include_owner);
        let state = apply(&state, Action::ToggleIncludeOwner).unwrap();
        assert!(state.include_owner);
        let state = apply(&state, Action::SetIncludeOwner(false)).unwrap();
        assert!(!state.include_owner);
    }
}
