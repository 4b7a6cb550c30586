use serde::Serialize;

use crate::message::generate_message;
use crate::schemas::{BillState, SharedExpenses, Tenant, TenantName};

/// Per-sharer portion of every shared expense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Shares {
    pub maid: f64,
    pub water: f64,
    pub bore: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TenantBill {
    pub name: TenantName,
    pub rent: f64,
    pub power: f64,
    pub maid: f64,
    pub water: f64,
    pub bore: f64,
    pub total: f64,
    pub message: String,
}

/// Everything the form shows, derived from a single state snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BillView {
    pub tenants: Vec<Tenant>,
    pub totals: SharedExpenses,
    pub include_owner: bool,
    pub number_of_sharers: usize,
    pub shares: Shares,
    pub rows: Vec<TenantBill>,
}

pub fn round_to_2_decimals(n: f64) -> f64 {
    let cents = n * 100.0;
    // Anything this large has no fractional digits left to round
    if !cents.is_finite() {
        return n;
    }
    cents.round() / 100.0
}

// The owner never gets a bill but can still take a slice of the shared costs
pub fn number_of_sharers(tenants: usize, include_owner: bool) -> usize {
    if include_owner {
        tenants + 1
    } else {
        tenants
    }
}

/// Splits `total` evenly. With nobody to split between the share is zero.
pub fn compute_share(total: f64, number_of_sharers: usize) -> f64 {
    if number_of_sharers == 0 {
        tracing::debug!(total, "no sharers, share is zero");
        return 0.0;
    }
    round_to_2_decimals(total / number_of_sharers as f64)
}

pub fn compute_shares(totals: &SharedExpenses, number_of_sharers: usize) -> Shares {
    Shares {
        maid: compute_share(totals.maid, number_of_sharers),
        water: compute_share(totals.water, number_of_sharers),
        bore: compute_share(totals.bore, number_of_sharers),
    }
}

pub fn compute_total(tenant: &Tenant, maid_share: f64, water_share: f64, bore_share: f64) -> f64 {
    let total = tenant.rent + maid_share + water_share + bore_share + tenant.power_bill();
    if total.is_infinite() {
        return f64::MAX;
    }
    round_to_2_decimals(total)
}

pub fn compute_bill_from_state(state: &BillState) -> BillView {
    let number_of_sharers = number_of_sharers(state.tenants.len(), state.include_owner);
    let shares = compute_shares(&state.totals, number_of_sharers);

    let rows = state
        .tenants
        .iter()
        .map(|tenant| {
            let total = compute_total(tenant, shares.maid, shares.water, shares.bore);
            TenantBill {
                name: tenant.name.clone(),
                rent: tenant.rent,
                power: tenant.power_bill(),
                maid: shares.maid,
                water: shares.water,
                bore: shares.bore,
                total,
                message: generate_message(tenant, shares.maid, shares.water, shares.bore, total),
            }
        })
        .collect();

    BillView {
        tenants: state.tenants.clone(),
        totals: state.totals,
        include_owner: state.include_owner,
        number_of_sharers,
        shares,
        rows,
    }
}
