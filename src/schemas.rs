use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::input::parse_amount;

pub type TenantName = String;

// Missing fields fall back to the blank "New Member" row
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Tenant {
    pub name: TenantName,
    #[serde(deserialize_with = "deserialize_amount")]
    pub rent: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub power: f64,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(|value| parse_amount(&value))
}

impl Tenant {
    pub fn new(name: impl Into<TenantName>, rent: f64, power: f64) -> Self {
        Tenant {
            name: name.into(),
            rent,
            power,
        }
    }

    /// The power bill that actually gets charged, zero unless positive.
    pub fn power_bill(&self) -> f64 {
        if self.power > 0.0 {
            self.power
        } else {
            0.0
        }
    }
}

impl Default for Tenant {
    fn default() -> Self {
        Tenant::new("New Member", 0.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SharedExpenses {
    pub maid: f64,
    pub water: f64,
    pub bore: f64,
}

impl SharedExpenses {
    pub fn get(&self, kind: ExpenseKind) -> f64 {
        match kind {
            ExpenseKind::Maid => self.maid,
            ExpenseKind::Water => self.water,
            ExpenseKind::Bore => self.bore,
        }
    }

    pub fn set(&mut self, kind: ExpenseKind, amount: f64) {
        match kind {
            ExpenseKind::Maid => self.maid = amount,
            ExpenseKind::Water => self.water = amount,
            ExpenseKind::Bore => self.bore = amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Maid,
    Water,
    Bore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantField {
    Name,
    Rent,
    Power,
}

/// Raw value typed into a form field, before any coercion. `null`, booleans
/// and anything else that is neither a number nor text end up `Unreadable`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Unreadable(IgnoredAny),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Unreadable(IgnoredAny)
    }
}

impl FieldValue {
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Unreadable(_) => String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BillState {
    pub tenants: Vec<Tenant>,
    pub totals: SharedExpenses,
    pub include_owner: bool,
}

impl BillState {
    pub fn empty() -> Self {
        BillState {
            tenants: vec![],
            totals: SharedExpenses::default(),
            include_owner: true,
        }
    }
}

// The form the house starts every month with
impl Default for BillState {
    fn default() -> Self {
        BillState {
            tenants: vec![
                Tenant::new("Naveen", 7500.0, 0.0),
                Tenant::new("Yalamandha", 8000.0, 0.0),
                Tenant::new("Kannababu", 8000.0, 0.0),
            ],
            totals: SharedExpenses {
                maid: 400.0,
                water: 356.0,
                bore: 0.0,
            },
            include_owner: true,
        }
    }
}
