//! Priced order totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals derived from a configuration and a resolved catalog
///
/// Each component is already rounded to currency precision and
/// `total == subtotal + delivery_total + tax` holds exactly. Serialized as
/// decimal strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_total: Decimal,
    pub total: Decimal,
}

impl PricedTotals {
    /// All four components at zero, carrying currency precision
    pub fn zero() -> Self {
        let zero = Decimal::new(0, 2);
        Self {
            subtotal: zero,
            tax: zero,
            delivery_total: zero,
            total: zero,
        }
    }

    /// `total` as a two-place decimal string, e.g. `"113.40"`
    pub fn formatted_total(&self) -> String {
        format!("{:.2}", self.total)
    }
}
