//! Money helpers
//!
//! Catalog prices are stored as `f64` (they come straight from the tenant's
//! JSON document). All arithmetic happens on `Decimal`; rounding to currency
//! precision is applied once, when totals are produced.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum catalog or featured-item price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum quantity or attendee count on one order line
pub const MAX_QUANTITY: u32 = 9999;

/// Default sales tax applied on the public order page (8%)
pub const DEFAULT_TAX_RATE_PERCENT: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Convert f64 to Decimal for calculation
///
/// NaN and infinities become zero so a corrupt catalog value still prices.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to currency precision, always carrying exactly two places
#[inline]
pub fn to_currency(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

fn overflowed(what: &str) -> Decimal {
    tracing::warn!(target: "pricing", what, "Amount overflowed, priced as zero");
    Decimal::ZERO
}

/// `price × multiplier`; zero when the product does not fit a `Decimal`
pub fn checked_line(price: Decimal, multiplier: Decimal, what: &str) -> Decimal {
    price
        .checked_mul(multiplier)
        .unwrap_or_else(|| overflowed(what))
}

/// Sum of `values`; zero when the sum does not fit a `Decimal`
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>, what: &str) -> Decimal {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .unwrap_or_else(|| overflowed(what))
}

/// Tax on `taxable` at `rate_percent` (8 means 8%), unrounded
#[inline]
pub fn tax_amount(taxable: Decimal, rate_percent: Decimal) -> Decimal {
    taxable
        .checked_mul(rate_percent)
        .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| overflowed("tax"))
}
