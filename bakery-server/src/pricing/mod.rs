//! Pricing Engine
//!
//! Pure functions turning an order configuration and a resolved catalog into
//! priced totals. Uses rust_decimal for all arithmetic.

mod line;
pub mod money;
mod totalizer;

pub use line::*;
pub use money::{
    DEFAULT_TAX_RATE_PERCENT, MAX_PRICE, MAX_QUANTITY, checked_line, checked_sum, to_currency,
    to_decimal,
};
pub use totalizer::*;
