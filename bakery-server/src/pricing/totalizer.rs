//! Order Totals Calculator
//!
//! Sums line prices into [`PricedTotals`]. Tax applies to subtotal plus
//! delivery. Each component is rounded to currency precision exactly once and
//! the total is their exact sum, so the displayed lines always add up.

use rust_decimal::prelude::*;
use shared::order::{CakeOrder, OrderConfiguration, PricedTotals, TreatOrder};

use super::line::{addon_price, decoration_price, delivery_price, tier_price, treat_line_price};
use super::money::{DEFAULT_TAX_RATE_PERCENT, checked_sum, tax_amount, to_currency};
use crate::catalog::ResolvedCatalog;

/// Totals at the default public-page tax rate
pub fn compute_total(config: &OrderConfiguration, catalog: &ResolvedCatalog) -> PricedTotals {
    compute_total_with_rate(config, catalog, DEFAULT_TAX_RATE_PERCENT)
}

/// Totals at `tax_rate_percent` (8 means 8%)
pub fn compute_total_with_rate(
    config: &OrderConfiguration,
    catalog: &ResolvedCatalog,
    tax_rate_percent: Decimal,
) -> PricedTotals {
    let subtotal = match config {
        OrderConfiguration::Cake(order) => cake_subtotal(order, catalog),
        OrderConfiguration::Treat(order) => treat_subtotal(order, catalog),
    };
    let delivery = delivery_price(config.delivery_option(), catalog);

    totals_from_parts(subtotal, delivery, tax_rate_percent)
}

/// Assemble totals from unrounded subtotal and delivery amounts.
///
/// Shared with quote drafts, whose line prices may have been edited by hand.
pub fn totals_from_parts(
    subtotal: Decimal,
    delivery: Decimal,
    tax_rate_percent: Decimal,
) -> PricedTotals {
    let subtotal = to_currency(subtotal.max(Decimal::ZERO));
    let delivery_total = to_currency(delivery.max(Decimal::ZERO));
    let rate = tax_rate_percent.max(Decimal::ZERO);
    let priced = subtotal.checked_add(delivery_total).and_then(|taxable| {
        let tax = to_currency(tax_amount(taxable, rate));
        taxable.checked_add(tax).map(|total| (tax, total))
    });

    match priced {
        Some((tax, total)) => PricedTotals {
            subtotal,
            tax,
            delivery_total,
            total,
        },
        None => {
            tracing::warn!(
                target: "pricing",
                %subtotal,
                %delivery_total,
                "Order total overflowed, priced as zero"
            );
            PricedTotals::zero()
        }
    }
}

fn cake_subtotal(order: &CakeOrder, catalog: &ResolvedCatalog) -> Decimal {
    let tiers = order.tiers.iter().map(|t| tier_price(t, catalog));
    let decorations = order.decorations.iter().map(|d| decoration_price(d, catalog));
    let addons = order.addons.iter().map(|a| addon_price(a, catalog));

    checked_sum(tiers.chain(decorations).chain(addons), "subtotal")
}

fn treat_subtotal(order: &TreatOrder, catalog: &ResolvedCatalog) -> Decimal {
    let lines = order.treats.iter().map(|t| treat_line_price(t, catalog));
    checked_sum(lines, "subtotal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{AddonSelection, CakeTier, TreatSelection};

    fn treats(items: &[(&str, u32)], delivery: &str) -> OrderConfiguration {
        OrderConfiguration::Treat(TreatOrder {
            treats: items
                .iter()
                .map(|(id, quantity)| TreatSelection {
                    id: id.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            delivery_option: delivery.to_string(),
        })
    }

    #[test]
    fn test_empty_cake_order_is_zero() {
        let catalog = ResolvedCatalog::defaults();
        let config = OrderConfiguration::Cake(CakeOrder {
            tiers: vec![],
            decorations: vec![],
            addons: vec![],
            delivery_option: "pickup".to_string(),
        });
        let totals = compute_total(&config, &catalog);
        assert_eq!(totals, totals_from_parts(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_tax_includes_delivery() {
        let catalog = ResolvedCatalog::defaults();
        let totals = compute_total(&treats(&[("brownies", 1)], "extended"), &catalog);
        // (28 + 45) × 8% = 5.84
        assert_eq!(totals.subtotal, Decimal::new(2800, 2));
        assert_eq!(totals.delivery_total, Decimal::new(4500, 2));
        assert_eq!(totals.tax, Decimal::new(584, 2));
        assert_eq!(totals.total, Decimal::new(7884, 2));
    }

    #[test]
    fn test_custom_rate() {
        let catalog = ResolvedCatalog::defaults();
        let config = treats(&[("macarons", 1)], "pickup");

        let zero = compute_total_with_rate(&config, &catalog, Decimal::ZERO);
        assert_eq!(zero.total, Decimal::new(3200, 2));

        let ten = compute_total_with_rate(&config, &catalog, Decimal::from(10));
        assert_eq!(ten.tax, Decimal::new(320, 2));
    }

    #[test]
    fn test_negative_subtotal_clamped() {
        let totals = totals_from_parts(Decimal::from(-20), Decimal::from(25), Decimal::from(8));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(2700, 2));
    }

    #[test]
    fn test_rounding_does_not_drift() {
        // 10.005 rounds up once; tax is taken on the rounded subtotal
        let totals = totals_from_parts(Decimal::new(10005, 3), Decimal::ZERO, Decimal::new(7, 0));
        assert_eq!(totals.subtotal, Decimal::new(1001, 2));
        assert_eq!(totals.tax, Decimal::new(70, 2));
        assert_eq!(totals.total, totals.subtotal + totals.delivery_total + totals.tax);
    }

    #[test]
    fn test_huge_amounts_never_panic() {
        let catalog = ResolvedCatalog::defaults();
        let config = OrderConfiguration::Cake(CakeOrder {
            tiers: vec![CakeTier {
                size: "8-round".to_string(),
                shape: "square".to_string(),
                flavor: "vanilla".to_string(),
                frosting: "buttercream".to_string(),
            }],
            decorations: vec![],
            addons: vec![AddonSelection {
                quantity: Some(1e28),
                ..AddonSelection::new("extra-cupcakes")
            }],
            delivery_option: "pickup".to_string(),
        });
        // the oversized add-on drops out, the tier still prices
        let totals = compute_total(&config, &catalog);
        assert_eq!(totals.subtotal, Decimal::new(7500, 2));

        let near_max = Decimal::from_f64(5e28).unwrap();
        let totals = totals_from_parts(near_max, near_max, Decimal::from(8));
        assert_eq!(totals, PricedTotals::zero());
    }

    #[test]
    fn test_addon_selection_counts_in_cake_subtotal() {
        let catalog = ResolvedCatalog::defaults();
        let config = OrderConfiguration::Cake(CakeOrder {
            tiers: vec![],
            decorations: vec!["gold-leaf".to_string()],
            addons: vec![AddonSelection::new("candles")],
            delivery_option: "pickup".to_string(),
        });
        assert_eq!(compute_total(&config, &catalog).subtotal, Decimal::new(2500, 2));
    }
}
