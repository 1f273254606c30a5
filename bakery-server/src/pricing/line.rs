//! Line Price Calculator
//!
//! Price of a single order line against a resolved catalog. Every function
//! is total: an id missing from the catalog contributes zero and is reported
//! as a data-quality warning. Results carry full precision; rounding happens
//! in the totalizer.

use rust_decimal::prelude::*;
use shared::catalog::AddonPricing;
use shared::order::{AddonSelection, CakeTier, PICKUP_OPTION, TreatSelection};

use super::money::{checked_line, checked_sum, to_decimal};
use crate::catalog::ResolvedCatalog;

fn unresolved(kind: &'static str, id: &str) -> Decimal {
    tracing::warn!(target: "pricing", kind, id, "Unresolved catalog reference priced as zero");
    Decimal::ZERO
}

/// Size base price plus shape, flavor and frosting modifiers
pub fn tier_price(tier: &CakeTier, catalog: &ResolvedCatalog) -> Decimal {
    let base = catalog
        .size(&tier.size)
        .map(|s| to_decimal(s.base_price))
        .unwrap_or_else(|| unresolved("size", &tier.size));
    let shape = catalog
        .shape(&tier.shape)
        .map(|s| to_decimal(s.price_modifier))
        .unwrap_or_else(|| unresolved("shape", &tier.shape));
    let flavor = catalog
        .flavor(&tier.flavor)
        .map(|f| to_decimal(f.price_modifier))
        .unwrap_or_else(|| unresolved("flavor", &tier.flavor));
    let frosting = catalog
        .frosting(&tier.frosting)
        .map(|f| to_decimal(f.price_modifier))
        .unwrap_or_else(|| unresolved("frosting", &tier.frosting));

    checked_sum([base, shape, flavor, frosting], "tier")
}

pub fn decoration_price(id: &str, catalog: &ResolvedCatalog) -> Decimal {
    catalog
        .decoration(id)
        .map(|d| to_decimal(d.price))
        .unwrap_or_else(|| unresolved("decoration", id))
}

/// Flat add-ons scale by `quantity` (default 1), per-attendee add-ons by
/// `attendees`, falling back to the entry's `minAttendees`.
pub fn addon_price(selection: &AddonSelection, catalog: &ResolvedCatalog) -> Decimal {
    let Some(addon) = catalog.addon(&selection.id) else {
        return unresolved("addon", &selection.id);
    };
    let price = to_decimal(addon.price);

    let multiplier = match addon.pricing_type {
        AddonPricing::Flat => selection.quantity.map(to_decimal).unwrap_or(Decimal::ONE),
        AddonPricing::PerAttendee => selection
            .attendees
            .or(addon.min_attendees)
            .map(Decimal::from)
            .unwrap_or(Decimal::ZERO),
    };

    checked_line(price, multiplier.max(Decimal::ZERO), "addon")
}

pub fn treat_line_price(selection: &TreatSelection, catalog: &ResolvedCatalog) -> Decimal {
    catalog
        .treat(&selection.id)
        .map(|t| {
            checked_line(
                to_decimal(t.unit_price),
                Decimal::from(selection.quantity),
                "treat",
            )
        })
        .unwrap_or_else(|| unresolved("treat", &selection.id))
}

/// Zero for pickup
pub fn delivery_price(option_id: &str, catalog: &ResolvedCatalog) -> Decimal {
    if option_id == PICKUP_OPTION {
        return Decimal::ZERO;
    }
    catalog
        .delivery_option(option_id)
        .map(|d| to_decimal(d.price))
        .unwrap_or_else(|| unresolved("delivery", option_id))
}
