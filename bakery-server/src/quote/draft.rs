use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::catalog::{AddonPricing, CatalogEntry};
use shared::error::{AppError, ErrorCode};
use shared::order::{
    AddonSelection, CakeOrder, Lead, OrderConfiguration, PricedTotals, SubmissionPayload,
    TreatOrder,
};
use thiserror::Error;

use crate::catalog::ResolvedCatalog;
use crate::pricing::{
    addon_price, checked_sum, decoration_price, delivery_price, tier_price, to_currency,
    to_decimal, totals_from_parts, treat_line_price,
};

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("tax rate must be between 0 and 100, got {0}")]
    TaxRateOutOfRange(Decimal),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
            .with_detail("field", "taxRate")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteLineKind {
    Tier,
    Decoration,
    Addon,
    Treat,
    Delivery,
    FeaturedItem,
}

/// One editable quote line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub kind: QuoteLineKind,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Rounded to currency precision
    pub amount: Decimal,
}

impl QuoteLine {
    fn new(
        kind: QuoteLineKind,
        description: String,
        quantity: Decimal,
        unit_price: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            kind,
            description,
            quantity,
            unit_price: to_currency(unit_price),
            amount: to_currency(amount),
        }
    }

    fn single(kind: QuoteLineKind, description: String, amount: Decimal) -> Self {
        Self::new(kind, description, Decimal::ONE, amount, amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub lead_id: String,
    pub lines: Vec<QuoteLine>,
}

impl QuoteDraft {
    /// Re-price a lead's stored selections against `catalog`.
    pub fn from_lead(lead: &Lead, catalog: &ResolvedCatalog) -> Self {
        let lines = match &lead.submission.calculator_payload {
            SubmissionPayload::FastQuote { featured_item } => vec![QuoteLine::single(
                QuoteLineKind::FeaturedItem,
                featured_item.name.clone(),
                to_decimal(featured_item.price),
            )],
            SubmissionPayload::Standard { configuration, .. } => {
                let mut lines = match configuration {
                    OrderConfiguration::Cake(order) => cake_lines(order, catalog),
                    OrderConfiguration::Treat(order) => treat_lines(order, catalog),
                };
                let option = configuration.delivery_option();
                let delivery = delivery_price(option, catalog);
                if !delivery.is_zero() {
                    lines.push(QuoteLine::single(
                        QuoteLineKind::Delivery,
                        label_or_id(catalog.delivery_option(option), option),
                        delivery,
                    ));
                }
                lines
            }
        };

        Self {
            lead_id: lead.id.clone(),
            lines,
        }
    }

    /// Totals at an operator-chosen tax rate (percent, 0 to 100)
    pub fn totals(&self, tax_rate_percent: Decimal) -> Result<PricedTotals, QuoteError> {
        if tax_rate_percent < Decimal::ZERO || tax_rate_percent > Decimal::ONE_HUNDRED {
            return Err(QuoteError::TaxRateOutOfRange(tax_rate_percent));
        }

        let (delivery, items): (Vec<&QuoteLine>, Vec<&QuoteLine>) = self
            .lines
            .iter()
            .partition(|line| line.kind == QuoteLineKind::Delivery);
        let subtotal = checked_sum(items.iter().map(|line| line.amount), "subtotal");
        let delivery = checked_sum(delivery.iter().map(|line| line.amount), "delivery");

        Ok(totals_from_parts(subtotal, delivery, tax_rate_percent))
    }
}

fn label_or_id<E: CatalogEntry>(entry: Option<&E>, id: &str) -> String {
    entry
        .map(|e| e.label())
        .filter(|label| !label.is_empty())
        .unwrap_or(id)
        .to_string()
}

fn cake_lines(order: &CakeOrder, catalog: &ResolvedCatalog) -> Vec<QuoteLine> {
    let mut lines =
        Vec::with_capacity(order.tiers.len() + order.decorations.len() + order.addons.len());

    for (index, tier) in order.tiers.iter().enumerate() {
        let description = format!(
            "Tier {}: {} / {} / {} / {}",
            index + 1,
            label_or_id(catalog.size(&tier.size), &tier.size),
            label_or_id(catalog.shape(&tier.shape), &tier.shape),
            label_or_id(catalog.flavor(&tier.flavor), &tier.flavor),
            label_or_id(catalog.frosting(&tier.frosting), &tier.frosting),
        );
        lines.push(QuoteLine::single(
            QuoteLineKind::Tier,
            description,
            tier_price(tier, catalog),
        ));
    }

    for id in &order.decorations {
        lines.push(QuoteLine::single(
            QuoteLineKind::Decoration,
            label_or_id(catalog.decoration(id), id),
            decoration_price(id, catalog),
        ));
    }

    for selection in &order.addons {
        lines.push(addon_line(selection, catalog));
    }

    lines
}

fn addon_line(selection: &AddonSelection, catalog: &ResolvedCatalog) -> QuoteLine {
    let amount = addon_price(selection, catalog);
    let Some(addon) = catalog.addon(&selection.id) else {
        return QuoteLine::single(QuoteLineKind::Addon, selection.id.clone(), amount);
    };

    let label = label_or_id(Some(addon), &addon.id);
    let (description, quantity) = match addon.pricing_type {
        AddonPricing::Flat => (
            label,
            selection.quantity.map(to_decimal).unwrap_or(Decimal::ONE),
        ),
        AddonPricing::PerAttendee => {
            let attendees = selection.attendees.or(addon.min_attendees).unwrap_or(0);
            (
                format!("{label} ({attendees} attendees)"),
                Decimal::from(attendees),
            )
        }
    };

    QuoteLine::new(
        QuoteLineKind::Addon,
        description,
        quantity,
        to_decimal(addon.price),
        amount,
    )
}

fn treat_lines(order: &TreatOrder, catalog: &ResolvedCatalog) -> Vec<QuoteLine> {
    order
        .treats
        .iter()
        .map(|selection| {
            let unit_price = catalog
                .treat(&selection.id)
                .map(|t| to_decimal(t.unit_price))
                .unwrap_or(Decimal::ZERO);
            QuoteLine::new(
                QuoteLineKind::Treat,
                label_or_id(catalog.treat(&selection.id), &selection.id),
                Decimal::from(selection.quantity),
                unit_price,
                treat_line_price(selection, catalog),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{
        CakeTier, ContactInfo, FeaturedItem, LeadSubmission, TreatSelection,
    };

    fn lead(payload: SubmissionPayload) -> Lead {
        Lead {
            id: "lead-1".to_string(),
            created_at: 0,
            submission: LeadSubmission {
                tenant_id: "sweet-crumbs".to_string(),
                contact: ContactInfo::default(),
                calculator_payload: payload,
                estimated_total: "0.00".to_string(),
            },
        }
    }

    fn cake_payload(delivery: &str) -> SubmissionPayload {
        SubmissionPayload::Standard {
            configuration: OrderConfiguration::Cake(CakeOrder {
                tiers: vec![
                    CakeTier {
                        size: "10-round".to_string(),
                        shape: "round".to_string(),
                        flavor: "chocolate".to_string(),
                        frosting: "ganache".to_string(),
                    },
                    CakeTier {
                        size: "8-round".to_string(),
                        shape: "square".to_string(),
                        flavor: "vanilla".to_string(),
                        frosting: "buttercream".to_string(),
                    },
                ],
                decorations: vec!["sprinkles".to_string()],
                addons: vec![AddonSelection {
                    attendees: Some(30),
                    ..AddonSelection::new("full-sweets-table")
                }],
                delivery_option: delivery.to_string(),
            }),
            totals: PricedTotals::default(),
        }
    }

    #[test]
    fn test_cake_lines_follow_selection_order() {
        let catalog = ResolvedCatalog::defaults();
        let draft = QuoteDraft::from_lead(&lead(cake_payload("local")), &catalog);

        let kinds: Vec<QuoteLineKind> = draft.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuoteLineKind::Tier,
                QuoteLineKind::Tier,
                QuoteLineKind::Decoration,
                QuoteLineKind::Addon,
                QuoteLineKind::Delivery,
            ]
        );
        assert_eq!(
            draft.lines[0].description,
            "Tier 1: 10\" Round / Round / Chocolate / Chocolate Ganache"
        );
        assert_eq!(draft.lines[0].amount, Decimal::new(9800, 2));
        assert_eq!(draft.lines[3].description, "Full Sweets Table (30 attendees)");
        assert_eq!(draft.lines[3].quantity, Decimal::from(30));
        assert_eq!(draft.lines[3].amount, Decimal::new(15000, 2));
    }

    #[test]
    fn test_free_delivery_has_no_line() {
        let catalog = ResolvedCatalog::defaults();
        let draft = QuoteDraft::from_lead(&lead(cake_payload("pickup")), &catalog);
        assert!(draft.lines.iter().all(|l| l.kind != QuoteLineKind::Delivery));
    }

    #[test]
    fn test_totals_match_totalizer_at_default_rate() {
        let catalog = ResolvedCatalog::defaults();
        let payload = cake_payload("local");
        let SubmissionPayload::Standard { configuration, .. } = &payload else {
            unreachable!()
        };
        let expected = crate::pricing::compute_total(configuration, &catalog);

        let draft = QuoteDraft::from_lead(&lead(payload.clone()), &catalog);
        assert_eq!(draft.totals(Decimal::from(8)).unwrap(), expected);
    }

    #[test]
    fn test_tax_rate_range() {
        let catalog = ResolvedCatalog::defaults();
        let draft = QuoteDraft::from_lead(&lead(cake_payload("pickup")), &catalog);

        assert!(draft.totals(Decimal::ZERO).is_ok());
        assert!(draft.totals(Decimal::ONE_HUNDRED).is_ok());
        assert!(matches!(
            draft.totals(Decimal::from(101)),
            Err(QuoteError::TaxRateOutOfRange(_))
        ));
        assert!(draft.totals(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_fast_quote_single_line() {
        let catalog = ResolvedCatalog::defaults();
        let payload = SubmissionPayload::FastQuote {
            featured_item: FeaturedItem {
                id: "wedding-classic".to_string(),
                name: "Classic Wedding Cake".to_string(),
                description: None,
                price: 450.0,
                enabled: true,
            },
        };
        let draft = QuoteDraft::from_lead(&lead(payload), &catalog);

        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].kind, QuoteLineKind::FeaturedItem);
        let totals = draft.totals(Decimal::ZERO).unwrap();
        assert_eq!(totals.total, Decimal::new(45000, 2));
    }

    #[test]
    fn test_treat_lines() {
        let catalog = ResolvedCatalog::defaults();
        let payload = SubmissionPayload::Standard {
            configuration: OrderConfiguration::Treat(TreatOrder {
                treats: vec![TreatSelection {
                    id: "cupcakes-standard".to_string(),
                    quantity: 2,
                }],
                delivery_option: "pickup".to_string(),
            }),
            totals: PricedTotals::default(),
        };
        let draft = QuoteDraft::from_lead(&lead(payload), &catalog);

        assert_eq!(draft.lines[0].description, "Classic Cupcakes");
        assert_eq!(draft.lines[0].unit_price, Decimal::new(3600, 2));
        assert_eq!(draft.lines[0].amount, Decimal::new(7200, 2));
    }
}
