//! Lead payload construction
//!
//! Turns what the customer submitted into the frozen [`LeadSubmission`] that
//! gets persisted. All submission validation lives here.

use shared::order::{
    ContactInfo, FeaturedItem, LeadSubmission, OrderConfiguration, SubmissionPayload,
    SubmitRequest, TreatOrder, TreatSelection,
};

use super::error::ValidationError;
use crate::catalog::ResolvedCatalog;
use crate::pricing::{MAX_PRICE, MAX_QUANTITY, compute_total, to_currency, to_decimal};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    check_optional_text, check_required_text,
};

/// Pick the payload variant named by the request's `fastQuote` flag.
///
/// Standard orders are priced against `catalog` here, so the estimate stored
/// on the lead is the one the customer saw. Treat lines below their minimum
/// order quantity are raised to it first.
pub fn payload_from_request(
    request: &SubmitRequest,
    catalog: &ResolvedCatalog,
    featured_items: &[FeaturedItem],
) -> Result<SubmissionPayload, ValidationError> {
    if request.fast_quote {
        if request.configuration.is_some() {
            return Err(ValidationError::invalid(
                "configuration",
                "not allowed on a fast quote",
            ));
        }
        let id = request
            .featured_item_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ValidationError::MissingField("featuredItemId"))?;
        let item = featured_items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ValidationError::FeaturedItemNotFound(id.to_string()))?;
        if !item.enabled {
            return Err(ValidationError::FeaturedItemDisabled(id.to_string()));
        }
        return Ok(SubmissionPayload::FastQuote {
            featured_item: item.clone(),
        });
    }

    if request.featured_item_id.is_some() {
        return Err(ValidationError::invalid(
            "featuredItemId",
            "only allowed on a fast quote",
        ));
    }
    let mut configuration = request
        .configuration
        .clone()
        .ok_or(ValidationError::MissingField("configuration"))?;
    validate_quantities(&configuration)?;
    if let OrderConfiguration::Treat(order) = &mut configuration {
        normalize_treats(order, catalog);
    }
    let totals = compute_total(&configuration, catalog);

    Ok(SubmissionPayload::Standard {
        configuration,
        totals,
    })
}

/// Validate and freeze a submission.
///
/// Unselected treats (quantity 0) are dropped from the stored configuration.
pub fn build_payload(
    tenant_id: &str,
    payload: SubmissionPayload,
    contact: ContactInfo,
) -> Result<LeadSubmission, ValidationError> {
    if tenant_id.trim().is_empty() {
        return Err(ValidationError::MissingField("tenantId"));
    }
    validate_contact(&contact)?;

    let (payload, estimated_total) = match payload {
        SubmissionPayload::FastQuote { featured_item } => {
            if contact.event_date.is_none() {
                return Err(ValidationError::MissingField("eventDate"));
            }
            if !(0.0..=MAX_PRICE).contains(&featured_item.price) {
                return Err(ValidationError::invalid(
                    "price",
                    format!("must be between 0 and {MAX_PRICE}"),
                ));
            }
            let estimate = format!("{:.2}", to_currency(to_decimal(featured_item.price)));
            (SubmissionPayload::FastQuote { featured_item }, estimate)
        }
        SubmissionPayload::Standard {
            configuration,
            totals,
        } => {
            let configuration = validate_configuration(configuration, &contact)?;
            (
                SubmissionPayload::Standard {
                    configuration,
                    totals,
                },
                totals.formatted_total(),
            )
        }
    };

    Ok(LeadSubmission {
        tenant_id: tenant_id.to_string(),
        contact,
        calculator_payload: payload,
        estimated_total,
    })
}

/// Set the quantity of one treat line.
///
/// Zero removes the line; anything else is raised to the treat's minimum
/// order quantity. Returns the quantity actually stored.
pub fn apply_treat_quantity(
    selections: &mut Vec<TreatSelection>,
    id: &str,
    quantity: u32,
    catalog: &ResolvedCatalog,
) -> u32 {
    if quantity == 0 {
        selections.retain(|s| s.id != id);
        return 0;
    }

    let minimum = catalog.treat(id).map(|t| t.min_quantity).unwrap_or(1);
    let quantity = quantity.max(minimum);
    match selections.iter_mut().find(|s| s.id == id) {
        Some(existing) => existing.quantity = quantity,
        None => selections.push(TreatSelection {
            id: id.to_string(),
            quantity,
        }),
    }
    quantity
}

/// Reject quantities and attendee counts outside `0..=MAX_QUANTITY`.
///
/// Runs on live quotes as well as submissions.
pub fn validate_quantities(configuration: &OrderConfiguration) -> Result<(), ValidationError> {
    let max = f64::from(MAX_QUANTITY);
    match configuration {
        OrderConfiguration::Cake(order) => {
            for addon in &order.addons {
                if let Some(quantity) = addon.quantity
                    && !(0.0..=max).contains(&quantity)
                {
                    return Err(ValidationError::invalid(
                        "addons",
                        format!("{}: quantity must be between 0 and {MAX_QUANTITY}", addon.id),
                    ));
                }
                if addon.attendees.is_some_and(|a| a > MAX_QUANTITY) {
                    return Err(ValidationError::invalid(
                        "addons",
                        format!("{}: attendees must be at most {MAX_QUANTITY}", addon.id),
                    ));
                }
            }
        }
        OrderConfiguration::Treat(order) => {
            if let Some(treat) = order.treats.iter().find(|t| t.quantity > MAX_QUANTITY) {
                return Err(ValidationError::invalid(
                    "treats",
                    format!("{}: quantity must be at most {MAX_QUANTITY}", treat.id),
                ));
            }
        }
    }
    Ok(())
}

/// Re-apply every requested treat line so stored quantities respect the
/// catalog minimums and zero lines disappear.
fn normalize_treats(order: &mut TreatOrder, catalog: &ResolvedCatalog) {
    for requested in std::mem::take(&mut order.treats) {
        let stored =
            apply_treat_quantity(&mut order.treats, &requested.id, requested.quantity, catalog);
        if stored != requested.quantity && stored != 0 {
            tracing::debug!(
                id = %requested.id,
                requested = requested.quantity,
                stored,
                "Treat quantity raised to minimum"
            );
        }
    }
}

fn validate_contact(contact: &ContactInfo) -> Result<(), ValidationError> {
    required_text(&contact.name, "name", MAX_NAME_LEN)?;
    required_text(&contact.email, "email", MAX_EMAIL_LEN)?;
    if !contact.email.contains('@') {
        return Err(ValidationError::invalid("email", "must be an email address"));
    }
    optional_text(&contact.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    optional_text(&contact.delivery_address, "deliveryAddress", MAX_ADDRESS_LEN)?;
    optional_text(&contact.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

fn validate_configuration(
    configuration: OrderConfiguration,
    contact: &ContactInfo,
) -> Result<OrderConfiguration, ValidationError> {
    if configuration.delivery_option().trim().is_empty() {
        return Err(ValidationError::MissingField("deliveryOption"));
    }
    if !configuration.is_pickup()
        && contact
            .delivery_address
            .as_deref()
            .is_none_or(|address| address.trim().is_empty())
    {
        return Err(ValidationError::MissingField("deliveryAddress"));
    }

    match configuration {
        OrderConfiguration::Cake(order) => {
            if order.tiers.is_empty() {
                return Err(ValidationError::EmptyOrder("tiers"));
            }
            Ok(OrderConfiguration::Cake(order))
        }
        OrderConfiguration::Treat(mut order) => {
            order.treats.retain(|t| t.quantity > 0);
            if order.treats.is_empty() {
                return Err(ValidationError::EmptyOrder("treats"));
            }
            Ok(OrderConfiguration::Treat(order))
        }
    }
}

fn required_text(value: &str, field: &'static str, max_len: usize) -> Result<(), ValidationError> {
    check_required_text(value, max_len).map_err(|v| ValidationError::from_text(field, v))
}

fn optional_text(
    value: &Option<String>,
    field: &'static str,
    max_len: usize,
) -> Result<(), ValidationError> {
    check_optional_text(value, max_len).map_err(|v| ValidationError::from_text(field, v))
}
