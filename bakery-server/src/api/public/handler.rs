//! Public API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::order::{
    FeaturedItem, Lead, OrderConfiguration, PricedTotals, SubmitRequest, SubmitResponse,
};

use crate::catalog::ResolvedCatalog;
use crate::core::ServerState;
use crate::pricing::compute_total;
use crate::submission::{build_payload, payload_from_request, validate_quantities};
use crate::utils::AppResult;
use crate::utils::validation::validate_tenant_id;

/// GET /api/public/{tenant_id}/catalog - selectable entries only
pub async fn catalog(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
) -> AppResult<Json<ResolvedCatalog>> {
    validate_tenant_id(&tenant_id)?;
    let catalog = state.resolved_catalog(&tenant_id)?;
    Ok(Json(catalog.active()))
}

/// POST /api/public/{tenant_id}/calculator/quote - live totals
pub async fn quote(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
    Json(configuration): Json<OrderConfiguration>,
) -> AppResult<Json<PricedTotals>> {
    validate_tenant_id(&tenant_id)?;
    validate_quantities(&configuration)?;
    let catalog = state.resolved_catalog(&tenant_id)?;
    Ok(Json(compute_total(&configuration, &catalog)))
}

/// GET /api/public/{tenant_id}/featured-items - enabled items only
pub async fn featured_items(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
) -> AppResult<Json<Vec<FeaturedItem>>> {
    validate_tenant_id(&tenant_id)?;
    let items = state
        .storage
        .list_featured_items(&tenant_id)?
        .into_iter()
        .filter(|item| item.enabled)
        .collect();
    Ok(Json(items))
}

/// POST /api/public/calculator/submit - store a lead
///
/// A tenant past its lead quota gets `{success: false, limitReached: true}`.
pub async fn submit(
    State(state): State<ServerState>,
    Json(request): Json<SubmitRequest>,
) -> AppResult<Json<SubmitResponse>> {
    validate_tenant_id(&request.tenant_id)?;

    let catalog = state.resolved_catalog(&request.tenant_id)?;
    let featured = if request.fast_quote {
        state.storage.list_featured_items(&request.tenant_id)?
    } else {
        Vec::new()
    };

    let payload = payload_from_request(&request, &catalog, &featured)?;
    let fast_quote = payload.is_fast_quote();
    let submission = build_payload(&request.tenant_id, payload, request.contact)?;

    let lead = Lead {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: chrono::Utc::now().timestamp_millis(),
        submission,
    };

    if !state
        .storage
        .insert_lead_within_quota(&lead, state.lead_quota())?
    {
        tracing::warn!(tenant_id = %request.tenant_id, "Lead quota reached, submission refused");
        return Ok(Json(SubmitResponse {
            success: false,
            lead_id: None,
            limit_reached: true,
        }));
    }

    tracing::info!(
        tenant_id = %request.tenant_id,
        lead_id = %lead.id,
        fast_quote,
        estimated_total = %lead.submission.estimated_total,
        "Lead submitted"
    );

    Ok(Json(SubmitResponse {
        success: true,
        lead_id: Some(lead.id),
        limit_reached: false,
    }))
}
