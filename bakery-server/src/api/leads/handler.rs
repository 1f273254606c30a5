//! Lead API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::order::{Lead, PricedTotals};

use crate::core::ServerState;
use crate::pricing::DEFAULT_TAX_RATE_PERCENT;
use crate::quote::QuoteDraft;
use crate::utils::validation::validate_tenant_id;
use crate::utils::{AppError, AppResult};

fn lead_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::LeadNotFound, format!("Lead not found: {id}"))
        .with_detail("id", id)
}

/// GET /api/tenants/{tenant_id}/leads - newest first
pub async fn list(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
) -> AppResult<Json<Vec<Lead>>> {
    validate_tenant_id(&tenant_id)?;
    Ok(Json(state.storage.list_leads(&tenant_id)?))
}

/// GET /api/tenants/{tenant_id}/leads/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((tenant_id, id)): Path<(String, String)>,
) -> AppResult<Json<Lead>> {
    validate_tenant_id(&tenant_id)?;
    let lead = state
        .storage
        .get_lead(&tenant_id, &id)?
        .ok_or_else(|| lead_not_found(&id))?;
    Ok(Json(lead))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraftQuery {
    /// Percent, 0 to 100
    pub tax_rate: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraftResponse {
    #[serde(flatten)]
    pub draft: QuoteDraft,
    pub tax_rate: Decimal,
    pub totals: PricedTotals,
}

/// GET /api/tenants/{tenant_id}/leads/{id}/quote-draft?taxRate=
///
/// Lines are re-priced against the tenant's current catalog.
pub async fn quote_draft(
    State(state): State<ServerState>,
    Path((tenant_id, id)): Path<(String, String)>,
    Query(query): Query<QuoteDraftQuery>,
) -> AppResult<Json<QuoteDraftResponse>> {
    validate_tenant_id(&tenant_id)?;
    let lead = state
        .storage
        .get_lead(&tenant_id, &id)?
        .ok_or_else(|| lead_not_found(&id))?;

    let catalog = state.resolved_catalog(&tenant_id)?;
    let draft = QuoteDraft::from_lead(&lead, &catalog);
    let tax_rate = query.tax_rate.unwrap_or(DEFAULT_TAX_RATE_PERCENT);
    let totals = draft.totals(tax_rate)?;

    Ok(Json(QuoteDraftResponse {
        draft,
        tax_rate,
        totals,
    }))
}
