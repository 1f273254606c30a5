//! Featured Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::order::FeaturedItem;

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price,
    validate_required_text, validate_tenant_id,
};

/// GET /api/tenants/{tenant_id}/featured-items - all items, disabled included
pub async fn list(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
) -> AppResult<Json<Vec<FeaturedItem>>> {
    validate_tenant_id(&tenant_id)?;
    Ok(Json(state.storage.list_featured_items(&tenant_id)?))
}

/// PUT /api/tenants/{tenant_id}/featured-items - create or replace by id
pub async fn upsert(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
    Json(item): Json<FeaturedItem>,
) -> AppResult<Json<FeaturedItem>> {
    validate_tenant_id(&tenant_id)?;
    validate_required_text(&item.id, "id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&item.description, "description", MAX_NOTE_LEN)?;
    validate_price(item.price, "price")?;

    state.storage.upsert_featured_item(&tenant_id, &item)?;
    tracing::info!(tenant_id = %tenant_id, id = %item.id, "Featured item saved");
    Ok(Json(item))
}
