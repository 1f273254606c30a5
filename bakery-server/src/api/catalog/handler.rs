//! Pricing Settings API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::Value;
use shared::catalog::{AnyCatalogEntry, CatalogCategory, TenantCatalogOverride, entry_id};
use shared::error::ErrorCode;

use crate::catalog::{self, ResolvedCatalog};
use crate::core::ServerState;
use crate::utils::validation::validate_tenant_id;
use crate::utils::{AppError, AppResult};

fn parse_category(category: &str) -> AppResult<CatalogCategory> {
    category.parse().map_err(|e: shared::catalog::UnknownCategory| {
        AppError::with_message(ErrorCode::CatalogCategoryInvalid, e.to_string())
            .with_detail("category", category)
    })
}

/// GET /api/tenants/{tenant_id}/catalog
pub async fn resolved(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
) -> AppResult<Json<ResolvedCatalog>> {
    validate_tenant_id(&tenant_id)?;
    Ok(Json(state.resolved_catalog(&tenant_id)?))
}

/// GET /api/tenants/{tenant_id}/catalog/override
pub async fn get_override(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
) -> AppResult<Json<TenantCatalogOverride>> {
    validate_tenant_id(&tenant_id)?;
    Ok(Json(state.catalog_override(&tenant_id)?))
}

/// PUT /api/tenants/{tenant_id}/catalog/override - replace wholesale
///
/// Entries may be partial, but every entry must carry a string `id`.
pub async fn replace_override(
    State(state): State<ServerState>,
    Path(tenant_id): Path<String>,
    Json(doc): Json<TenantCatalogOverride>,
) -> AppResult<Json<TenantCatalogOverride>> {
    validate_tenant_id(&tenant_id)?;

    for category in CatalogCategory::ALL {
        if doc
            .entries(category)
            .iter()
            .any(|entry| entry_id(entry).is_none_or(|id| id.trim().is_empty()))
        {
            return Err(AppError::with_message(
                ErrorCode::CatalogEntryInvalid,
                format!("every {category} entry needs an id"),
            )
            .with_detail("category", category.key()));
        }
    }

    state.storage.put_catalog_override(&tenant_id, &doc)?;
    tracing::info!(tenant_id = %tenant_id, "Catalog override replaced");
    Ok(Json(doc))
}

/// PUT /api/tenants/{tenant_id}/catalog/{category}/entries
pub async fn upsert(
    State(state): State<ServerState>,
    Path((tenant_id, category)): Path<(String, String)>,
    Json(entry): Json<Value>,
) -> AppResult<Json<AnyCatalogEntry>> {
    validate_tenant_id(&tenant_id)?;
    let category = parse_category(&category)?;

    let (entry, _) = state
        .storage
        .update_catalog_override::<_, AppError>(&tenant_id, |doc| {
            Ok(catalog::upsert_entry(doc, category, entry)?)
        })?;

    tracing::info!(tenant_id = %tenant_id, category = %category, id = entry.id(), "Catalog entry saved");
    Ok(Json(entry))
}

#[derive(Debug, Deserialize)]
pub struct EnabledBody {
    pub enabled: bool,
}

/// PUT /api/tenants/{tenant_id}/catalog/{category}/entries/{id}/enabled
pub async fn set_enabled(
    State(state): State<ServerState>,
    Path((tenant_id, category, id)): Path<(String, String, String)>,
    Json(body): Json<EnabledBody>,
) -> AppResult<Json<bool>> {
    validate_tenant_id(&tenant_id)?;
    let category = parse_category(&category)?;

    state
        .storage
        .update_catalog_override::<_, AppError>(&tenant_id, |doc| {
            Ok(catalog::set_enabled(doc, category, &id, body.enabled)?)
        })?;

    tracing::info!(tenant_id = %tenant_id, category = %category, id = %id, enabled = body.enabled, "Catalog entry toggled");
    Ok(Json(body.enabled))
}

/// DELETE /api/tenants/{tenant_id}/catalog/{category}/entries/{id}
///
/// Default entries answer 409; disable them instead.
pub async fn remove(
    State(state): State<ServerState>,
    Path((tenant_id, category, id)): Path<(String, String, String)>,
) -> AppResult<Json<bool>> {
    validate_tenant_id(&tenant_id)?;
    let category = parse_category(&category)?;

    state
        .storage
        .update_catalog_override::<_, AppError>(&tenant_id, |doc| {
            Ok(catalog::remove_entry(doc, category, &id)?)
        })?;

    tracing::info!(tenant_id = %tenant_id, category = %category, id = %id, "Catalog entry removed");
    Ok(Json(true))
}
