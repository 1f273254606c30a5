//! Edits to a tenant override document
//!
//! Entries are addressed by `id`. Default entries may be replaced or switched
//! off but never removed; custom entries may be removed entirely.

use serde_json::Value;
use shared::catalog::{AnyCatalogEntry, CatalogCategory, TenantCatalogOverride, entry_id};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::defaults::default_catalog;
use crate::pricing::{MAX_PRICE, MAX_QUANTITY};

#[derive(Debug, Error)]
pub enum CatalogEditError {
    #[error("invalid {category} entry: {reason}")]
    InvalidEntry {
        category: CatalogCategory,
        reason: String,
    },

    #[error("{category} entry not found: {id}")]
    EntryNotFound { category: CatalogCategory, id: String },

    #[error("default {category} entry cannot be removed: {id}")]
    DefaultEntryNotRemovable { category: CatalogCategory, id: String },
}

impl From<CatalogEditError> for AppError {
    fn from(err: CatalogEditError) -> Self {
        let message = err.to_string();
        match err {
            CatalogEditError::InvalidEntry { category, .. } => {
                AppError::with_message(ErrorCode::CatalogEntryInvalid, message)
                    .with_detail("category", category.key())
            }
            CatalogEditError::EntryNotFound { category, id } => {
                AppError::with_message(ErrorCode::CatalogEntryNotFound, message)
                    .with_detail("category", category.key())
                    .with_detail("id", id)
            }
            CatalogEditError::DefaultEntryNotRemovable { category, id } => {
                AppError::with_message(ErrorCode::DefaultEntryNotRemovable, message)
                    .with_detail("category", category.key())
                    .with_detail("id", id)
            }
        }
    }
}

/// Insert or fully replace the entry with the same id.
///
/// The stored override is the normalized form of the validated entry, so
/// later reads never see fields the entry type does not know.
pub fn upsert_entry(
    doc: &mut TenantCatalogOverride,
    category: CatalogCategory,
    value: Value,
) -> Result<AnyCatalogEntry, CatalogEditError> {
    let invalid = |reason: String| CatalogEditError::InvalidEntry { category, reason };

    let entry = AnyCatalogEntry::from_value(category, value).map_err(|e| invalid(e.to_string()))?;
    validate_entry(&entry).map_err(invalid)?;

    let object = entry.to_object();
    let entries = doc.entries_mut(category);
    match entries
        .iter()
        .position(|existing| entry_id(existing) == Some(entry.id()))
    {
        Some(index) => {
            entries[index] = object;
            // drop later duplicates left by hand-edited documents
            let mut position = 0;
            entries.retain(|existing| {
                let keep = position <= index || entry_id(existing) != Some(entry.id());
                position += 1;
                keep
            });
        }
        None => entries.push(object),
    }

    tracing::debug!(category = %category, id = entry.id(), "Catalog entry upserted");
    Ok(entry)
}

/// Switch an entry on or off.
///
/// A default entry without an override gets a minimal `{id, enabled}` one.
pub fn set_enabled(
    doc: &mut TenantCatalogOverride,
    category: CatalogCategory,
    id: &str,
    enabled: bool,
) -> Result<(), CatalogEditError> {
    let entries = doc.entries_mut(category);
    if let Some(existing) = entries
        .iter_mut()
        .find(|existing| entry_id(existing) == Some(id))
    {
        existing.insert("enabled".to_string(), Value::Bool(enabled));
        return Ok(());
    }

    if !default_catalog().contains(category, id) {
        return Err(CatalogEditError::EntryNotFound {
            category,
            id: id.to_string(),
        });
    }

    let mut minimal = serde_json::Map::new();
    minimal.insert("id".to_string(), Value::String(id.to_string()));
    minimal.insert("enabled".to_string(), Value::Bool(enabled));
    entries.push(minimal);
    Ok(())
}

/// Remove a custom entry.
pub fn remove_entry(
    doc: &mut TenantCatalogOverride,
    category: CatalogCategory,
    id: &str,
) -> Result<(), CatalogEditError> {
    if default_catalog().contains(category, id) {
        return Err(CatalogEditError::DefaultEntryNotRemovable {
            category,
            id: id.to_string(),
        });
    }

    let entries = doc.entries_mut(category);
    let before = entries.len();
    entries.retain(|existing| entry_id(existing) != Some(id));
    if entries.len() == before {
        return Err(CatalogEditError::EntryNotFound {
            category,
            id: id.to_string(),
        });
    }
    Ok(())
}

fn validate_entry(entry: &AnyCatalogEntry) -> Result<(), String> {
    if entry.id().trim().is_empty() {
        return Err("id must not be empty".to_string());
    }
    if entry.label().trim().is_empty() {
        return Err("label must not be empty".to_string());
    }

    match entry {
        AnyCatalogEntry::Size(size) => price(size.base_price, "basePrice"),
        AnyCatalogEntry::Modifier(modifier) => modifier_amount(modifier.price_modifier),
        AnyCatalogEntry::FlatPrice(flat) => price(flat.price, "price"),
        AnyCatalogEntry::Addon(addon) => {
            price(addon.price, "price")?;
            if addon.min_attendees.is_some_and(|m| m > MAX_QUANTITY) {
                return Err(format!("minAttendees must be at most {MAX_QUANTITY}"));
            }
            Ok(())
        }
        AnyCatalogEntry::Treat(treat) => {
            price(treat.unit_price, "unitPrice")?;
            if !(1..=MAX_QUANTITY).contains(&treat.min_quantity) {
                return Err(format!("minQuantity must be between 1 and {MAX_QUANTITY}"));
            }
            Ok(())
        }
    }
}

/// Modifiers may discount, within the same bound as prices
fn modifier_amount(value: f64) -> Result<(), String> {
    if !(-MAX_PRICE..=MAX_PRICE).contains(&value) {
        return Err(format!(
            "priceModifier must be between -{MAX_PRICE} and {MAX_PRICE}"
        ));
    }
    Ok(())
}

fn price(value: f64, field: &str) -> Result<(), String> {
    if !(0.0..=MAX_PRICE).contains(&value) {
        return Err(format!("{field} must be between 0 and {MAX_PRICE}"));
    }
    Ok(())
}
