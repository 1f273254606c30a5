//! Catalog resolution
//!
//! Merges a tenant's sparse override document over the default catalog.
//! Resolution never fails: a bad override entry is logged and skipped so the
//! public order page can always produce a price.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use shared::catalog::{
    AddonEntry, CatalogCategory, CatalogEntry, FlatPriceEntry, ModifierEntry, OverrideEntry,
    SizeEntry, TenantCatalogOverride, TreatEntry, entry_id,
};

use super::defaults::default_catalog;

/// Resolve one category.
///
/// Defaults come first in declared order (replaced field-wise by their
/// override when one exists), followed by custom entries in the order they
/// were added. A repeated override id keeps its first position and the last
/// written fields.
pub fn resolve<E: CatalogEntry>(
    category: CatalogCategory,
    defaults: &[E],
    overrides: &[OverrideEntry],
) -> Vec<E> {
    if overrides.is_empty() {
        return defaults.to_vec();
    }

    let mut order: Vec<&str> = Vec::with_capacity(overrides.len());
    let mut by_id: HashMap<&str, &OverrideEntry> = HashMap::with_capacity(overrides.len());
    for entry in overrides {
        let Some(id) = entry_id(entry) else {
            tracing::warn!(category = %category, "Override entry without id ignored");
            continue;
        };
        if by_id.insert(id, entry).is_none() {
            order.push(id);
        }
    }

    let mut resolved = Vec::with_capacity(defaults.len() + order.len());
    for default in defaults {
        match by_id.get(default.id()) {
            Some(entry) => match merge_over(default, entry) {
                Ok(merged) => resolved.push(merged),
                Err(e) => {
                    tracing::warn!(
                        category = %category,
                        id = default.id(),
                        error = %e,
                        "Malformed override for default entry, keeping default"
                    );
                    resolved.push(default.clone());
                }
            },
            None => resolved.push(default.clone()),
        }
    }

    let default_ids: HashSet<&str> = defaults.iter().map(|d| d.id()).collect();
    for id in order.into_iter().filter(|id| !default_ids.contains(id)) {
        let entry = by_id[id];
        match serde_json::from_value::<E>(Value::Object(entry.clone())) {
            Ok(custom) => resolved.push(custom),
            Err(e) => {
                tracing::warn!(
                    category = %category,
                    id,
                    error = %e,
                    "Malformed custom entry skipped"
                );
            }
        }
    }

    resolved
}

/// Overlay the override's fields on the default's JSON form.
fn merge_over<E: CatalogEntry>(default: &E, entry: &OverrideEntry) -> serde_json::Result<E> {
    let mut merged = match serde_json::to_value(default)? {
        Value::Object(map) => map,
        _ => OverrideEntry::new(),
    };
    for (key, value) in entry {
        merged.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(merged))
}

fn find<'a, E: CatalogEntry>(entries: &'a [E], id: &str) -> Option<&'a E> {
    entries.iter().find(|e| e.id() == id)
}

fn active<E: CatalogEntry>(entries: &[E]) -> Vec<E> {
    entries.iter().filter(|e| e.is_enabled()).cloned().collect()
}

/// All eight categories resolved for one tenant
///
/// Disabled entries are kept; lookups still find them so an order built
/// before an entry was switched off keeps its price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCatalog {
    pub sizes: Vec<SizeEntry>,
    pub shapes: Vec<ModifierEntry>,
    pub flavors: Vec<ModifierEntry>,
    pub frostings: Vec<ModifierEntry>,
    pub decorations: Vec<FlatPriceEntry>,
    pub delivery_options: Vec<FlatPriceEntry>,
    pub addons: Vec<AddonEntry>,
    pub treats: Vec<TreatEntry>,
}

impl ResolvedCatalog {
    /// Resolve every category against `overrides` (or the bare defaults)
    pub fn resolve(overrides: Option<&TenantCatalogOverride>) -> Self {
        let empty = TenantCatalogOverride::default();
        let doc = overrides.unwrap_or(&empty);
        let defaults = default_catalog();

        Self {
            sizes: resolve(CatalogCategory::Sizes, &defaults.sizes, &doc.sizes),
            shapes: resolve(CatalogCategory::Shapes, &defaults.shapes, &doc.shapes),
            flavors: resolve(CatalogCategory::Flavors, &defaults.flavors, &doc.flavors),
            frostings: resolve(CatalogCategory::Frostings, &defaults.frostings, &doc.frostings),
            decorations: resolve(
                CatalogCategory::Decorations,
                &defaults.decorations,
                &doc.decorations,
            ),
            delivery_options: resolve(
                CatalogCategory::DeliveryOptions,
                &defaults.delivery_options,
                &doc.delivery_options,
            ),
            addons: resolve(CatalogCategory::Addons, &defaults.addons, &doc.addons),
            treats: resolve(CatalogCategory::Treats, &defaults.treats, &doc.treats),
        }
    }

    /// The default catalog with no tenant overrides
    pub fn defaults() -> Self {
        Self::resolve(None)
    }

    /// Copy with only selectable (enabled) entries, for the public page
    pub fn active(&self) -> Self {
        Self {
            sizes: active(&self.sizes),
            shapes: active(&self.shapes),
            flavors: active(&self.flavors),
            frostings: active(&self.frostings),
            decorations: active(&self.decorations),
            delivery_options: active(&self.delivery_options),
            addons: active(&self.addons),
            treats: active(&self.treats),
        }
    }

    pub fn size(&self, id: &str) -> Option<&SizeEntry> {
        find(&self.sizes, id)
    }

    pub fn shape(&self, id: &str) -> Option<&ModifierEntry> {
        find(&self.shapes, id)
    }

    pub fn flavor(&self, id: &str) -> Option<&ModifierEntry> {
        find(&self.flavors, id)
    }

    pub fn frosting(&self, id: &str) -> Option<&ModifierEntry> {
        find(&self.frostings, id)
    }

    pub fn decoration(&self, id: &str) -> Option<&FlatPriceEntry> {
        find(&self.decorations, id)
    }

    pub fn delivery_option(&self, id: &str) -> Option<&FlatPriceEntry> {
        find(&self.delivery_options, id)
    }

    pub fn addon(&self, id: &str) -> Option<&AddonEntry> {
        find(&self.addons, id)
    }

    pub fn treat(&self, id: &str) -> Option<&TreatEntry> {
        find(&self.treats, id)
    }

    /// Ids of one category, in resolved order
    pub fn ids(&self, category: CatalogCategory) -> Vec<&str> {
        fn ids_of<E: CatalogEntry>(entries: &[E]) -> Vec<&str> {
            entries.iter().map(|e| e.id()).collect()
        }

        match category {
            CatalogCategory::Sizes => ids_of(&self.sizes),
            CatalogCategory::Shapes => ids_of(&self.shapes),
            CatalogCategory::Flavors => ids_of(&self.flavors),
            CatalogCategory::Frostings => ids_of(&self.frostings),
            CatalogCategory::Decorations => ids_of(&self.decorations),
            CatalogCategory::DeliveryOptions => ids_of(&self.delivery_options),
            CatalogCategory::Addons => ids_of(&self.addons),
            CatalogCategory::Treats => ids_of(&self.treats),
        }
    }
}
