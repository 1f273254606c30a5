//! Tenant catalog override document
//!
//! Stored as one JSON document per tenant:
//!
//! ```json
//! {
//!   "flavors": [
//!     { "id": "vanilla", "enabled": false },
//!     { "id": "pistachio", "label": "Pistachio", "priceModifier": 12 }
//!   ]
//! }
//! ```
//!
//! Entries stay raw JSON objects so partial overrides ("only `enabled`")
//! survive a round-trip untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CatalogCategory;

/// One override entry: a JSON object addressed by its `id` field
pub type OverrideEntry = Map<String, Value>;

/// Sparse per-tenant catalog overrides, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCatalogOverride {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flavors: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frostings: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delivery_options: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<OverrideEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub treats: Vec<OverrideEntry>,
}

impl TenantCatalogOverride {
    pub fn entries(&self, category: CatalogCategory) -> &[OverrideEntry] {
        match category {
            CatalogCategory::Sizes => &self.sizes,
            CatalogCategory::Shapes => &self.shapes,
            CatalogCategory::Flavors => &self.flavors,
            CatalogCategory::Frostings => &self.frostings,
            CatalogCategory::Decorations => &self.decorations,
            CatalogCategory::DeliveryOptions => &self.delivery_options,
            CatalogCategory::Addons => &self.addons,
            CatalogCategory::Treats => &self.treats,
        }
    }

    pub fn entries_mut(&mut self, category: CatalogCategory) -> &mut Vec<OverrideEntry> {
        match category {
            CatalogCategory::Sizes => &mut self.sizes,
            CatalogCategory::Shapes => &mut self.shapes,
            CatalogCategory::Flavors => &mut self.flavors,
            CatalogCategory::Frostings => &mut self.frostings,
            CatalogCategory::Decorations => &mut self.decorations,
            CatalogCategory::DeliveryOptions => &mut self.delivery_options,
            CatalogCategory::Addons => &mut self.addons,
            CatalogCategory::Treats => &mut self.treats,
        }
    }

    /// Override entry with the given id, if any
    pub fn find(&self, category: CatalogCategory, id: &str) -> Option<&OverrideEntry> {
        self.entries(category)
            .iter()
            .find(|entry| entry_id(entry) == Some(id))
    }

    pub fn is_empty(&self) -> bool {
        CatalogCategory::ALL
            .iter()
            .all(|c| self.entries(*c).is_empty())
    }
}

/// The `id` of an override entry, when it is a string
pub fn entry_id(entry: &OverrideEntry) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}
