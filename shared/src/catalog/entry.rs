//! Catalog entry types
//!
//! One struct per price representation. Every numeric field defaults to zero
//! so a partially-specified tenant entry still deserializes; validation of
//! entry contents belongs to the catalog editor, not to pricing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::CatalogCategory;

fn default_enabled() -> bool {
    true
}

fn default_min_quantity() -> u32 {
    1
}

/// Common behaviour of every catalog entry, regardless of category.
pub trait CatalogEntry: Clone + Serialize + DeserializeOwned {
    /// Stable identity within the category
    fn id(&self) -> &str;

    /// Display label
    fn label(&self) -> &str;

    /// `false` only when explicitly disabled
    fn is_enabled(&self) -> bool;
}

macro_rules! impl_catalog_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl CatalogEntry for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn label(&self) -> &str {
                    &self.label
                }

                fn is_enabled(&self) -> bool {
                    self.enabled
                }
            }
        )+
    };
}

/// Cake size with its base price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display string, e.g. "12-16"
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub base_price: f64,
}

/// Shape, flavor or frosting: a modifier added to the tier base price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub price_modifier: f64,
}

/// Decoration or delivery option: a flat price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPriceEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub price: f64,
}

pub type ShapeEntry = ModifierEntry;
pub type FlavorEntry = ModifierEntry;
pub type FrostingEntry = ModifierEntry;
pub type DecorationEntry = FlatPriceEntry;
pub type DeliveryOptionEntry = FlatPriceEntry;

/// How an add-on price scales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddonPricing {
    /// `price × quantity`
    #[default]
    Flat,
    /// `price × attendees`
    PerAttendee,
}

/// Cake add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub pricing_type: AddonPricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_attendees: Option<u32>,
}

/// Treat sold by unit (usually a dozen)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(default)]
    pub description: String,
}

impl_catalog_entry!(SizeEntry, ModifierEntry, FlatPriceEntry, AddonEntry, TreatEntry);

/// A typed entry of any category, as accepted by the catalog editor.
///
/// Built with [`AnyCatalogEntry::from_value`]; the category decides the shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyCatalogEntry {
    Size(SizeEntry),
    Modifier(ModifierEntry),
    FlatPrice(FlatPriceEntry),
    Addon(AddonEntry),
    Treat(TreatEntry),
}

impl AnyCatalogEntry {
    /// Deserialize `value` as the entry type of `category`.
    pub fn from_value(
        category: CatalogCategory,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match category {
            CatalogCategory::Sizes => Self::Size(serde_json::from_value(value)?),
            CatalogCategory::Shapes | CatalogCategory::Flavors | CatalogCategory::Frostings => {
                Self::Modifier(serde_json::from_value(value)?)
            }
            CatalogCategory::Decorations | CatalogCategory::DeliveryOptions => {
                Self::FlatPrice(serde_json::from_value(value)?)
            }
            CatalogCategory::Addons => Self::Addon(serde_json::from_value(value)?),
            CatalogCategory::Treats => Self::Treat(serde_json::from_value(value)?),
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Size(e) => e.id(),
            Self::Modifier(e) => e.id(),
            Self::FlatPrice(e) => e.id(),
            Self::Addon(e) => e.id(),
            Self::Treat(e) => e.id(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Size(e) => e.label(),
            Self::Modifier(e) => e.label(),
            Self::FlatPrice(e) => e.label(),
            Self::Addon(e) => e.label(),
            Self::Treat(e) => e.label(),
        }
    }

    /// Serialize back into the JSON object stored in an override document.
    pub fn to_object(&self) -> serde_json::Map<String, serde_json::Value> {
        let value = match self {
            Self::Size(e) => serde_json::to_value(e),
            Self::Modifier(e) => serde_json::to_value(e),
            Self::FlatPrice(e) => serde_json::to_value(e),
            Self::Addon(e) => serde_json::to_value(e),
            Self::Treat(e) => serde_json::to_value(e),
        };
        match value {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_enabled_means_active() {
        let entry: ModifierEntry =
            serde_json::from_value(json!({"id": "lemon", "label": "Lemon"})).unwrap();
        assert!(entry.is_enabled());
        assert_eq!(entry.price_modifier, 0.0);
    }

    #[test]
    fn test_explicit_false_disables() {
        let entry: ModifierEntry =
            serde_json::from_value(json!({"id": "lemon", "enabled": false})).unwrap();
        assert!(!entry.is_enabled());
    }

    #[test]
    fn test_addon_pricing_type_wire_names() {
        let entry: AddonEntry = serde_json::from_value(json!({
            "id": "full-sweets-table",
            "price": 5,
            "pricingType": "per-attendee",
            "minAttendees": 20
        }))
        .unwrap();
        assert_eq!(entry.pricing_type, AddonPricing::PerAttendee);
        assert_eq!(entry.min_attendees, Some(20));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["pricingType"], "per-attendee");
    }

    #[test]
    fn test_treat_min_quantity_defaults_to_one() {
        let entry: TreatEntry =
            serde_json::from_value(json!({"id": "brownies", "unitPrice": 28})).unwrap();
        assert_eq!(entry.min_quantity, 1);
        assert_eq!(entry.unit_price, 28.0);
    }

    #[test]
    fn test_any_entry_follows_category_shape() {
        let entry = AnyCatalogEntry::from_value(
            CatalogCategory::Sizes,
            json!({"id": "14-round", "label": "14\" Round", "basePrice": 160}),
        )
        .unwrap();
        assert!(matches!(entry, AnyCatalogEntry::Size(ref s) if s.base_price == 160.0));
        assert_eq!(entry.id(), "14-round");
        assert_eq!(entry.to_object()["basePrice"], json!(160.0));
    }
}
