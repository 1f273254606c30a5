//! Catalog data model
//!
//! Price lists a bakery exposes on its public order page, and the sparse
//! per-tenant override document layered over the platform defaults.

mod entry;
mod overrides;

pub use entry::*;
pub use overrides::{OverrideEntry, TenantCatalogOverride, entry_id};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight catalog categories, keyed as in the persisted override document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogCategory {
    Sizes,
    Shapes,
    Flavors,
    Frostings,
    Decorations,
    DeliveryOptions,
    Addons,
    Treats,
}

impl CatalogCategory {
    pub const ALL: [CatalogCategory; 8] = [
        Self::Sizes,
        Self::Shapes,
        Self::Flavors,
        Self::Frostings,
        Self::Decorations,
        Self::DeliveryOptions,
        Self::Addons,
        Self::Treats,
    ];

    /// JSON key of this category in the override document
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Sizes => "sizes",
            Self::Shapes => "shapes",
            Self::Flavors => "flavors",
            Self::Frostings => "frostings",
            Self::Decorations => "decorations",
            Self::DeliveryOptions => "deliveryOptions",
            Self::Addons => "addons",
            Self::Treats => "treats",
        }
    }
}

impl fmt::Display for CatalogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unknown category key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown catalog category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CatalogCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_roundtrip() {
        for category in CatalogCategory::ALL {
            assert_eq!(category.key().parse::<CatalogCategory>(), Ok(category));
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(
            "toppings".parse::<CatalogCategory>(),
            Err(UnknownCategory("toppings".to_string()))
        );
    }
}
