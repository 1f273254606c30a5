//! Customer order configuration
//!
//! What the public order page builds while the customer clicks around. The
//! two order shapes are a closed sum type tagged on `category`.

use serde::{Deserialize, Serialize};

/// Delivery option id that never carries a fee or needs an address
pub const PICKUP_OPTION: &str = "pickup";

/// One cake tier: four catalog ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeTier {
    pub size: String,
    pub shape: String,
    pub flavor: String,
    pub frosting: String,
}

/// Selected treat line; quantity 0 is never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatSelection {
    pub id: String,
    pub quantity: u32,
}

/// Selected cake add-on
///
/// `quantity` applies to flat add-ons (0.5 = half dozen), `attendees` to
/// per-attendee add-ons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonSelection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
}

impl AddonSelection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            quantity: None,
            attendees: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CakeOrder {
    pub tiers: Vec<CakeTier>,
    #[serde(default)]
    pub decorations: Vec<String>,
    #[serde(default)]
    pub addons: Vec<AddonSelection>,
    pub delivery_option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatOrder {
    pub treats: Vec<TreatSelection>,
    pub delivery_option: String,
}

/// A customer's selections, exactly one shape at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum OrderConfiguration {
    Cake(CakeOrder),
    Treat(TreatOrder),
}

impl OrderConfiguration {
    pub fn delivery_option(&self) -> &str {
        match self {
            Self::Cake(order) => &order.delivery_option,
            Self::Treat(order) => &order.delivery_option,
        }
    }

    pub fn is_pickup(&self) -> bool {
        self.delivery_option() == PICKUP_OPTION
    }
}
