//! Lead submission payloads
//!
//! A submission is either a standard configured order or a "fast quote" for a
//! single pre-priced featured item. On the wire the two are told apart by the
//! boolean `fastQuote` flag, and their fields never mix.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::configuration::OrderConfiguration;
use super::totals::PricedTotals;

/// Customer contact and event metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Pre-priced tenant shortcut that bypasses the tier/add-on builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Incoming body of the public submit endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub tenant_id: String,
    #[serde(default)]
    pub fast_quote: bool,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<OrderConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_item_id: Option<String>,
}

/// Frozen calculator payload stored on a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PayloadWire", into = "PayloadWire")]
pub enum SubmissionPayload {
    Standard {
        configuration: OrderConfiguration,
        totals: PricedTotals,
    },
    FastQuote {
        featured_item: FeaturedItem,
    },
}

impl SubmissionPayload {
    pub fn is_fast_quote(&self) -> bool {
        matches!(self, Self::FastQuote { .. })
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadWire {
    fast_quote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    configuration: Option<OrderConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    totals: Option<PricedTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    featured_item: Option<FeaturedItem>,
}

impl From<SubmissionPayload> for PayloadWire {
    fn from(payload: SubmissionPayload) -> Self {
        match payload {
            SubmissionPayload::Standard {
                configuration,
                totals,
            } => Self {
                fast_quote: false,
                configuration: Some(configuration),
                totals: Some(totals),
                featured_item: None,
            },
            SubmissionPayload::FastQuote { featured_item } => Self {
                fast_quote: true,
                configuration: None,
                totals: None,
                featured_item: Some(featured_item),
            },
        }
    }
}

impl TryFrom<PayloadWire> for SubmissionPayload {
    type Error = String;

    fn try_from(wire: PayloadWire) -> Result<Self, Self::Error> {
        match wire {
            PayloadWire {
                fast_quote: true,
                configuration: None,
                totals: None,
                featured_item: Some(featured_item),
            } => Ok(Self::FastQuote { featured_item }),
            PayloadWire {
                fast_quote: true, ..
            } => Err("fast quote payload must carry only featuredItem".to_string()),
            PayloadWire {
                fast_quote: false,
                configuration: Some(configuration),
                totals: Some(totals),
                featured_item: None,
            } => Ok(Self::Standard {
                configuration,
                totals,
            }),
            PayloadWire { .. } => {
                Err("standard payload must carry configuration and totals".to_string())
            }
        }
    }
}

/// Everything persisted for one public submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub tenant_id: String,
    pub contact: ContactInfo,
    pub calculator_payload: SubmissionPayload,
    /// Two-place decimal string frozen at submission time
    pub estimated_total: String,
}

/// A persisted lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    /// Unix millis
    pub created_at: i64,
    pub submission: LeadSubmission,
}

/// Response of the public submit endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub limit_reached: bool,
}
