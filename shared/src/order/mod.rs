//! Order configuration, totals and lead submission types
//!
//! - [`OrderConfiguration`]: what the customer selected (cake or treats)
//! - [`PricedTotals`]: subtotal / delivery / tax / total
//! - [`LeadSubmission`]: frozen payload persisted as a lead

pub mod configuration;
pub mod submission;
pub mod totals;

// Re-exports
pub use configuration::*;
pub use submission::{
    ContactInfo, FeaturedItem, Lead, LeadSubmission, SubmissionPayload, SubmitRequest,
    SubmitResponse,
};
pub use totals::PricedTotals;
