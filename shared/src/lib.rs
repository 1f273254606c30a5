//! Shared types for the bakery platform
//!
//! Common types used by the server and its clients: the catalog data model,
//! order configuration and submission payloads, and the unified error and
//! response structures.

pub mod catalog;
pub mod error;
pub mod order;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use catalog::{CatalogCategory, TenantCatalogOverride};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use order::{OrderConfiguration, PricedTotals};
