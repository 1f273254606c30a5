//! Catalog: platform defaults, per-tenant resolution and override editing

pub mod defaults;
pub mod editor;
pub mod resolver;

pub use defaults::{DefaultCatalog, default_catalog};
pub use editor::{CatalogEditError, remove_entry, set_enabled, upsert_entry};
pub use resolver::{ResolvedCatalog, resolve};
