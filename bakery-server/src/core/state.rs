use shared::catalog::TenantCatalogOverride;

use crate::catalog::ResolvedCatalog;
use crate::core::{Config, Result};
use crate::storage::BakeryStorage;
use crate::utils::AppResult;

/// Server state shared by every handler
///
/// Cloning is cheap: the storage handle is reference counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: BakeryStorage,
}

impl ServerState {
    pub fn new(config: Config, storage: BakeryStorage) -> Self {
        Self { config, storage }
    }

    /// Create the work directory and open the database inside it
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let path = config.database_path();
        let storage = BakeryStorage::open(&path)?;
        tracing::info!(path = %path.display(), "Database opened");

        Ok(Self::new(config.clone(), storage))
    }

    /// The tenant's stored override document, or an empty one
    pub fn catalog_override(&self, tenant_id: &str) -> AppResult<TenantCatalogOverride> {
        Ok(self
            .storage
            .get_catalog_override(tenant_id)?
            .unwrap_or_default())
    }

    /// Defaults merged with the tenant's overrides (disabled entries included)
    pub fn resolved_catalog(&self, tenant_id: &str) -> AppResult<ResolvedCatalog> {
        let doc = self.storage.get_catalog_override(tenant_id)?;
        Ok(ResolvedCatalog::resolve(doc.as_ref()))
    }

    pub fn lead_quota(&self) -> u64 {
        self.config.lead_quota_per_tenant
    }
}
