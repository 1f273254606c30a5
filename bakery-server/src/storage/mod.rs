//! redb-based storage for catalog overrides, featured items and leads
//!
//! Values are JSON. Every tenant-scoped mutation runs as one write
//! transaction, so a read-modify-write of an override document is atomic.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::catalog::TenantCatalogOverride;
use shared::error::{AppError, ErrorCode};
use shared::order::{FeaturedItem, Lead};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Catalog overrides: key = tenant_id, value = JSON document
const CATALOG_OVERRIDES_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("catalog_overrides");

/// Featured items: key = (tenant_id, item_id), value = JSON
const FEATURED_ITEMS_TABLE: TableDefinition<(&str, &str), &[u8]> =
    TableDefinition::new("featured_items");

/// Leads: key = lead_id, value = JSON
const LEADS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("leads");

/// Index: (tenant_id, lead_id) -> ()
const LEADS_BY_TENANT_TABLE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("leads_by_tenant");

/// Lead counter per tenant, checked against the submission quota
const LEAD_COUNTS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("lead_counts");

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Map a storage failure to an error code (the client localizes)
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::StorageCorrupted;
    }

    let err_str = e.to_string().to_lowercase();
    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }
    if matches!(e, StorageError::Database(_) | StorageError::Transaction(_)) {
        return ErrorCode::SystemBusy;
    }
    ErrorCode::DatabaseError
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage failure");
        AppError::with_message(classify_storage_error(&err), err.to_string())
    }
}

/// Service storage
#[derive(Clone)]
pub struct BakeryStorage {
    db: Arc<Database>,
}

impl BakeryStorage {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CATALOG_OVERRIDES_TABLE)?;
            let _ = write_txn.open_table(FEATURED_ITEMS_TABLE)?;
            let _ = write_txn.open_table(LEADS_TABLE)?;
            let _ = write_txn.open_table(LEADS_BY_TENANT_TABLE)?;
            let _ = write_txn.open_table(LEAD_COUNTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Catalog Overrides ==========

    /// The tenant's override document, if it was ever saved
    pub fn get_catalog_override(
        &self,
        tenant_id: &str,
    ) -> StorageResult<Option<TenantCatalogOverride>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CATALOG_OVERRIDES_TABLE)?;

        match table.get(tenant_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Replace the tenant's override document wholesale
    pub fn put_catalog_override(
        &self,
        tenant_id: &str,
        doc: &TenantCatalogOverride,
    ) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CATALOG_OVERRIDES_TABLE)?;
            let value = serde_json::to_vec(doc)?;
            table.insert(tenant_id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Atomic read-modify-write of the tenant's override document.
    ///
    /// Nothing is written when `f` fails.
    pub fn update_catalog_override<T, E>(
        &self,
        tenant_id: &str,
        f: impl FnOnce(&mut TenantCatalogOverride) -> Result<T, E>,
    ) -> Result<(T, TenantCatalogOverride), E>
    where
        E: From<StorageError>,
    {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let (result, doc) = {
            let mut table = txn
                .open_table(CATALOG_OVERRIDES_TABLE)
                .map_err(StorageError::from)?;
            let mut doc: TenantCatalogOverride =
                match table.get(tenant_id).map_err(StorageError::from)? {
                    Some(guard) => {
                        serde_json::from_slice(guard.value()).map_err(StorageError::from)?
                    }
                    None => TenantCatalogOverride::default(),
                };
            let result = f(&mut doc)?;
            let value = serde_json::to_vec(&doc).map_err(StorageError::from)?;
            table
                .insert(tenant_id, value.as_slice())
                .map_err(StorageError::from)?;
            (result, doc)
        };
        txn.commit().map_err(StorageError::from)?;
        Ok((result, doc))
    }

    // ========== Featured Items ==========

    /// All featured items of a tenant, ordered by id
    pub fn list_featured_items(&self, tenant_id: &str) -> StorageResult<Vec<FeaturedItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FEATURED_ITEMS_TABLE)?;

        let range_start: (&str, &str) = (tenant_id, "");
        let range_end: (&str, &str) = (tenant_id, "\u{ffff}");

        let mut items = Vec::new();
        for result in table.range(range_start..=range_end)? {
            let (_, guard) = result?;
            items.push(serde_json::from_slice(guard.value())?);
        }
        Ok(items)
    }

    pub fn upsert_featured_item(&self, tenant_id: &str, item: &FeaturedItem) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(FEATURED_ITEMS_TABLE)?;
            let value = serde_json::to_vec(item)?;
            table.insert((tenant_id, item.id.as_str()), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Leads ==========

    /// Store a lead unless the tenant already holds `quota` leads.
    ///
    /// Returns `false` (and writes nothing) when the quota is exhausted.
    pub fn insert_lead_within_quota(&self, lead: &Lead, quota: u64) -> StorageResult<bool> {
        let tenant_id = lead.submission.tenant_id.as_str();
        let txn = self.db.begin_write()?;

        let count = lead_count_in(&txn, tenant_id)?;
        if count >= quota {
            txn.abort()?;
            return Ok(false);
        }

        {
            let mut leads = txn.open_table(LEADS_TABLE)?;
            let value = serde_json::to_vec(lead)?;
            leads.insert(lead.id.as_str(), value.as_slice())?;

            let mut index = txn.open_table(LEADS_BY_TENANT_TABLE)?;
            index.insert((tenant_id, lead.id.as_str()), ())?;

            let mut counts = txn.open_table(LEAD_COUNTS_TABLE)?;
            counts.insert(tenant_id, count + 1)?;
        }
        txn.commit()?;
        Ok(true)
    }

    /// A lead of this tenant; leads of other tenants are not visible
    pub fn get_lead(&self, tenant_id: &str, lead_id: &str) -> StorageResult<Option<Lead>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LEADS_TABLE)?;

        match table.get(lead_id)? {
            Some(guard) => {
                let lead: Lead = serde_json::from_slice(guard.value())?;
                Ok((lead.submission.tenant_id == tenant_id).then_some(lead))
            }
            None => Ok(None),
        }
    }

    /// Leads of a tenant, newest first
    pub fn list_leads(&self, tenant_id: &str) -> StorageResult<Vec<Lead>> {
        let read_txn = self.db.begin_read()?;
        let idx_table = read_txn.open_table(LEADS_BY_TENANT_TABLE)?;
        let data_table = read_txn.open_table(LEADS_TABLE)?;

        let range_start: (&str, &str) = (tenant_id, "");
        let range_end: (&str, &str) = (tenant_id, "\u{ffff}");

        let mut leads: Vec<Lead> = Vec::new();
        for result in idx_table.range(range_start..=range_end)? {
            let (key, _) = result?;
            let (_, lead_id) = key.value();
            if let Some(guard) = data_table.get(lead_id)? {
                leads.push(serde_json::from_slice(guard.value())?);
            }
        }

        leads.sort_by_key(|l| std::cmp::Reverse(l.created_at));
        Ok(leads)
    }

    pub fn lead_count(&self, tenant_id: &str) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LEAD_COUNTS_TABLE)?;
        Ok(table.get(tenant_id)?.map(|guard| guard.value()).unwrap_or(0))
    }
}

fn lead_count_in(txn: &WriteTransaction, tenant_id: &str) -> StorageResult<u64> {
    let table = txn.open_table(LEAD_COUNTS_TABLE)?;
    let count = table.get(tenant_id)?.map(|guard| guard.value()).unwrap_or(0);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::order::{
        ContactInfo, LeadSubmission, OrderConfiguration, PricedTotals, SubmissionPayload,
        TreatOrder, TreatSelection,
    };

    fn lead(id: &str, tenant: &str, created_at: i64) -> Lead {
        Lead {
            id: id.to_string(),
            created_at,
            submission: LeadSubmission {
                tenant_id: tenant.to_string(),
                contact: ContactInfo {
                    name: "Ana".to_string(),
                    email: "ana@example.com".to_string(),
                    ..Default::default()
                },
                calculator_payload: SubmissionPayload::Standard {
                    configuration: OrderConfiguration::Treat(TreatOrder {
                        treats: vec![TreatSelection {
                            id: "brownies".to_string(),
                            quantity: 1,
                        }],
                        delivery_option: "pickup".to_string(),
                    }),
                    totals: PricedTotals::default(),
                },
                estimated_total: "30.24".to_string(),
            },
        }
    }

    #[test]
    fn test_catalog_override_roundtrip() {
        let storage = BakeryStorage::open_in_memory().unwrap();
        assert!(storage.get_catalog_override("t1").unwrap().is_none());

        let doc: TenantCatalogOverride =
            serde_json::from_value(json!({"flavors": [{"id": "vanilla", "enabled": false}]}))
                .unwrap();
        storage.put_catalog_override("t1", &doc).unwrap();

        assert_eq!(storage.get_catalog_override("t1").unwrap(), Some(doc));
        assert!(storage.get_catalog_override("t2").unwrap().is_none());
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let storage = BakeryStorage::open_in_memory().unwrap();

        let result: Result<((), _), StorageError> =
            storage.update_catalog_override("t1", |doc| {
                doc.shapes.push(serde_json::Map::new());
                Err(StorageError::Serialization(
                    serde_json::from_str::<u8>("x").unwrap_err(),
                ))
            });
        assert!(result.is_err());
        assert!(storage.get_catalog_override("t1").unwrap().is_none());

        let ((), doc) = storage
            .update_catalog_override::<_, StorageError>("t1", |doc| {
                doc.shapes.push(serde_json::Map::new());
                Ok(())
            })
            .unwrap();
        assert_eq!(doc.shapes.len(), 1);
        assert_eq!(storage.get_catalog_override("t1").unwrap(), Some(doc));
    }

    #[test]
    fn test_featured_items_scoped_by_tenant() {
        let storage = BakeryStorage::open_in_memory().unwrap();
        let item = FeaturedItem {
            id: "wedding-classic".to_string(),
            name: "Classic Wedding Cake".to_string(),
            description: None,
            price: 450.0,
            enabled: true,
        };
        storage.upsert_featured_item("t1", &item).unwrap();

        assert_eq!(storage.list_featured_items("t1").unwrap(), vec![item]);
        assert!(storage.list_featured_items("t2").unwrap().is_empty());
    }

    #[test]
    fn test_leads_newest_first_and_quota() {
        let storage = BakeryStorage::open_in_memory().unwrap();

        assert!(storage.insert_lead_within_quota(&lead("a", "t1", 1), 2).unwrap());
        assert!(storage.insert_lead_within_quota(&lead("b", "t1", 2), 2).unwrap());
        assert!(!storage.insert_lead_within_quota(&lead("c", "t1", 3), 2).unwrap());
        assert!(storage.insert_lead_within_quota(&lead("d", "t2", 4), 2).unwrap());

        let ids: Vec<String> = storage
            .list_leads("t1")
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(storage.lead_count("t1").unwrap(), 2);

        assert!(storage.get_lead("t1", "a").unwrap().is_some());
        assert!(storage.get_lead("t2", "a").unwrap().is_none());
        assert!(storage.get_lead("t1", "c").unwrap().is_none());
    }
}
