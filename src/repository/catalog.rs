//! In-memory catalog table.
//!
//! The catalog is an abstract keyed table: `get_all`, `get`, `put`,
//! `delete`, and a monotonic id counter. Every operation performs a full
//! linear scan where it needs one; that is acceptable for a catalog of
//! tens of records and is the known scaling ceiling of this design. A
//! relational table behind the same surface would be an equally valid
//! implementation.
//!
//! Repositories are explicit objects handed to every operation, never a
//! hidden singleton, so tests construct isolated catalogs freely. Cloning
//! shares the underlying table.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::CatalogError;
use crate::models::CatalogRecord;

/// The locked table state. Exposed to `update_atomically` closures so a
/// resolve-then-write sequence runs as one critical section.
#[derive(Debug, Default)]
pub struct CatalogTable {
    records: HashMap<i64, CatalogRecord>,
    next_id: i64,
}

impl CatalogTable {
    /// All records in id order. Full scan.
    pub fn all(&self) -> Vec<CatalogRecord> {
        let mut records: Vec<_> = self.records.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    pub fn get(&self, id: i64) -> Option<&CatalogRecord> {
        self.records.get(&id)
    }

    /// Allocate the next record id. Monotonic, never reused.
    pub fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Insert or replace a record keyed by its id.
    pub fn put(&mut self, record: CatalogRecord) {
        self.records.insert(record.id, record);
    }

    pub fn remove(&mut self, id: i64) -> Option<CatalogRecord> {
        self.records.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Shared handle to the catalog table.
#[derive(Clone, Default)]
pub struct CatalogRepository {
    inner: Arc<RwLock<CatalogTable>>,
}

impl CatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table contents, resuming the id counter past the
    /// highest id present.
    pub async fn hydrate(&self, records: Vec<CatalogRecord>) {
        let mut table = self.inner.write().await;
        table.next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        table.records = records.into_iter().map(|r| (r.id, r)).collect();
    }

    /// All records in id order.
    pub async fn get_all(&self) -> Vec<CatalogRecord> {
        self.inner.read().await.all()
    }

    pub async fn get(&self, id: i64) -> Option<CatalogRecord> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn put(&self, record: CatalogRecord) {
        self.inner.write().await.put(record);
    }

    /// Delete by id. A dangling id is a surfaced failure, not a no-op.
    pub async fn delete(&self, id: i64) -> Result<CatalogRecord, CatalogError> {
        self.inner
            .write()
            .await
            .remove(id)
            .ok_or_else(|| CatalogError::record_not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Run a closure against the write-locked table.
    ///
    /// Catalog mutations that first inspect the table (the merge policy's
    /// resolve step) must go through here: the write lock serializes them,
    /// so two concurrent upserts against the same (brand, model) pair
    /// cannot both resolve against the pre-mutation catalog.
    pub async fn update_atomically<T>(
        &self,
        f: impl FnOnce(&mut CatalogTable) -> T,
    ) -> T {
        let mut table = self.inner.write().await;
        f(&mut table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{defaults, Tier};

    fn record(id: i64, brand: &str, model: &str) -> CatalogRecord {
        CatalogRecord {
            id,
            brand: brand.to_string(),
            model_name: model.to_string(),
            tier: Tier::Mid,
            load_capacity_kg: defaults::LOAD_CAPACITY_KG,
            lift_height_cm: defaults::LIFT_HEIGHT_CM,
            power_type: defaults::POWER_TYPE.to_string(),
            operating_weight_kg: defaults::OPERATING_WEIGHT_KG,
            turn_radius_cm: defaults::TURN_RADIUS_CM,
            travel_speed_kmh: defaults::TRAVEL_SPEED_KMH.to_string(),
            price_range_min: defaults::PRICE_RANGE_MIN,
            price_range_max: defaults::PRICE_RANGE_MAX,
            warranty_months: defaults::WARRANTY_MONTHS,
            availability: defaults::AVAILABILITY.to_string(),
            overall_score: defaults::OVERALL_SCORE.to_string(),
            capacity_range_label: "2000-2500 kg".to_string(),
            document_url: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = CatalogRepository::new();
        let a = repo.update_atomically(|t| t.allocate_id()).await;
        let b = repo.update_atomically(|t| t.allocate_id()).await;
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_get_all_is_id_ordered() {
        let repo = CatalogRepository::new();
        repo.put(record(3, "Linde", "H25")).await;
        repo.put(record(1, "Toyota", "8FG25")).await;
        repo.put(record(2, "Hyster", "H2.5XT")).await;
        let ids: Vec<_> = repo.get_all().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let repo = CatalogRepository::new();
        let err = repo.delete(99).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { id: 99, .. }));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let repo = CatalogRepository::new();
        let other = repo.clone();
        repo.put(record(1, "Toyota", "8FG25")).await;
        assert_eq!(other.len().await, 1);
    }
}
