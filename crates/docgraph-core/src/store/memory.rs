//! In-process content store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::ContentStore;
use crate::projection::ContentRecord;

/// Keeps records in memory, keyed by id.
///
/// Used for dry runs where no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, ContentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, ordered by id.
    pub async fn records(&self) -> Vec<ContentRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        self.records.write().await.clear();
        Ok(())
    }

    async fn upsert_document(&self, record: &ContentRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<ContentRecord>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().await.len())
    }
}
