//! Content stores for projected records.
//!
//! # Components
//!
//! - [`ContentStore`] - upsert interface the export pass writes through
//! - [`MemoryStore`] - in-process store for dry runs and tests
//! - [`SurrealStore`] - SurrealDB embedded store with an HNSW vector index
//! - [`Embedder`] - embedding generation used by the vector store
//!
//! Connection setup, credentials and reset-on-start are store concerns and
//! never leak into graph building or projection.

mod embedder;
mod error;
mod memory;
mod surreal;

pub use embedder::{Embedder, FastEmbedder};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use surreal::{SearchHit, SurrealStore};

use async_trait::async_trait;

use crate::projection::ContentRecord;

/// Result of upserting one record.
#[derive(Debug)]
pub struct UpsertOutcome {
    /// Id of the record.
    pub id: String,
    pub result: Result<(), StoreError>,
}

impl UpsertOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Storage backend for content records.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create tables and indexes.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Remove every stored record.
    async fn reset(&self) -> Result<(), StoreError>;

    /// Insert or replace a single record.
    async fn upsert_document(&self, record: &ContentRecord) -> Result<(), StoreError>;

    /// Insert or replace a batch of records, reporting each one.
    ///
    /// A failure on one record never prevents the others from being tried.
    async fn upsert_batch(&self, records: &[ContentRecord]) -> Vec<UpsertOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            outcomes.push(UpsertOutcome {
                id: record.id.clone(),
                result: self.upsert_document(record).await,
            });
        }
        outcomes
    }

    /// Fetch a stored record.
    async fn get(&self, id: &str) -> Result<Option<ContentRecord>, StoreError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, StoreError>;
}
