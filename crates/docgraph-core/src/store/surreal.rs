//! SurrealDB embedded graph-vector store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::sql::Thing;
use surrealdb::Surreal;
use tracing::{debug, info};

use super::embedder::Embedder;
use super::error::StoreError;
use super::{ContentStore, UpsertOutcome};
use crate::config::StoreConfig;
use crate::projection::{ContentRecord, Link, RecordMetadata};

/// Table holding store bookkeeping.
const META_TABLE: &str = "docgraph_meta";

/// A record as persisted, with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Thing>,
    node_id: String,
    content: String,
    node_type: String,
    links: Vec<Link>,
    fingerprint: String,
    embedding: Vec<f32>,
}

impl StoredNode {
    fn into_record(self) -> ContentRecord {
        ContentRecord {
            id: self.node_id,
            content: self.content,
            metadata: RecordMetadata {
                node_type: self.node_type,
                links: self.links,
            },
        }
    }
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Id of the matching node.
    pub node_id: String,
    /// Cosine similarity (higher is closer).
    pub score: f32,
    /// Node type.
    pub node_type: String,
    /// First characters of the content.
    pub preview: Option<String>,
}

/// Content store backed by SurrealDB with RocksDB persistence.
///
/// Every record is embedded on write and indexed with HNSW so nodes can be
/// found by similarity and then expanded along their stored links.
pub struct SurrealStore {
    db: Surreal<Db>,
    embedder: Arc<dyn Embedder>,
    table: String,
}

impl SurrealStore {
    /// Open or create the database described by `config`.
    pub async fn open(config: &StoreConfig, embedder: Arc<dyn Embedder>) -> Result<Self, StoreError> {
        validate_identifier(&config.table)?;

        let path = config.db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db = Surreal::new::<RocksDb>(path.as_path()).await?;
        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        info!(path = %path.display(), table = %config.table, "opened content store");
        Ok(Self {
            db,
            embedder,
            table: config.table.clone(),
        })
    }

    /// Check if the schema has been created.
    pub async fn is_initialized(&self) -> Result<bool, StoreError> {
        let result: Option<serde_json::Value> = self
            .db
            .query(format!("SELECT value FROM {}:initialized", META_TABLE))
            .await?
            .take(0)?;

        Ok(result.is_some())
    }

    /// Nodes whose content is most similar to `query`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, StoreError> {
        if !self.is_initialized().await? {
            return Err(StoreError::NotInitialized);
        }

        let embedding = self.embed_one(query)?;

        // K must be a literal in the KNN operator
        let sql = format!(
            r#"
            SELECT
                node_id,
                vector::similarity::cosine(embedding, $embedding) AS score,
                node_type,
                string::slice(content, 0, 200) AS preview
            FROM {}
            WHERE embedding <|{},COSINE|> $embedding
            ORDER BY score DESC
            "#,
            self.table, limit
        );

        let hits: Vec<SearchHit> = self
            .db
            .query(sql)
            .bind(("embedding", embedding))
            .await?
            .take(0)?;

        Ok(hits)
    }

    /// Records reachable from `id` through one stored link.
    pub async fn linked(&self, id: &str) -> Result<Vec<ContentRecord>, StoreError> {
        let record = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut neighbors = Vec::with_capacity(record.metadata.links.len());
        for link in &record.metadata.links {
            if let Some(neighbor) = self.get(&link.tag).await? {
                neighbors.push(neighbor);
            }
        }
        Ok(neighbors)
    }

    async fn stored_fingerprint(&self, id: &str) -> Result<Option<String>, StoreError> {
        #[derive(Deserialize)]
        struct FingerprintRow {
            fingerprint: String,
        }

        let row: Option<FingerprintRow> = self
            .db
            .query(format!(
                "SELECT fingerprint FROM {} WHERE node_id = $id LIMIT 1",
                self.table
            ))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;

        Ok(row.map(|r| r.fingerprint))
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, StoreError> {
        self.embedder
            .embed(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Embedding("Embedder returned no vector".to_string()))
    }

    async fn write(
        &self,
        record: &ContentRecord,
        fingerprint: String,
        embedding: Vec<f32>,
    ) -> Result<(), StoreError> {
        let row = StoredNode {
            id: None,
            node_id: record.id.clone(),
            content: record.content.clone(),
            node_type: record.metadata.node_type.clone(),
            links: record.metadata.links.clone(),
            fingerprint,
            embedding,
        };

        // The old row survives if the create fails
        self.db
            .query(format!(
                r#"
                BEGIN TRANSACTION;
                DELETE {table} WHERE node_id = $id;
                CREATE {table} CONTENT $row;
                COMMIT TRANSACTION;
                "#,
                table = self.table
            ))
            .bind(("id", record.id.clone()))
            .bind(("row", row))
            .await?
            .check()?;

        Ok(())
    }
}

#[async_trait]
impl ContentStore for SurrealStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        let table = &self.table;
        let dimension = self.embedder.dimension();

        self.db
            .query(format!(
                r#"
                DEFINE TABLE IF NOT EXISTS {table} SCHEMALESS;
                DEFINE FIELD IF NOT EXISTS node_id ON {table} TYPE string;
                DEFINE FIELD IF NOT EXISTS content ON {table} TYPE string;
                DEFINE FIELD IF NOT EXISTS node_type ON {table} TYPE string;
                DEFINE FIELD IF NOT EXISTS fingerprint ON {table} TYPE string;
                DEFINE INDEX IF NOT EXISTS {table}_node_id ON {table} FIELDS node_id UNIQUE;
                DEFINE INDEX IF NOT EXISTS {table}_embedding ON {table} FIELDS embedding HNSW DIMENSION {dimension} DIST COSINE;
                "#
            ))
            .await?
            .check()?;

        self.db
            .query(format!(
                r#"
                DEFINE TABLE IF NOT EXISTS {META_TABLE} SCHEMALESS;
                UPSERT {META_TABLE}:initialized SET value = true, updated_at = time::now();
                UPSERT {META_TABLE}:embedding_model SET value = $model, updated_at = time::now();
                "#
            ))
            .bind(("model", self.embedder.model_name().to_string()))
            .await?
            .check()?;

        info!(table = %self.table, dimension, "content store schema ready");
        Ok(())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        self.db
            .query(format!("DELETE {}", self.table))
            .await?
            .check()?;
        info!(table = %self.table, "content store truncated");
        Ok(())
    }

    async fn upsert_document(&self, record: &ContentRecord) -> Result<(), StoreError> {
        let fingerprint = record.fingerprint();

        // Skip if unchanged
        if self.stored_fingerprint(&record.id).await?.as_deref() == Some(fingerprint.as_str()) {
            debug!(id = %record.id, "record unchanged");
            return Ok(());
        }

        let embedding = self.embed_one(&record.content)?;
        self.write(record, fingerprint, embedding).await
    }

    async fn upsert_batch(&self, records: &[ContentRecord]) -> Vec<UpsertOutcome> {
        let mut outcomes: Vec<Option<UpsertOutcome>> = Vec::with_capacity(records.len());
        let mut pending = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let fingerprint = record.fingerprint();
            match self.stored_fingerprint(&record.id).await {
                Ok(Some(stored)) if stored == fingerprint => {
                    debug!(id = %record.id, "record unchanged");
                    outcomes.push(Some(UpsertOutcome {
                        id: record.id.clone(),
                        result: Ok(()),
                    }));
                }
                Ok(_) => {
                    outcomes.push(None);
                    pending.push((position, fingerprint));
                }
                Err(e) => outcomes.push(Some(UpsertOutcome {
                    id: record.id.clone(),
                    result: Err(e),
                })),
            }
        }

        if pending.is_empty() {
            return outcomes.into_iter().flatten().collect();
        }

        // One embedder call for every changed record in the batch
        let texts: Vec<String> = pending
            .iter()
            .map(|(position, _)| records[*position].content.clone())
            .collect();

        match self.embedder.embed(&texts) {
            Ok(embeddings) if embeddings.len() == pending.len() => {
                for ((position, fingerprint), embedding) in pending.into_iter().zip(embeddings) {
                    let record = &records[position];
                    let result = self.write(record, fingerprint, embedding).await;
                    outcomes[position] = Some(UpsertOutcome {
                        id: record.id.clone(),
                        result,
                    });
                }
            }
            Ok(embeddings) => {
                let message = format!(
                    "Embedder returned {} vectors for {} texts",
                    embeddings.len(),
                    pending.len()
                );
                for (position, _) in pending {
                    outcomes[position] = Some(UpsertOutcome {
                        id: records[position].id.clone(),
                        result: Err(StoreError::Embedding(message.clone())),
                    });
                }
            }
            Err(e) => {
                let message = e.to_string();
                for (position, _) in pending {
                    outcomes[position] = Some(UpsertOutcome {
                        id: records[position].id.clone(),
                        result: Err(StoreError::Embedding(message.clone())),
                    });
                }
            }
        }

        outcomes.into_iter().flatten().collect()
    }

    async fn get(&self, id: &str) -> Result<Option<ContentRecord>, StoreError> {
        let row: Option<StoredNode> = self
            .db
            .query(format!("SELECT * FROM {} WHERE node_id = $id LIMIT 1", self.table))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;

        Ok(row.map(StoredNode::into_record))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        // SurrealDB returns count as { count: N }
        #[derive(Deserialize)]
        struct CountResult {
            count: i64,
        }

        let result: Option<CountResult> = self
            .db
            .query(format!("SELECT count() FROM {} GROUP ALL", self.table))
            .await?
            .take(0)?;

        Ok(result.map(|r| r.count as usize).unwrap_or(0))
    }
}

/// Table names are interpolated into queries, so only plain identifiers pass.
fn validate_identifier(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::Config(format!("Invalid table name: {:?}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("graph_nodes").is_ok());
        assert!(validate_identifier("_t1").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1nodes").is_err());
        assert!(validate_identifier("nodes; DELETE x").is_err());
    }
}
