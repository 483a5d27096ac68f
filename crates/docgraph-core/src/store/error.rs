//! Content store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or querying records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(String),

    /// Embedding generation error.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store schema has not been created.
    #[error("Content store not initialized. Run 'docgraph export' first.")]
    NotInitialized,

    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Rejected by the store, e.g. a record that fails validation.
    #[error("Rejected record {id}: {reason}")]
    Rejected { id: String, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
