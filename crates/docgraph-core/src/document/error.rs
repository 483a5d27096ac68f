use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading parsed elements.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid element JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocumentError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::Io {
            path: path.into(),
            source,
        }
    }
}
