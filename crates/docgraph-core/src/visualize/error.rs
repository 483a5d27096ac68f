use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering a graph.
#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize graph data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to label node {node:?}: {reason}")]
    Label { node: String, reason: String },
}
