//! Default values for docgraph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Hierarchy Defaults
// ============================================================================

/// Attach content to the last seen title, ignoring explicit parent references.
pub const DEFAULT_INFER_HIERARCHY: bool = true;

// ============================================================================
// Store Defaults
// ============================================================================

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = ".docgraph";

/// Default database directory name inside the data directory.
pub const DEFAULT_DB_DIR: &str = "store";

/// Default SurrealDB namespace.
pub const DEFAULT_NAMESPACE: &str = "docgraph";

/// Default SurrealDB database.
pub const DEFAULT_DATABASE: &str = "documents";

/// Default table holding projected nodes.
pub const DEFAULT_NODE_TABLE: &str = "graph_nodes";

/// Records submitted to the store per batch.
pub const DEFAULT_BATCH_SIZE: usize = 32;

// ============================================================================
// Embedding Defaults
// ============================================================================

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "bge-small-en-v1.5";

// ============================================================================
// Visualization Defaults
// ============================================================================

/// Default directory for rendered pages.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default port for the visualization server.
pub const DEFAULT_SERVE_PORT: u16 = 3344;
