//! Document graph error types.

use thiserror::Error;

/// Errors raised while building or querying a document graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A non-title element arrived before any title established a section.
    #[error("No section anchor established before element {element_id}")]
    NoSectionAnchor { element_id: String },

    /// An element id was seen twice.
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    /// An edge endpoint does not exist.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// The structural edges do not form a tree rooted at the document node.
    #[error("Graph is not a tree: {0}")]
    NotATree(String),
}
