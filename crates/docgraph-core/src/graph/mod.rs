//! Document structure graph.
//!
//! - [`DocumentGraph`] - directed graph keyed by element id
//! - [`HierarchyBuilder`] - decides where each incoming element hangs
//!
//! Structural edges (`root`, `inheritance`, `inferred`) always form a tree
//! rooted at the document node; [`DocumentGraph::validate_tree`] checks it.

mod builder;
mod error;
mod model;

pub use builder::{BuildSummary, HierarchyBuilder, ProcessOutcome};
pub use error::GraphError;
pub use model::{DocNode, DocumentGraph, EdgeSnapshot, EdgeType, GraphSnapshot, NodeKind};
