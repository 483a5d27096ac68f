//! View models for graph rendering.
//!
//! Shapes follow the Graphology serialization format so the page script can
//! import them directly.

use serde::{Deserialize, Serialize};

/// Full graph handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A node in the rendered graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id.
    pub key: String,
    /// Visual and metadata attributes.
    pub attributes: NodeAttributes,
}

/// Node attributes for rendering and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// `"{id} {type}"`; absent when it could not be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Node type (section, table...).
    /// Note: this is not Sigma's render type.
    pub category: String,
    /// Hex color for rendering.
    pub color: String,
    /// Node size in pixels.
    pub size: u32,
    /// Leading characters of the node text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// An edge in the rendered graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node key.
    pub source: String,
    /// Target node key.
    pub target: String,
    pub attributes: EdgeAttributes,
}

/// Edge attributes for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeAttributes {
    /// Edge type (root, inheritance, inferred).
    /// Note: named "relationship" to avoid clashing with Sigma's edge type.
    pub relationship: String,
}
