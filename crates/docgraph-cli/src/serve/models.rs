//! API request and response types for the visualization server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use docgraph_core::Link;

/// Full record of one node for `/api/node/{id}`.
#[derive(Debug, Serialize)]
pub struct NodeDetails {
    pub key: String,
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Source element metadata, as received.
    pub metadata: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Edge type connecting the node to its parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_edge: Option<String>,
    pub children: Vec<String>,
    /// Links exactly as they are exported to the store.
    pub links: Vec<Link>,
}

/// Query parameters for `/api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

/// A node whose id or text matched a search.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub key: String,
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}
