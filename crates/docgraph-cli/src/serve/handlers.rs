//! HTTP route handlers for the visualization server.
//!
//! Handlers are kept thin: the page comes from `visualize::render_page`,
//! link lists from the projector.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use docgraph_core::visualize::render_page;
use docgraph_core::GraphProjector;

use super::models::{NodeDetails, SearchQuery, SearchResult};
use super::AppState;

const PREVIEW_CHARS: usize = 120;

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - Sigma.js page with the graph embedded.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match render_page(state.graph.root_id(), &state.view) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/api/graph` - Graph in Graphology's serialization format.
///
/// Response format:
/// ```json
/// {
///   "nodes": [{"key": "t1", "attributes": {"label": "t1 section", ...}}],
///   "edges": [{"source": "doc", "target": "t1", "attributes": {"relationship": "root"}}]
/// }
/// ```
pub async fn api_graph(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.view).into_response()
}

/// GET `/api/node/{id}` - Details for one node, 404 when unknown.
pub async fn api_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<NodeDetails>, StatusCode> {
    let graph = &state.graph;
    let node = graph.node(&id).ok_or(StatusCode::NOT_FOUND)?;
    let record = GraphProjector::new(graph)
        .record_for(&id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let parent = graph.parent(&id);

    Ok(Json(NodeDetails {
        key: node.id.clone(),
        node_type: node.kind.to_string(),
        text: node.txt.clone(),
        metadata: node.metadata.clone(),
        parent: parent.map(|(p, _)| p.id.clone()),
        parent_edge: parent.map(|(_, edge)| edge.to_string()),
        children: graph.children(&id).into_iter().map(|c| c.id.clone()).collect(),
        links: record.metadata.links,
    }))
}

/// GET `/api/search` - Case-insensitive match on node id and text.
///
/// Query parameters:
/// - `q`: Search query string (required)
/// - `limit`: Maximum results (default: 20)
pub async fn api_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<SearchResult>> {
    let needle = params.q.to_lowercase();

    let results = state
        .graph
        .nodes()
        .filter(|node| {
            node.id.to_lowercase().contains(&needle)
                || node
                    .txt
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
        .take(params.limit)
        .map(|node| SearchResult {
            key: node.id.clone(),
            node_type: node.kind.to_string(),
            preview: node
                .txt
                .as_deref()
                .map(|t| t.chars().take(PREVIEW_CHARS).collect()),
        })
        .collect();

    Json(results)
}
