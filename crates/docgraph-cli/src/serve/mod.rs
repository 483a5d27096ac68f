//! Local web server for document graph visualization.
//!
//! Serves the same Sigma.js page `docgraph plot` writes to disk, plus a
//! small JSON API the page and other tools can query.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)

mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use color_eyre::eyre::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use docgraph_core::visualize::{build_view, GraphData};
use docgraph_core::DocumentGraph;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
///
/// The graph is built once before serving and never changes afterwards.
pub struct AppState {
    pub graph: DocumentGraph,
    /// View data, built once at startup.
    pub view: GraphData,
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the visualization server.
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Whether to open the browser automatically.
    pub open_browser: bool,
    /// Graph to serve.
    pub graph: DocumentGraph,
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Start the visualization server and run until interrupted.
pub async fn start_server(config: ServeConfig) -> Result<()> {
    let view = build_view(&config.graph);
    let state = Arc::new(AppState {
        graph: config.graph,
        view,
    });

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/api/graph", get(handlers::api_graph))
        .route("/api/node/{id}", get(handlers::api_node))
        .route("/api/search", get(handlers::api_search))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let url = format!("http://localhost:{}", config.port);

    println!("Starting docgraph visualization server...");
    println!("Dashboard: {}", url);
    println!("Press Ctrl+C to stop\n");

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
