//! Interactive graph visualization.
//!
//! Each node is labelled `"{id} {type}"` and styled by type. The output is
//! a single HTML page using Sigma.js (WebGL renderer) and Graphology with a
//! ForceAtlas2 layout, loaded from a CDN.
//!
//! # Module Structure
//!
//! - `models` - view data (Graphology serialization format)
//! - `view` - graph to view conversion
//! - `render` - HTML template rendering

mod error;
mod models;
mod render;
mod view;

pub use error::VisualizeError;
pub use models::{EdgeAttributes, GraphData, GraphEdge, GraphNode, NodeAttributes};
pub use render::{render_html, render_page};
pub use view::{build_view, node_label};
