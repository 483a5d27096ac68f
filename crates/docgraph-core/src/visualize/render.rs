//! Self-contained HTML rendering of a document graph.
//!
//! Templates are embedded at compile time using `include_str!`:
//! - `templates/index.html` - HTML structure
//! - `templates/styles.css` - CSS styles
//! - `templates/app.js` - Sigma.js/Graphology page script

use std::path::{Path, PathBuf};

use tracing::info;

use super::error::VisualizeError;
use super::models::GraphData;
use super::view::build_view;
use crate::graph::DocumentGraph;

const HTML_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES: &str = include_str!("templates/styles.css");
const SCRIPT: &str = include_str!("templates/app.js");

/// Render a page for already built graph data.
///
/// Substitutes the template placeholders:
/// - `{{TITLE}}` - document name
/// - `{{STYLES}}` - CSS styles
/// - `{{GRAPH_DATA}}` - graph JSON
/// - `{{SCRIPT}}` - JavaScript code
pub fn render_page(title: &str, data: &GraphData) -> Result<String, VisualizeError> {
    let json = serde_json::to_string(data)?;

    Ok(HTML_TEMPLATE
        .replace("{{TITLE}}", &html_escape(title))
        .replace("{{STYLES}}", STYLES)
        .replace("{{SCRIPT}}", SCRIPT)
        .replace("{{GRAPH_DATA}}", &escape_script(&json)))
}

/// Render `graph` to `<output>.html` and return the written path.
///
/// `output` is used as is when it already ends in `.html`.
pub fn render_html(graph: &DocumentGraph, output: impl AsRef<Path>) -> Result<PathBuf, VisualizeError> {
    let output = output.as_ref();
    let path = if output.extension().is_some_and(|ext| ext == "html") {
        output.to_path_buf()
    } else {
        let mut name = output.as_os_str().to_owned();
        name.push(".html");
        PathBuf::from(name)
    };

    let page = render_page(graph.root_id(), &build_view(graph))?;
    std::fs::write(&path, page).map_err(|e| VisualizeError::Io {
        path: path.clone(),
        source: e,
    })?;

    info!(path = %path.display(), nodes = graph.node_count(), "rendered graph");
    Ok(path)
}

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep embedded JSON from closing its script tag.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
