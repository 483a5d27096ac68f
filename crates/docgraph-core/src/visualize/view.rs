//! Conversion from a `DocumentGraph` to renderable graph data.

use tracing::warn;

use super::error::VisualizeError;
use super::models::{EdgeAttributes, GraphData, GraphEdge, GraphNode, NodeAttributes};
use crate::graph::{DocNode, DocumentGraph, NodeKind};

/// Characters of node text kept in the hover preview.
const PREVIEW_CHARS: usize = 120;

// =============================================================================
// Node Styling
// =============================================================================

/// Get the hex color for a node type.
fn kind_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Document => "#cf222e",      // Red
        NodeKind::Section => "#0969da",       // Blue
        NodeKind::NarrativeText => "#57606a", // Gray
        NodeKind::ListItem => "#1a7f37",      // Green
        NodeKind::Table => "#9a6700",         // Yellow/Orange
        NodeKind::Image | NodeKind::FigureCaption => "#8250df", // Purple
    }
}

/// Get the node size for a node type.
fn kind_size(kind: NodeKind) -> u32 {
    match kind {
        NodeKind::Document => 16,
        NodeKind::Section => 12,
        NodeKind::Table | NodeKind::Image => 8,
        _ => 6,
    }
}

/// Label shown next to a node: `"{id} {type}"`.
pub fn node_label(node: &DocNode) -> Result<String, VisualizeError> {
    if node.id.trim().is_empty() {
        return Err(VisualizeError::Label {
            node: node.id.clone(),
            reason: "node id is blank".to_string(),
        });
    }
    Ok(format!("{} {}", node.id, node.kind))
}

fn preview(node: &DocNode) -> Option<String> {
    let txt = node.txt.as_deref()?.trim();
    if txt.is_empty() {
        return None;
    }
    if txt.chars().count() > PREVIEW_CHARS {
        let cut: String = txt.chars().take(PREVIEW_CHARS - 3).collect();
        Some(format!("{}...", cut))
    } else {
        Some(txt.to_string())
    }
}

// =============================================================================
// Graph View
// =============================================================================

/// Build renderable data for every node and edge of `graph`.
///
/// A node whose label cannot be computed is logged and rendered unlabeled.
pub fn build_view(graph: &DocumentGraph) -> GraphData {
    let nodes = graph
        .nodes()
        .map(|node| {
            let label = match node_label(node) {
                Ok(label) => Some(label),
                Err(e) => {
                    warn!(node = %node.id, error = %e, "unable to set label while plotting graph");
                    None
                }
            };

            GraphNode {
                key: node.id.clone(),
                attributes: NodeAttributes {
                    label,
                    category: node.kind.to_string(),
                    color: kind_color(node.kind).to_string(),
                    size: kind_size(node.kind),
                    preview: preview(node),
                },
            }
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(source, target, edge_type)| GraphEdge {
            source: source.id.clone(),
            target: target.id.clone(),
            attributes: EdgeAttributes {
                relationship: edge_type.to_string(),
            },
        })
        .collect();

    GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeType;

    #[test]
    fn test_labels_and_edges() {
        let mut g = DocumentGraph::new("report.pdf");
        g.add_node(DocNode::new("t1", NodeKind::Section).with_text("Intro")).unwrap();
        g.add_edge("report.pdf", "t1", EdgeType::Root).unwrap();

        let view = build_view(&g);
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.nodes[0].attributes.label.as_deref(), Some("report.pdf document"));
        assert_eq!(view.nodes[1].attributes.label.as_deref(), Some("t1 section"));
        assert_eq!(view.nodes[1].attributes.preview.as_deref(), Some("Intro"));
        assert_eq!(view.edges[0].attributes.relationship, "root");
    }

    #[test]
    fn test_blank_id_rendered_without_label() {
        let mut g = DocumentGraph::new("doc");
        g.add_node(DocNode::new(" ", NodeKind::Image)).unwrap();
        g.add_edge("doc", " ", EdgeType::Root).unwrap();

        let view = build_view(&g);
        assert_eq!(view.nodes.len(), 2);
        assert!(view.nodes[1].attributes.label.is_none());
        assert_eq!(view.edges.len(), 1);
    }

    #[test]
    fn test_preview_truncated() {
        let long = "x".repeat(500);
        let node = DocNode::new("p", NodeKind::NarrativeText).with_text(long);
        let p = preview(&node).unwrap();
        assert_eq!(p.chars().count(), PREVIEW_CHARS);
        assert!(p.ends_with("..."));
    }
}
