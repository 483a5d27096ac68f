//! Graph to record projection.

use std::iter::FusedIterator;

use super::record::{ContentRecord, Link, RecordMetadata, MISSING_CONTENT};
use crate::graph::{DocNode, DocumentGraph};

/// Flattens a `DocumentGraph` into `ContentRecord`s, one per node.
///
/// Projection has no side effects; persisting the records is the job of
/// [`crate::export::Exporter`].
#[derive(Debug, Clone, Copy)]
pub struct GraphProjector<'g> {
    graph: &'g DocumentGraph,
}

impl<'g> GraphProjector<'g> {
    pub fn new(graph: &'g DocumentGraph) -> Self {
        Self { graph }
    }

    /// A fresh lazy pass over every node, in insertion order.
    pub fn records(&self) -> Records<'g> {
        Records {
            graph: self.graph,
            position: 0,
        }
    }

    /// Project a single node.
    pub fn record_for(&self, id: &str) -> Option<ContentRecord> {
        self.graph.node(id).map(|node| project_node(self.graph, node))
    }
}

/// Lazy sequence of records produced by [`GraphProjector::records`].
#[derive(Debug, Clone)]
pub struct Records<'g> {
    graph: &'g DocumentGraph,
    position: usize,
}

impl Iterator for Records<'_> {
    type Item = ContentRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.graph.node_at(self.position)?;
        self.position += 1;
        Some(project_node(self.graph, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.graph.node_count().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}

/// Shorthand for `GraphProjector::new(graph).records()`.
pub fn project(graph: &DocumentGraph) -> Records<'_> {
    GraphProjector::new(graph).records()
}

fn project_node(graph: &DocumentGraph, node: &DocNode) -> ContentRecord {
    let node_type = node.kind.as_str();
    let links = graph
        .outgoing(&node.id)
        .into_iter()
        .map(|(neighbor, _)| Link::outgoing(node_type, neighbor.id.clone()))
        .collect();

    ContentRecord {
        id: node.id.clone(),
        content: node
            .txt
            .clone()
            .unwrap_or_else(|| MISSING_CONTENT.to_string()),
        metadata: RecordMetadata {
            node_type: node_type.to_string(),
            links,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeType, NodeKind};

    fn graph() -> DocumentGraph {
        let mut g = DocumentGraph::new("doc");
        g.add_node(DocNode::new("t1", NodeKind::Section).with_text("Intro")).unwrap();
        g.add_node(DocNode::new("p1", NodeKind::Table).with_text("")).unwrap();
        g.add_edge("doc", "t1", EdgeType::Root).unwrap();
        g.add_edge("t1", "p1", EdgeType::Inferred).unwrap();
        g
    }

    #[test]
    fn test_size_hint_counts_down() {
        let g = graph();
        let mut records = project(&g);
        assert_eq!(records.len(), 3);
        records.next();
        assert_eq!(records.len(), 2);
        records.by_ref().count();
        assert_eq!(records.len(), 0);
        assert!(records.next().is_none());
    }

    #[test]
    fn test_root_uses_sentinel() {
        let g = graph();
        let root = GraphProjector::new(&g).record_for("doc").unwrap();
        assert_eq!(root.content, MISSING_CONTENT);
        assert_eq!(root.metadata.node_type, "document");
        assert_eq!(root.metadata.links, vec![Link::outgoing("document", "t1")]);
    }

    #[test]
    fn test_empty_text_is_kept() {
        let g = graph();
        let table = GraphProjector::new(&g).record_for("p1").unwrap();
        assert_eq!(table.content, "");
        assert!(table.metadata.links.is_empty());
    }

    #[test]
    fn test_record_for_missing_node() {
        let g = graph();
        assert!(GraphProjector::new(&g).record_for("nope").is_none());
    }
}
