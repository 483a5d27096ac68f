//! Directed graph of document structure.

use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::GraphError;

/// Node category stored as the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Section,
    NarrativeText,
    ListItem,
    Image,
    Table,
    FigureCaption,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::NarrativeText => "narrative_text",
            NodeKind::ListItem => "list_item",
            NodeKind::Image => "image",
            NodeKind::Table => "table",
            NodeKind::FigureCaption => "figure_caption",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge label stored as the `edge_type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Document root to a section title.
    Root,
    /// Explicit parent reference carried by the element.
    Inheritance,
    /// Most recent section title to a content element.
    Inferred,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Root => "root",
            EdgeType::Inheritance => "inheritance",
            EdgeType::Inferred => "inferred",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the document graph.
///
/// Passthrough metadata from the source element is kept in its own map so
/// it can never shadow `type` or `txt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    /// Element id, or the document name for the root.
    pub id: String,
    /// Node category.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Extracted text; absent for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt: Option<String>,
    /// Raw element metadata.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl DocNode {
    /// Create a node with no text and no metadata.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            txt: None,
            metadata: Map::new(),
        }
    }

    /// Set the node text.
    pub fn with_text(mut self, txt: impl Into<String>) -> Self {
        self.txt = Some(txt.into());
        self
    }

    /// Set the passthrough metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Serializable form of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: String,
    pub target: String,
    pub edge_type: EdgeType,
}

/// Serializable form of a whole graph, nodes and edges in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Id of the root node.
    pub document: String,
    pub nodes: Vec<DocNode>,
    pub edges: Vec<EdgeSnapshot>,
}

/// Directed graph recording document structure.
///
/// Node and edge iteration follow insertion order. Nodes are never removed.
#[derive(Debug, Clone)]
pub struct DocumentGraph {
    graph: DiGraph<DocNode, EdgeType>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl DocumentGraph {
    /// Create a graph holding only the root node, typed `document`.
    pub fn new(document_name: impl Into<String>) -> Self {
        let root_node = DocNode::new(document_name, NodeKind::Document);
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        let id = root_node.id.clone();
        let root = graph.add_node(root_node);
        index.insert(id, root);

        Self { graph, index, root }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// The first node of the snapshot must be the root named by
    /// `snapshot.document`.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
        let mut nodes = snapshot.nodes.into_iter();
        let root = match nodes.next() {
            Some(node) if node.id == snapshot.document => node,
            _ => return Err(GraphError::NodeNotFound(snapshot.document)),
        };

        let mut graph = Self::new(root.id.clone());
        graph.graph[graph.root] = root;

        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in snapshot.edges {
            graph.add_edge(&edge.source, &edge.target, edge.edge_type)?;
        }
        Ok(graph)
    }

    /// The root node.
    pub fn root(&self) -> &DocNode {
        &self.graph[self.root]
    }

    /// Id of the root node.
    pub fn root_id(&self) -> &str {
        &self.root().id
    }

    pub fn node(&self, id: &str) -> Option<&DocNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes in insertion order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &DocNode> + '_ {
        self.graph.node_weights()
    }

    /// Node at a given insertion position.
    pub(crate) fn node_at(&self, position: usize) -> Option<&DocNode> {
        self.graph.node_weight(NodeIndex::new(position))
    }

    /// All edges as `(source, target, edge_type)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&DocNode, &DocNode, EdgeType)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], *e.weight()))
    }

    /// Insert a node. Ids are unique.
    pub fn add_node(&mut self, node: DocNode) -> Result<(), GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Ok(())
    }

    /// Insert a directed edge between two existing nodes.
    ///
    /// Adding an edge that already exists replaces its type.
    pub fn add_edge(&mut self, from: &str, to: &str, edge_type: EdgeType) -> Result<(), GraphError> {
        let a = self.index_of(from)?;
        let b = self.index_of(to)?;
        self.graph.update_edge(a, b, edge_type);
        Ok(())
    }

    /// Outgoing neighbors of a node, in edge insertion order.
    pub fn outgoing(&self, id: &str) -> Vec<(&DocNode, EdgeType)> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Outgoing).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| (&self.graph[e.target()], *e.weight()))
            .collect()
    }

    /// The parent of a node and the type of the edge linking them.
    pub fn parent(&self, id: &str) -> Option<(&DocNode, EdgeType)> {
        let &idx = self.index.get(id)?;
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .min_by_key(|e| e.id())
            .map(|e| (&self.graph[e.source()], *e.weight()))
    }

    /// Children of a node, in edge insertion order.
    pub fn children(&self, id: &str) -> Vec<&DocNode> {
        self.outgoing(id).into_iter().map(|(node, _)| node).collect()
    }

    /// Check that the edges form a tree rooted at the document node:
    /// the root has no parent, every other node has exactly one, and every
    /// node is reachable from the root.
    pub fn validate_tree(&self) -> Result<(), GraphError> {
        for idx in self.graph.node_indices() {
            let incoming = self.graph.edges_directed(idx, Direction::Incoming).count();
            let id = &self.graph[idx].id;
            if idx == self.root && incoming != 0 {
                return Err(GraphError::NotATree(format!("root {} has a parent", id)));
            }
            if idx != self.root && incoming != 1 {
                return Err(GraphError::NotATree(format!(
                    "node {} has {} parents",
                    id, incoming
                )));
            }
        }

        let mut reached = 0;
        let mut bfs = Bfs::new(&self.graph, self.root);
        while bfs.next(&self.graph).is_some() {
            reached += 1;
        }
        if reached != self.graph.node_count() {
            return Err(GraphError::NotATree(format!(
                "{} of {} nodes unreachable from root",
                self.graph.node_count() - reached,
                self.graph.node_count()
            )));
        }
        Ok(())
    }

    /// Serializable copy of the graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            document: self.root_id().to_string(),
            nodes: self.nodes().cloned().collect(),
            edges: self
                .edges()
                .map(|(s, t, edge_type)| EdgeSnapshot {
                    source: s.id.clone(),
                    target: t.id.clone(),
                    edge_type,
                })
                .collect(),
        }
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentGraph {
        let mut g = DocumentGraph::new("doc.pdf");
        g.add_node(DocNode::new("t1", NodeKind::Section).with_text("Intro")).unwrap();
        g.add_node(DocNode::new("p1", NodeKind::NarrativeText).with_text("Body")).unwrap();
        g.add_node(DocNode::new("p2", NodeKind::ListItem).with_text("Item")).unwrap();
        g.add_edge("doc.pdf", "t1", EdgeType::Root).unwrap();
        g.add_edge("t1", "p1", EdgeType::Inferred).unwrap();
        g.add_edge("t1", "p2", EdgeType::Inferred).unwrap();
        g
    }

    #[test]
    fn test_new_graph_has_root() {
        let g = DocumentGraph::new("report");
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.root().kind, NodeKind::Document);
        assert_eq!(g.root_id(), "report");
        assert!(g.root().txt.is_none());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut g = sample();
        let err = g.add_node(DocNode::new("p1", NodeKind::Table)).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode(id) if id == "p1"));
        assert_eq!(g.node("p1").unwrap().kind, NodeKind::NarrativeText);
    }

    #[test]
    fn test_edge_to_missing_node() {
        let mut g = sample();
        let err = g.add_edge("t1", "nope", EdgeType::Inferred).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_outgoing_in_insertion_order() {
        let g = sample();
        let ids: Vec<&str> = g.outgoing("t1").iter().map(|(n, _)| n.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert!(g.outgoing("p2").is_empty());
        assert!(g.outgoing("missing").is_empty());
    }

    #[test]
    fn test_parent() {
        let g = sample();
        let (parent, edge) = g.parent("p2").unwrap();
        assert_eq!(parent.id, "t1");
        assert_eq!(edge, EdgeType::Inferred);
        assert!(g.parent("doc.pdf").is_none());
    }

    #[test]
    fn test_update_edge_keeps_single_edge() {
        let mut g = sample();
        g.add_edge("t1", "p1", EdgeType::Inheritance).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.parent("p1").unwrap().1, EdgeType::Inheritance);
    }

    #[test]
    fn test_validate_tree() {
        let mut g = sample();
        assert!(g.validate_tree().is_ok());

        g.add_node(DocNode::new("orphan", NodeKind::Image)).unwrap();
        assert!(matches!(g.validate_tree(), Err(GraphError::NotATree(_))));
    }

    #[test]
    fn test_validate_tree_two_parents() {
        let mut g = sample();
        g.add_edge("p1", "p2", EdgeType::Inheritance).unwrap();
        let err = g.validate_tree().unwrap_err();
        assert!(err.to_string().contains("p2 has 2 parents"));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let g = sample();
        let json = serde_json::to_string(&g.snapshot()).unwrap();
        assert!(json.contains(r#""type":"narrative_text""#));
        assert!(json.contains(r#""edge_type":"inferred""#));

        let snapshot: GraphSnapshot = serde_json::from_str(&json).unwrap();
        let rebuilt = DocumentGraph::from_snapshot(snapshot).unwrap();
        assert_eq!(rebuilt.snapshot(), g.snapshot());
    }

    #[test]
    fn test_from_snapshot_requires_root_first() {
        let mut snapshot = sample().snapshot();
        snapshot.nodes.swap(0, 1);
        assert!(DocumentGraph::from_snapshot(snapshot).is_err());
    }
}
