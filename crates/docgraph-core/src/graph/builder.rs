//! Incremental hierarchy inference over a stream of elements.

use std::fmt;

use tracing::{debug, warn};

use super::error::GraphError;
use super::model::{DocNode, DocumentGraph, EdgeType, NodeKind};
use crate::config::HierarchyConfig;
use crate::document::{Element, ElementType};

/// What `HierarchyBuilder::process` did with an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A node was inserted and attached.
    Added { id: String, kind: NodeKind },
    /// Recognized type that does not take part in the structure.
    Skipped(ElementType),
    /// Unrecognized type tag; the graph was left untouched.
    Unknown(String),
}

/// Counts collected by `HierarchyBuilder::process_all`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub added: usize,
    pub skipped: usize,
    /// Unrecognized type tags, in the order they were met.
    pub unknown: Vec<String>,
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes added, {} elements skipped, {} of unknown type",
            self.added,
            self.skipped,
            self.unknown.len()
        )
    }
}

/// Builds a `DocumentGraph` one element at a time.
///
/// Titles hang off the document root and become the current anchor.
/// Content elements attach to the anchor, or to their explicit parent when
/// inference is disabled and the element carries one.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    graph: DocumentGraph,
    anchor: Option<String>,
    config: HierarchyConfig,
}

impl HierarchyBuilder {
    /// Start a graph for `document_name` with the default configuration.
    pub fn new(document_name: impl Into<String>) -> Self {
        Self::with_config(document_name, HierarchyConfig::default())
    }

    /// Start a graph for `document_name`.
    pub fn with_config(document_name: impl Into<String>, config: HierarchyConfig) -> Self {
        Self {
            graph: DocumentGraph::new(document_name),
            anchor: None,
            config,
        }
    }

    /// Route one element into the graph.
    ///
    /// On error the graph is unchanged.
    pub fn process(&mut self, element: &Element) -> Result<ProcessOutcome, GraphError> {
        let Some(element_type) = element.element_type() else {
            debug!(id = %element.element_id, category = %element.category, "unknown element type");
            return Ok(ProcessOutcome::Unknown(element.category.clone()));
        };

        let kind = match element_type {
            ElementType::Title => NodeKind::Section,
            ElementType::NarrativeText => NodeKind::NarrativeText,
            ElementType::ListItem => NodeKind::ListItem,
            ElementType::Image => NodeKind::Image,
            ElementType::Table => NodeKind::Table,
            ElementType::FigureCaption => NodeKind::FigureCaption,
            ElementType::Formula
            | ElementType::Address
            | ElementType::EmailAddress
            | ElementType::PageBreak
            | ElementType::Header
            | ElementType::Footer
            | ElementType::CodeSnippet
            | ElementType::PageNumber
            | ElementType::UncategorizedText => {
                return Ok(ProcessOutcome::Skipped(element_type));
            }
        };

        if self.graph.contains(&element.element_id) {
            return Err(GraphError::DuplicateNode(element.element_id.clone()));
        }

        let (parent, edge_type) = self.resolve_parent(element, element_type)?;

        let node = DocNode::new(element.element_id.clone(), kind)
            .with_text(element.text.clone())
            .with_metadata(element.metadata.clone());
        self.graph.add_node(node)?;
        self.graph.add_edge(&parent, &element.element_id, edge_type)?;

        if element_type == ElementType::Title {
            self.anchor = Some(element.element_id.clone());
        }

        debug!(id = %element.element_id, %kind, %parent, %edge_type, "attached element");
        Ok(ProcessOutcome::Added {
            id: element.element_id.clone(),
            kind,
        })
    }

    /// Process elements in order, stopping at the first error.
    pub fn process_all<'a, I>(&mut self, elements: I) -> Result<BuildSummary, GraphError>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut summary = BuildSummary::default();
        for element in elements {
            match self.process(element)? {
                ProcessOutcome::Added { .. } => summary.added += 1,
                ProcessOutcome::Skipped(_) => summary.skipped += 1,
                ProcessOutcome::Unknown(category) => summary.unknown.push(category),
            }
        }
        Ok(summary)
    }

    /// Pick the parent node and edge type for a node-producing element.
    fn resolve_parent(
        &self,
        element: &Element,
        element_type: ElementType,
    ) -> Result<(String, EdgeType), GraphError> {
        if element_type == ElementType::Title {
            return Ok((self.graph.root_id().to_string(), EdgeType::Root));
        }

        if !self.config.infer_hierarchy {
            if let Some(parent_id) = element.parent_id() {
                if self.graph.contains(parent_id) {
                    return Ok((parent_id.to_string(), EdgeType::Inheritance));
                }
                warn!(
                    id = %element.element_id,
                    parent_id,
                    "parent not in graph, falling back to section anchor"
                );
            }
        }

        match &self.anchor {
            Some(anchor) => Ok((anchor.clone(), EdgeType::Inferred)),
            None => Err(GraphError::NoSectionAnchor {
                element_id: element.element_id.clone(),
            }),
        }
    }

    /// The graph built so far.
    pub fn graph(&self) -> &DocumentGraph {
        &self.graph
    }

    /// Finish building and take the graph.
    pub fn into_graph(self) -> DocumentGraph {
        self.graph
    }

    /// Id of the current section anchor.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }
}
