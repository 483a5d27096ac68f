//! Document structure graphs.
//!
//! A parsed document arrives as a stream of typed elements. The
//! [`HierarchyBuilder`] turns them into a [`DocumentGraph`] rooted at the
//! document, the [`GraphProjector`] flattens that graph into link-annotated
//! [`ContentRecord`]s, and the [`Exporter`] writes those records into a
//! [`ContentStore`].

pub mod config;
pub mod document;
pub mod export;
pub mod graph;
pub mod projection;
pub mod store;
pub mod text;
pub mod visualize;

pub use config::{Config, ConfigError, HierarchyConfig};
pub use document::{load_elements, Element, ElementType};
pub use export::{ExportProgress, ExportReport, Exporter};
pub use graph::{DocumentGraph, EdgeType, GraphError, HierarchyBuilder, NodeKind, ProcessOutcome};
pub use projection::{ContentRecord, GraphProjector, Link};
pub use store::{ContentStore, MemoryStore, StoreError, SurrealStore, UpsertOutcome};
