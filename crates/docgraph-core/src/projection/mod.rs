//! Projection of a document graph into storable records.

mod projector;
mod record;

pub use projector::{project, GraphProjector, Records};
pub use record::{ContentRecord, Link, RecordMetadata, MISSING_CONTENT};
