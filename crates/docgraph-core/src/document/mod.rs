//! Parsed document input.
//!
//! Elements come from an upstream partitioner as a JSON array. This module
//! only reads them; it never extracts text itself.

mod element;
mod error;

pub use element::{Element, ElementType, UnknownElementType, PARENT_ID_KEY};
pub use error::DocumentError;

use std::path::Path;

/// Parse a JSON array of elements.
pub fn parse_elements(json: &str) -> Result<Vec<Element>, DocumentError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON array of elements from a file.
pub fn load_elements(path: impl AsRef<Path>) -> Result<Vec<Element>, DocumentError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
    let elements = parse_elements(&content)?;
    tracing::debug!(path = %path.display(), count = elements.len(), "loaded elements");
    Ok(elements)
}
