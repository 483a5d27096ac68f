//! Parsed document elements.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key holding an explicit reference to the parent element.
pub const PARENT_ID_KEY: &str = "parent_id";

/// Element categories recognized by the hierarchy builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Title,
    NarrativeText,
    ListItem,
    Image,
    Table,
    FigureCaption,
    Formula,
    Address,
    EmailAddress,
    PageBreak,
    Header,
    Footer,
    CodeSnippet,
    PageNumber,
    UncategorizedText,
}

impl ElementType {
    /// Every recognized element type.
    pub const ALL: [ElementType; 15] = [
        ElementType::Title,
        ElementType::NarrativeText,
        ElementType::ListItem,
        ElementType::Image,
        ElementType::Table,
        ElementType::FigureCaption,
        ElementType::Formula,
        ElementType::Address,
        ElementType::EmailAddress,
        ElementType::PageBreak,
        ElementType::Header,
        ElementType::Footer,
        ElementType::CodeSnippet,
        ElementType::PageNumber,
        ElementType::UncategorizedText,
    ];

    /// The type tag as it appears in element JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Title => "Title",
            ElementType::NarrativeText => "NarrativeText",
            ElementType::ListItem => "ListItem",
            ElementType::Image => "Image",
            ElementType::Table => "Table",
            ElementType::FigureCaption => "FigureCaption",
            ElementType::Formula => "Formula",
            ElementType::Address => "Address",
            ElementType::EmailAddress => "EmailAddress",
            ElementType::PageBreak => "PageBreak",
            ElementType::Header => "Header",
            ElementType::Footer => "Footer",
            ElementType::CodeSnippet => "CodeSnippet",
            ElementType::PageNumber => "PageNumber",
            ElementType::UncategorizedText => "UncategorizedText",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag is not one of the recognized categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownElementType(pub String);

impl fmt::Display for UnknownElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown element type: {}", self.0)
    }
}

impl std::error::Error for UnknownElementType {}

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

/// A typed unit of parsed document content.
///
/// Mirrors the element JSON written by document partitioners:
///
/// ```json
/// {"type": "Title", "element_id": "a1", "text": "Intro", "metadata": {"page_number": 1}}
/// ```
///
/// The type tag is kept verbatim so unrecognized categories survive
/// deserialization and can be reported by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Raw type tag.
    #[serde(rename = "type")]
    pub category: String,
    /// Stable identifier assigned by the partitioner.
    pub element_id: String,
    /// Extracted text.
    #[serde(default)]
    pub text: String,
    /// Passthrough metadata (page number, coordinates, parent reference...).
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Element {
    /// Create an element with empty metadata.
    pub fn new(
        category: impl Into<String>,
        element_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            element_id: element_id.into(),
            text: text.into(),
            metadata: Map::new(),
        }
    }

    /// Create an element of a recognized type.
    pub fn typed(
        element_type: ElementType,
        element_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(element_type.as_str(), element_id, text)
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the explicit parent reference.
    pub fn with_parent(self, parent_id: impl Into<String>) -> Self {
        self.with_metadata(PARENT_ID_KEY, parent_id.into())
    }

    /// The recognized type of this element, if any.
    pub fn element_type(&self) -> Option<ElementType> {
        self.category.parse().ok()
    }

    /// The explicit parent reference, when present and non-null.
    pub fn parent_id(&self) -> Option<&str> {
        self.metadata.get(PARENT_ID_KEY).and_then(Value::as_str)
    }
}
