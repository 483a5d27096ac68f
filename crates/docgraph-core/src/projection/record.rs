//! Link-annotated records ready for a content store.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content used for nodes that carry no text.
pub const MISSING_CONTENT: &str = "n/a";

/// An outgoing adjacency of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Type of the node the link leaves from.
    pub kind: String,
    /// Id of the neighbor.
    pub tag: String,
}

impl Link {
    pub fn outgoing(kind: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            tag: tag.into(),
        }
    }
}

/// Metadata stored alongside a record's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Node type.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Outgoing links, in edge insertion order.
    pub links: Vec<Link>,
}

/// One graph node flattened for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Node id.
    pub id: String,
    /// Node text, or [`MISSING_CONTENT`].
    pub content: String,
    pub metadata: RecordMetadata,
}

impl ContentRecord {
    /// SHA256 over content, type and links, hex encoded.
    ///
    /// Stores use it to skip re-embedding unchanged records.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.metadata.node_type.as_bytes());
        for link in &self.metadata.links {
            hasher.update([0u8]);
            hasher.update(link.kind.as_bytes());
            hasher.update([1u8]);
            hasher.update(link.tag.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content: &str, links: Vec<Link>) -> ContentRecord {
        ContentRecord {
            id: "n1".to_string(),
            content: content.to_string(),
            metadata: RecordMetadata {
                node_type: "section".to_string(),
                links,
            },
        }
    }

    #[test]
    fn test_metadata_serializes_type_key() {
        let r = record("Intro", vec![Link::outgoing("section", "p1")]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["metadata"]["type"], "section");
        assert_eq!(json["metadata"]["links"][0]["tag"], "p1");
    }

    #[test]
    fn test_fingerprint_tracks_links() {
        let a = record("Intro", vec![Link::outgoing("section", "p1")]);
        let b = record("Intro", vec![Link::outgoing("section", "p2")]);
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
