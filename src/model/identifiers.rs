//! Node identifier newtype with a smart constructor.
//!
//! Identifiers are opaque strings, unique per item and stable across repeated
//! fetches of the same parent: expansion/loading/cache state keyed by id must
//! stay meaningful after a refresh. The raw constructor is never exported.

use std::fmt;
use thiserror::Error;

/// Error returned when constructing a [`NodeId`] from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("node id must be non-empty")]
pub struct InvalidNodeId;

/// Opaque, stable identifier for a node in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

/// Well-known identifier of the synthetic root node.
const ROOT_ID: &str = "root";

impl NodeId {
    /// Smart constructor: validates that the identifier is non-empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidNodeId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidNodeId)
        } else {
            Ok(Self(raw))
        }
    }

    /// The well-known root identifier, used to request the top-level listing.
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// Whether this is the root identifier.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
