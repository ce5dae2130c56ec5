//! SM DOM - Document Object Model
//!
//! Arena-based DOM tree the query engine reads structural links from.
//! Nodes are addressed by [`NodeId`], an index into the arena; the
//! document node always lives at index 0.

mod document;
mod error;
mod node;
mod tree;

pub use document::{Document, ReadyState};
pub use error::{DomError, DomResult};
pub use node::{Attribute, ElementData, Node, NodeData, NodeType};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node of every tree
    pub const DOCUMENT: NodeId = NodeId(0);

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this id addresses the document node
    #[inline]
    pub fn is_document(self) -> bool {
        self == Self::DOCUMENT
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
