//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id outside the arena
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Inserting a node below itself or one of its descendants, or moving the document
    #[error("Hierarchy request error: cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation requires an element
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// Node is not a child of the given parent
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
