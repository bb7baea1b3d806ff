//! DOM Node Operations
//!
//! Error type shared by tree mutations.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Inserting an ancestor into its own subtree, or a child under a text node
    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Invalid node type")]
    InvalidNodeType,

    #[error("Node is not a child")]
    NotAChild,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomError::HierarchyRequest.to_string(), "Hierarchy request error");
        assert_eq!(DomError::NotAChild.to_string(), "Node is not a child");
        assert!(DomError::NotFound(NodeId(7)).to_string().starts_with("Node not found"));
    }
}
