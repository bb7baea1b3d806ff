//! cmn DOM - Document Object Model
//!
//! Arena-backed DOM tree with the pieces the cmn helpers touch:
//! attributes, class lists, form-control state and event listeners.

mod attributes;
mod classlist;
mod document;
mod dom_events;
mod forms;
mod node;
mod operations;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::ClassList;
pub use document::Document;
pub use dom_events::{Event, EventType, Listener};
pub use forms::ControlKind;
pub use node::{ElementData, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
