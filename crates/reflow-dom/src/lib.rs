//! Reflow DOM - Host Document Model
//!
//! Arena-backed element tree standing in for the page a WebView hosts.
//! The style engine only ever talks to it through narrow capability
//! traits, so this crate is what tests and demos drive instead of a browser.

mod attributes;
mod document;
mod node;
mod query;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use node::{ElementData, Node, NodeData};
pub use query::{ComplexSelector, CompoundSelector, SimpleSelector};
pub use tree::{Ancestors, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM manipulation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist")]
    InvalidNode(NodeId),
    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("Cannot insert {child:?} under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
