//! Render target trait and node kinds

use crate::constants::{SEPARATOR_CLASS, SLOT_ID_PREFIX};
use aether_bar_types::{Fragment, Position};

/// Handle to a node owned by a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Kinds of nodes the engine creates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// One of the three bar regions
    Region(Position),
    /// Placeholder holding one widget's fragment
    Slot { name: String },
    /// Spacing between two adjacent slots
    Separator,
}

impl NodeKind {
    pub fn slot(name: impl Into<String>) -> Self {
        NodeKind::Slot { name: name.into() }
    }

    /// Stable identifier used to look the node up, if it has one
    pub fn identifier(&self) -> Option<String> {
        match self {
            NodeKind::Region(position) => Some(position.region_id().to_string()),
            NodeKind::Slot { name } => Some(slot_identifier(name)),
            NodeKind::Separator => None,
        }
    }

    /// Style classes applied when the node is created
    pub fn classes(&self) -> Vec<String> {
        match self {
            NodeKind::Region(position) => vec![format!("region-{}", position.region_id())],
            NodeKind::Slot { name } => vec!["slot".to_string(), slot_identifier(name)],
            NodeKind::Separator => vec![SEPARATOR_CLASS.to_string()],
        }
    }
}

/// Identifier of the slot node for a widget name
pub fn slot_identifier(name: &str) -> String {
    format!("{}{}", SLOT_ID_PREFIX, name)
}

/// Mutable tree of named, styleable display nodes.
///
/// This is everything the engine needs from a visual toolkit: it never
/// inspects layout, geometry, or styling beyond what is listed here.
pub trait RenderTarget {
    /// Create a detached node of the given kind
    fn create_node(&mut self, kind: NodeKind) -> NodeId;

    /// Find an attached node by its identifier
    fn node_by_id(&self, identifier: &str) -> Option<NodeId>;

    /// Detach and drop a node together with its content
    fn remove_node(&mut self, node: NodeId);

    /// Append `child` as the last child of `parent`
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Replace the content of a node
    fn set_content(&mut self, node: NodeId, fragment: &Fragment);
}
