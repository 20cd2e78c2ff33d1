//! In-memory node tree implementing the render target contract

use aether_bar_core::{NodeId, NodeKind, RenderTarget};
use aether_bar_types::{Fragment, Position};
use log::trace;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TreeNode {
    kind: NodeKind,
    identifier: Option<String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    content: Option<Fragment>,
}

/// Arena of display nodes with an identifier index.
///
/// Entries freed by `remove_node` are reused, so repeated layout rebuilds
/// keep the arena at the size of the largest layout.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Option<TreeNode>>,
    free: Vec<usize>,
    index: HashMap<String, NodeId>,
}

impl NodeTree {
    /// Empty tree without regions
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree with the three region nodes in place
    pub fn with_regions() -> Self {
        let mut tree = Self::new();
        for position in Position::ALL {
            tree.add_region(position);
        }
        tree
    }

    /// Create a region node
    pub fn add_region(&mut self, position: Position) -> NodeId {
        self.create_node(NodeKind::Region(position))
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|node| &node.kind)
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.node(id).map(|node| node.classes.as_slice()).unwrap_or(&[])
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn content(&self, id: NodeId) -> Option<&Fragment> {
        self.node(id).and_then(|node| node.content.as_ref())
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Region node for a position, if present
    pub fn region(&self, position: Position) -> Option<NodeId> {
        self.node_by_id(position.region_id())
    }
}

impl RenderTarget for NodeTree {
    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let identifier = kind.identifier();
        let node = TreeNode {
            classes: kind.classes(),
            kind,
            identifier: identifier.clone(),
            parent: None,
            children: Vec::new(),
            content: None,
        };
        let id = match self.free.pop() {
            Some(entry) => {
                self.nodes[entry] = Some(node);
                NodeId(entry)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };
        if let Some(identifier) = identifier {
            self.index.insert(identifier, id);
        }
        id
    }

    fn node_by_id(&self, identifier: &str) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }

    fn remove_node(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.get_mut(node.0).and_then(Option::take) else {
            return;
        };
        trace!("Removing node {:?} ({:?})", node, removed.kind);
        self.free.push(node.0);

        if let Some(identifier) = &removed.identifier {
            if self.index.get(identifier) == Some(&node) {
                self.index.remove(identifier);
            }
        }
        if let Some(parent) = removed.parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|child| *child != node);
        }
        for child in removed.children {
            if let Some(child_node) = self.node_mut(child) {
                child_node.parent = None;
            }
            self.remove_node(child);
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || parent == child {
            return;
        }
        let previous_parent = match self.node_mut(child) {
            Some(node) => node.parent.replace(parent),
            None => return,
        };
        if let Some(old) = previous_parent.and_then(|p| self.node_mut(p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(child);
        }
    }

    fn set_content(&mut self, node: NodeId, fragment: &Fragment) {
        if let Some(target) = self.node_mut(node) {
            target.content = Some(fragment.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_are_indexed() {
        let tree = NodeTree::with_regions();
        assert_eq!(tree.len(), 3);
        for position in Position::ALL {
            let region = tree.region(position).unwrap();
            assert_eq!(tree.kind(region), Some(&NodeKind::Region(position)));
        }
    }

    #[test]
    fn test_append_and_remove() {
        let mut tree = NodeTree::with_regions();
        let left = tree.region(Position::Left).unwrap();
        let slot = tree.create_node(NodeKind::slot("clock"));
        tree.append_child(left, slot);
        tree.set_content(slot, &Fragment::new("clock").text("12:00"));

        assert_eq!(tree.children(left), &[slot]);
        assert_eq!(tree.node_by_id("slot-clock"), Some(slot));
        assert_eq!(tree.classes(slot), &["slot", "slot-clock"]);
        assert_eq!(tree.content(slot).map(Fragment::plain_text).as_deref(), Some("12:00"));

        tree.remove_node(slot);
        assert!(tree.children(left).is_empty());
        assert_eq!(tree.node_by_id("slot-clock"), None);
        assert_eq!(tree.content(slot), None);
    }

    #[test]
    fn test_reparenting_moves_child() {
        let mut tree = NodeTree::with_regions();
        let left = tree.region(Position::Left).unwrap();
        let right = tree.region(Position::Right).unwrap();
        let slot = tree.create_node(NodeKind::slot("cpu"));
        tree.append_child(left, slot);
        tree.append_child(right, slot);
        assert!(tree.children(left).is_empty());
        assert_eq!(tree.children(right), &[slot]);
    }

    #[test]
    fn test_freed_entries_are_reused() {
        let mut tree = NodeTree::with_regions();
        let right = tree.region(Position::Right).unwrap();
        for _ in 0..50 {
            let slot = tree.create_node(NodeKind::slot("cpu"));
            let sep = tree.create_node(NodeKind::Separator);
            tree.append_child(right, slot);
            tree.append_child(right, sep);
            tree.remove_node(slot);
            tree.remove_node(sep);
        }
        assert_eq!(tree.nodes.len(), 5);
        assert_eq!(tree.len(), 3);

        let slot = tree.create_node(NodeKind::slot("disk"));
        tree.append_child(right, slot);
        assert_eq!(tree.node_by_id("slot-disk"), Some(slot));
        assert_eq!(tree.children(right), &[slot]);
    }

    #[test]
    fn test_removing_region_removes_descendants() {
        let mut tree = NodeTree::with_regions();
        let center = tree.region(Position::Center).unwrap();
        let slot = tree.create_node(NodeKind::slot("clock"));
        tree.append_child(center, slot);
        tree.remove_node(center);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node_by_id("slot-clock"), None);
    }
}
