//! DOM Node Operations
//!
//! appendChild and removeChild over the arena tree.

use crate::{DomTree, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Parent cannot have children
    #[error("Invalid node type for a parent")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
}

impl DomTree {
    /// Append `child` as the last child of `parent`
    ///
    /// An attached child is moved, as in the DOM.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if parent_node.is_text() {
            return Err(DomError::InvalidNodeType);
        }
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if child_node.is_document() || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child)?;
        }

        let last = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            if let Some(node) = self.get_mut(last) {
                node.next_sibling = child;
            }
        }
        if let Some(node) = self.get_mut(parent) {
            if !node.first_child.is_valid() {
                node.first_child = child;
            }
            node.last_child = child;
        }

        tracing::trace!("Appended {:?} to {:?}", child, parent);
        Ok(child)
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if child_node.parent != parent {
            return Err(DomError::NotAChild);
        }
        let (prev, next) = (child_node.prev_sibling, child_node.next_sibling);

        if let Some(node) = self.get_mut(prev) {
            node.next_sibling = next;
        }
        if let Some(node) = self.get_mut(next) {
            node.prev_sibling = prev;
        }
        if let Some(node) = self.get_mut(parent) {
            if node.first_child == child {
                node.first_child = next;
            }
            if node.last_child == child {
                node.last_child = prev;
            }
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }

        Ok(child)
    }
}
