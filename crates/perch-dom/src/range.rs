//! DOM Range
//!
//! Boundary points plus the client rects the host measured for the range
//! (one per line box it spans). A collapsed range at some positions has no
//! client rects at all.

use crate::{DOMRect, DomTree, NodeId};

/// Range between two boundary points
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start_container: NodeId,
    pub start_offset: u32,
    pub end_container: NodeId,
    pub end_offset: u32,
    client_rects: Vec<DOMRect>,
}

impl Range {
    /// Create a range
    pub fn new(
        start_container: NodeId,
        start_offset: u32,
        end_container: NodeId,
        end_offset: u32,
    ) -> Self {
        Self {
            start_container,
            start_offset,
            end_container,
            end_offset,
            client_rects: Vec::new(),
        }
    }

    /// Create a collapsed range
    pub fn collapsed(container: NodeId, offset: u32) -> Self {
        Self::new(container, offset, container, offset)
    }

    /// Attach measured client rects
    pub fn with_client_rects(mut self, rects: impl IntoIterator<Item = DOMRect>) -> Self {
        self.client_rects = rects.into_iter().collect();
        self
    }

    /// `getClientRects()`
    pub fn client_rects(&self) -> &[DOMRect] {
        &self.client_rects
    }

    /// Check if start and end are the same point
    pub fn is_collapsed(&self) -> bool {
        self.start_container == self.end_container && self.start_offset == self.end_offset
    }

    /// `commonAncestorContainer`
    pub fn common_ancestor_container(&self, tree: &DomTree) -> Option<NodeId> {
        tree.common_ancestor(self.start_container, self.end_container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ancestor_container() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let a = tree.create_text("one");
        let b = tree.create_element("b");
        let c = tree.create_text("two");
        tree.append_child(tree.root(), p).unwrap();
        tree.append_child(p, a).unwrap();
        tree.append_child(p, b).unwrap();
        tree.append_child(b, c).unwrap();

        let range = Range::new(a, 1, c, 2);
        assert!(!range.is_collapsed());
        assert_eq!(range.common_ancestor_container(&tree), Some(p));

        let collapsed = Range::collapsed(c, 0);
        assert!(collapsed.is_collapsed());
        assert_eq!(collapsed.common_ancestor_container(&tree), Some(c));
    }
}
