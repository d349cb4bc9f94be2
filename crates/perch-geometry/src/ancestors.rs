//! Ancestor queries
//!
//! Which ancestor positions an element, and which ancestors can scroll it.

use perch_dom::{Document, NodeId};

/// Nearest positioned ancestor, or `None` when positioning is relative to
/// the page (no parent, or the offset parent is `<body>`)
pub fn get_positioned_ancestor(document: &Document, element: NodeId) -> Option<NodeId> {
    document.tree().parent(element)?;

    let offset_parent = document.offset_parent(element)?;
    if document.is_body(offset_parent) {
        return None;
    }
    Some(offset_parent)
}

/// First ancestor below `<body>` whose `overflow-y` is `auto` or `scroll`
pub fn find_closest_scrollable_ancestor(document: &Document, element: NodeId) -> Option<NodeId> {
    let tree = document.tree();
    let mut current = tree.parent_element(element)?;

    loop {
        if document.is_body(current) {
            return None;
        }
        if tree.style(current).is_some_and(|s| s.overflow_y.is_scrollable()) {
            return Some(current);
        }
        current = tree.parent_element(current)?;
    }
}

/// A boundary that can scroll (and clip) its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollableAncestor {
    Element(NodeId),
    /// The document itself, always last
    Document,
}

/// All scrollable ancestors, nearest first, ending with the document
pub fn get_scrollable_ancestors(document: &Document, element: NodeId) -> Vec<ScrollableAncestor> {
    let mut ancestors = Vec::new();
    let mut current = find_closest_scrollable_ancestor(document, element);

    while let Some(ancestor) = current {
        ancestors.push(ScrollableAncestor::Element(ancestor));
        current = find_closest_scrollable_ancestor(document, ancestor);
    }

    ancestors.push(ScrollableAncestor::Document);
    ancestors
}
