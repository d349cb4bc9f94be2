//! Document snapshot
//!
//! A `DomTree` with its `<html>`, `<head>` and `<body>` skeleton and the
//! window it was measured in.

use crate::{ComputedStyle, DOMRect, DomResult, DomTree, ElementGeometry, NodeId, Position, Window};

/// Measured page
#[derive(Debug, Clone)]
pub struct Document {
    pub tree: DomTree,
    window: Window,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new(window: Window) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot violate the hierarchy.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        let viewport = DOMRect::from_xywh(0.0, 0.0, window.inner_width, window.inner_height);
        for id in [html, body] {
            if let Some(geometry) = tree.geometry_mut(id) {
                *geometry = ElementGeometry::from_rect(viewport);
            }
        }

        Self {
            tree,
            window,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Tree surgery and style edits
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The window this document is shown in
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Mutable window, for scrolling
    ///
    /// Use [`Document::set_window`] to change the viewport size.
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Replace the window and stretch `<html>` and `<body>` to its new size
    pub fn set_window(&mut self, window: Window) {
        self.window = window;
        let viewport = DOMRect::from_xywh(0.0, 0.0, window.inner_width, window.inner_height);
        for id in [self.html_element, self.body_element] {
            self.set_rect(id, viewport);
        }
    }

    /// The `<html>` root
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    pub fn head(&self) -> NodeId {
        self.head_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    #[inline]
    pub fn is_body(&self, id: NodeId) -> bool {
        id == self.body_element
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag_name: &str) -> DomResult<NodeId> {
        let id = self.tree.create_element(tag_name);
        self.tree.append_child(parent, id)
    }

    /// Check if a node is attached to this document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some() && self.tree.contains(self.tree.root(), id)
    }

    /// `getComputedStyle()`
    pub fn computed_style(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.tree.style(id)
    }

    /// `getBoundingClientRect()`
    pub fn bounding_client_rect(&self, id: NodeId) -> Option<DOMRect> {
        self.tree.geometry(id).map(|g| g.bounding_client_rect)
    }

    /// Move or resize the border box of an element
    ///
    /// Borders, scrollbars and scroll offsets stay as measured.
    pub fn set_rect(&mut self, id: NodeId, rect: DOMRect) {
        if let Some(geometry) = self.tree.geometry_mut(id) {
            *geometry = geometry.with_rect(rect);
        }
    }

    /// `offsetParent`
    ///
    /// `None` for `<html>`, `<body>`, `position: fixed` and detached
    /// elements. Otherwise the nearest positioned ancestor, a `td`, `th` or
    /// `table` ancestor when the element itself is static, or `<body>`.
    pub fn offset_parent(&self, id: NodeId) -> Option<NodeId> {
        let style = self.tree.style(id)?;
        if id == self.body_element || id == self.html_element || !self.is_connected(id) {
            return None;
        }
        if style.position == Position::Fixed {
            return None;
        }
        let is_static = style.position == Position::Static;

        for ancestor in self.tree.ancestors(id) {
            if ancestor == self.body_element {
                return Some(ancestor);
            }
            let Some(element) = self.tree.element(ancestor) else {
                break;
            };
            if element.style.is_positioned() {
                return Some(ancestor);
            }
            if is_static && (element.is("td") || element.is("th") || element.is("table")) {
                return Some(ancestor);
            }
        }
        None
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Window::default())
    }
}
