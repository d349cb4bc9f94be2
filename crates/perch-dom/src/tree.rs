//! DOM Tree (arena-based allocation)

use crate::{ComputedStyle, ElementData, ElementGeometry, Node, NodeId};

/// Arena-based DOM tree
///
/// Index 0 always holds the document node.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node ID
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree holds nothing but the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Parent node (element or document)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)
            .map(|n| n.parent)
            .filter(|p| p.is_valid())
    }

    /// Parent node if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    /// Check if a node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Check if a node is a text node
    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_text)
    }

    /// Element data for a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag_name.as_str())
    }

    /// Computed style of an element
    pub fn style(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.element(id).map(|e| &e.style)
    }

    /// Mutable computed style of an element
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut ComputedStyle> {
        self.element_mut(id).map(|e| &mut e.style)
    }

    /// Geometry of an element
    pub fn geometry(&self, id: NodeId) -> Option<&ElementGeometry> {
        self.element(id).map(|e| &e.geometry)
    }

    /// Mutable geometry of an element
    pub fn geometry_mut(&mut self, id: NodeId) -> Option<&mut ElementGeometry> {
        self.element_mut(id).map(|e| &mut e.geometry)
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next: first }
    }

    /// Iterate over the strict ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// Check if `node` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Deepest node that contains both `a` and `b`
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        if self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }
        std::iter::once(a)
            .chain(self.ancestors(a))
            .find(|&candidate| self.contains(candidate, b))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over child nodes
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over ancestor nodes
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}
