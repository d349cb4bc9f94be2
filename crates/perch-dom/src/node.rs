//! Snapshot nodes
//!
//! Links are `NodeId`s into the owning `DomTree`; `NodeId::NONE` marks a
//! missing link.

use crate::{ComputedStyle, ElementGeometry, NodeId};

/// A node and its tree links
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    fn detached(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    pub fn element(tag_name: &str) -> Self {
        Self::detached(NodeData::Element(ElementData::new(tag_name)))
    }

    pub fn text(content: String) -> Self {
        Self::detached(NodeData::Text(TextData { content }))
    }

    pub fn document() -> Self {
        Self::detached(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Style and geometry carrier, for elements only
    pub fn as_element(&self) -> Option<&ElementData> {
        if let NodeData::Element(element) = &self.data {
            Some(element)
        } else {
            None
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(element) = &mut self.data {
            Some(element)
        } else {
            None
        }
    }
}

/// What kind of node this is
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(TextData),
}

/// An element as the host measured it
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Always lowercase
    pub tag_name: String,
    pub style: ComputedStyle,
    pub geometry: ElementGeometry,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            style: ComputedStyle::default(),
            geometry: ElementGeometry::default(),
        }
    }

    /// Case-insensitive tag check
    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }
}

#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}
