//! Resize observer entries

use perch_dom::{DOMRect, NodeId};

/// Observed box size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResizeObserverSize {
    pub inline_size: f64,
    pub block_size: f64,
}

impl ResizeObserverSize {
    pub fn new(inline_size: f64, block_size: f64) -> Self {
        Self { inline_size, block_size }
    }
}

/// Resize observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeObserverEntry {
    pub target: NodeId,
    /// Content box, relative to the element's padding edge
    pub content_rect: DOMRect,
    pub content_box_size: ResizeObserverSize,
    pub border_box_size: ResizeObserverSize,
}

impl ResizeObserverEntry {
    pub fn new(target: NodeId, content: ResizeObserverSize, border: ResizeObserverSize) -> Self {
        Self {
            target,
            content_rect: DOMRect::from_xywh(0.0, 0.0, content.inline_size, content.block_size),
            content_box_size: content,
            border_box_size: border,
        }
    }
}
