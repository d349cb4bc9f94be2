//! Perch DOM - Document snapshot
//!
//! Arena-based DOM tree carrying the computed style and geometry that a
//! host (layout engine, web binding, test) has measured. Positioning reads
//! this snapshot at call time and never caches it.

mod node;
mod tree;
mod document;
mod operations;
mod geometry;
mod style;
mod range;
mod window;

pub use node::{Node, NodeData, ElementData, TextData};
pub use tree::{DomTree, Children, Ancestors};
pub use document::Document;
pub use operations::{DomError, DomResult};
pub use geometry::{DOMRect, ElementGeometry};
pub use style::{ComputedStyle, Position, Overflow, Direction, StyleParseError};
pub use range::Range;
pub use window::Window;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
