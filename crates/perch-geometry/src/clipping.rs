//! Overflow clipping rules for the ancestor walk in `Rect::get_visible`
//!
//! An ancestor clips a descendant only if its `overflow` is not `visible`.
//! Once an absolutely positioned element appears in the chain, only
//! `position: relative` clippers still apply to it.

use perch_dom::{ComputedStyle, Position};

/// What to do with one ancestor during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipStep {
    /// The ancestor cannot clip; move on
    Skip,
    /// Intersect with the ancestor's rect
    Clip,
}

/// Inputs of a single clipping decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipState {
    pub parent_overflow_visible: bool,
    pub parent_position: Position,
    pub absolutely_positioned_in_chain: bool,
}

impl ClipState {
    pub fn step(&self) -> ClipStep {
        if self.parent_overflow_visible {
            return ClipStep::Skip;
        }
        if self.absolutely_positioned_in_chain && self.parent_position != Position::Relative {
            return ClipStep::Skip;
        }
        ClipStep::Clip
    }
}

/// Walk state carried from child to parent
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipChain {
    absolute_seen: bool,
}

impl ClipChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Has an absolutely positioned element been passed on the way up?
    pub fn absolute_seen(&self) -> bool {
        self.absolute_seen
    }

    /// Decide for `parent`, given the position of the child we came from
    /// (`None` when the child is not an element).
    pub fn step(&mut self, child_position: Option<Position>, parent: &ComputedStyle) -> ClipStep {
        if child_position == Some(Position::Absolute) {
            self.absolute_seen = true;
        }

        ClipState {
            parent_overflow_visible: parent.is_overflow_visible(),
            parent_position: parent.position,
            absolutely_positioned_in_chain: self.absolute_seen,
        }
        .step()
    }
}
