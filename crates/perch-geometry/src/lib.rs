//! Perch Geometry
//!
//! Geometry helpers for placing floating UI (balloons, dropdowns, menus)
//! next to content in a DOM snapshot:
//! - `Rect`: axis-aligned rectangle with intersection, visibility clipping
//!   and conversion to `position: absolute` coordinates
//! - ancestor queries (positioned ancestor, scrollable ancestors)
//! - border width parsing
//! - `get_optimal_position`: picks the best of several candidate placements
//!   under limiter and viewport constraints
//!
//! # Example
//! ```rust,ignore
//! use perch_geometry::{get_optimal_position, OptimalPositionOptions, Preset};
//!
//! let options = OptimalPositionOptions::new(balloon, editable)
//!     .positions(Preset::ALL.iter().map(|p| p.function()))
//!     .fit_in_viewport(true);
//! if let Some(position) = get_optimal_position(&document, options) {
//!     println!("{} at {},{}", position.name, position.left, position.top);
//! }
//! ```

mod rect;
mod clipping;
mod ancestors;
mod border_widths;
mod position;
pub mod presets;

pub use rect::{Rect, RectData, RectSource, RectSourceHandle};
pub use clipping::{ClipChain, ClipState, ClipStep};
pub use ancestors::{
    get_positioned_ancestor, find_closest_scrollable_ancestor, get_scrollable_ancestors,
    ScrollableAncestor,
};
pub use border_widths::{get_border_widths, parse_css_int, BorderWidths, LengthParseError};
pub use position::{
    get_optimal_position, Anchor, OptimalPosition, OptimalPositionOptions,
    PositioningFunction, PositioningFunctionResult, ViewportOffsetConfig,
};
pub use presets::{Preset, UnknownPresetError};
