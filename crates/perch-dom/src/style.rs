//! Computed style
//!
//! The subset of `getComputedStyle()` that geometry queries read. Border
//! widths stay raw CSS strings; interpreting them is up to the consumer.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keyword parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {property} keyword: {value:?}")]
pub struct StyleParseError {
    pub property: &'static str,
    pub value: String,
}

/// CSS `position`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl FromStr for Position {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "relative" => Ok(Self::Relative),
            "absolute" => Ok(Self::Absolute),
            "fixed" => Ok(Self::Fixed),
            "sticky" => Ok(Self::Sticky),
            _ => Err(StyleParseError { property: "position", value: s.to_string() }),
        }
    }
}

/// CSS `overflow-x` / `overflow-y`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    /// `auto` and `scroll` make a scroll container with scrollbars
    pub fn is_scrollable(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

impl FromStr for Overflow {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visible" => Ok(Self::Visible),
            "hidden" => Ok(Self::Hidden),
            "clip" => Ok(Self::Clip),
            "scroll" => Ok(Self::Scroll),
            "auto" => Ok(Self::Auto),
            _ => Err(StyleParseError { property: "overflow", value: s.to_string() }),
        }
    }
}

/// CSS `direction`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl FromStr for Direction {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(StyleParseError { property: "direction", value: s.to_string() }),
        }
    }
}

/// Computed style of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub position: Position,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub direction: Direction,
    pub border_top_width: String,
    pub border_right_width: String,
    pub border_bottom_width: String,
    pub border_left_width: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            position: Position::Static,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            direction: Direction::Ltr,
            border_top_width: "0px".to_string(),
            border_right_width: "0px".to_string(),
            border_bottom_width: "0px".to_string(),
            border_left_width: "0px".to_string(),
        }
    }
}

impl ComputedStyle {
    /// The `overflow` shorthand computes to `visible` only when both axes are
    #[inline]
    pub fn is_overflow_visible(&self) -> bool {
        self.overflow_x == Overflow::Visible && self.overflow_y == Overflow::Visible
    }

    /// Anything but `static` establishes a containing block for `absolute`
    #[inline]
    pub fn is_positioned(&self) -> bool {
        self.position != Position::Static
    }

    /// Set both overflow axes
    pub fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow_x = overflow;
        self.overflow_y = overflow;
    }

    /// Set all four border widths to the same raw value
    pub fn set_border_width(&mut self, value: &str) {
        self.border_top_width = value.to_string();
        self.border_right_width = value.to_string();
        self.border_bottom_width = value.to_string();
        self.border_left_width = value.to_string();
    }
}
