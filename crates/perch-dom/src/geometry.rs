//! Measured element geometry
//!
//! What a layout pass reports for an element: its border box in viewport
//! coordinates plus the `offset*`, `client*` and `scroll*` metrics.

use serde::{Deserialize, Serialize};

/// Rectangle in viewport coordinates, as `getBoundingClientRect()` reports it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Layout metrics of one element
///
/// Offset sizes include borders and scrollbars; client sizes exclude both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementGeometry {
    /// Border box relative to the viewport
    pub bounding_client_rect: DOMRect,

    pub offset_width: f64,
    pub offset_height: f64,

    // Padding box without scrollbars
    pub client_top: f64,
    pub client_left: f64,
    pub client_width: f64,
    pub client_height: f64,

    // Scroll container state
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

impl ElementGeometry {
    /// Metrics of a box with no borders, scrollbars or overflow
    pub fn from_rect(rect: DOMRect) -> Self {
        Self {
            bounding_client_rect: rect,
            offset_width: rect.width,
            offset_height: rect.height,
            client_width: rect.width,
            client_height: rect.height,
            scroll_width: rect.width,
            scroll_height: rect.height,
            ..Self::default()
        }
    }

    /// Same box chrome around a new border box
    ///
    /// The border and scrollbar space (`offset - client`) and the scroll
    /// state carry over; client sizes follow the new rect.
    pub fn with_rect(&self, rect: DOMRect) -> Self {
        let chrome_width = (self.offset_width - self.client_width).max(0.0);
        let chrome_height = (self.offset_height - self.client_height).max(0.0);
        let client_width = (rect.width - chrome_width).max(0.0);
        let client_height = (rect.height - chrome_height).max(0.0);

        Self {
            bounding_client_rect: rect,
            offset_width: rect.width,
            offset_height: rect.height,
            client_top: self.client_top,
            client_left: self.client_left,
            client_width,
            client_height,
            scroll_top: self.scroll_top,
            scroll_left: self.scroll_left,
            scroll_width: self.scroll_width.max(client_width),
            scroll_height: self.scroll_height.max(client_height),
        }
    }
}
