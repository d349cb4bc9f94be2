//! Window - viewport size and page scroll

use serde::{Deserialize, Serialize};

/// Browser window state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    /// Viewport width including the scrollbar
    pub inner_width: f64,
    /// Viewport height including the scrollbar
    pub inner_height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Window {
    pub fn new(inner_width: f64, inner_height: f64) -> Self {
        Self {
            inner_width,
            inner_height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Scroll the page to a position
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll_x = x;
        self.scroll_y = y;
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}
