//! Rect - axis-aligned rectangle in viewport coordinates
//!
//! A `Rect` is plain geometry plus an optional handle to what it was
//! measured from. Intersection and area math never looks at the handle;
//! `get_visible`, `exclude_scrollbars_and_borders` and `to_absolute_rect`
//! use it to go back to the DOM snapshot for ancestors and styles.

use std::rc::Rc;

use perch_dom::{DOMRect, Direction, Document, NodeId, Position, Range};
use serde::{Deserialize, Serialize};

use crate::ancestors::get_positioned_ancestor;
use crate::border_widths::get_border_widths;
use crate::clipping::{ClipChain, ClipStep};

/// Plain rectangle data
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectData {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl RectData {
    /// Build from left/top and size
    pub fn from_xywh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            right: left + width,
            bottom: top + height,
            left,
            width,
            height,
        }
    }
}

impl From<DOMRect> for RectData {
    fn from(rect: DOMRect) -> Self {
        Self::from_xywh(rect.x, rect.y, rect.width, rect.height)
    }
}

/// What a rect was measured from
#[derive(Debug, Clone, PartialEq)]
pub enum RectSourceHandle {
    Element(NodeId),
    Range(Rc<Range>),
    Window,
}

/// Input accepted by `Rect::new`
#[derive(Debug, Clone, PartialEq)]
pub enum RectSource {
    /// An element's bounding client rect
    Element(NodeId),
    /// The bounding rect of a range's client rects
    Range(Rc<Range>),
    /// The whole viewport
    Window,
    /// A copy of another rect
    Rect(Rect),
    /// Plain numbers
    Data(RectData),
}

impl From<NodeId> for RectSource {
    fn from(id: NodeId) -> Self {
        Self::Element(id)
    }
}

impl From<Range> for RectSource {
    fn from(range: Range) -> Self {
        Self::Range(Rc::new(range))
    }
}

impl From<Rc<Range>> for RectSource {
    fn from(range: Rc<Range>) -> Self {
        Self::Range(range)
    }
}

impl From<Rect> for RectSource {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<RectData> for RectSource {
    fn from(data: RectData) -> Self {
        Self::Data(data)
    }
}

/// Rectangle with `top`, `right`, `bottom`, `left`, `width` and `height`
///
/// Mutated in place by `move_to`/`move_by`; clone first to keep the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    source: Option<RectSourceHandle>,
}

impl Rect {
    /// Measure a rect from the snapshot
    pub fn new(document: &Document, source: impl Into<RectSource>) -> Self {
        match source.into() {
            RectSource::Element(id) => {
                // Detached elements have no layout.
                let data = document
                    .bounding_client_rect(id)
                    .filter(|_| document.is_connected(id))
                    .map(RectData::from)
                    .unwrap_or_default();
                Self::with_source(data, Some(RectSourceHandle::Element(id)))
            }
            RectSource::Range(range) => {
                let rects = Self::get_dom_range_rects(document, &range);
                let data = Self::get_bounding_rect(rects)
                    .map(|r| r.to_data())
                    .unwrap_or_default();
                Self::with_source(data, Some(RectSourceHandle::Range(range)))
            }
            RectSource::Window => {
                let window = document.window();
                let data = RectData::from_xywh(0.0, 0.0, window.inner_width, window.inner_height);
                Self::with_source(data, Some(RectSourceHandle::Window))
            }
            RectSource::Rect(rect) => rect,
            RectSource::Data(data) => Self::from_data(data),
        }
    }

    /// Rect from plain numbers, without a source
    pub fn from_data(data: RectData) -> Self {
        Self::with_source(data, None)
    }

    fn with_source(data: RectData, source: Option<RectSourceHandle>) -> Self {
        Self {
            top: data.top,
            right: data.right,
            bottom: data.bottom,
            left: data.left,
            width: data.width,
            height: data.height,
            source,
        }
    }

    /// What this rect was measured from
    pub fn source(&self) -> Option<&RectSourceHandle> {
        self.source.as_ref()
    }

    /// The six numbers without the source
    pub fn to_data(&self) -> RectData {
        RectData {
            top: self.top,
            right: self.right,
            bottom: self.bottom,
            left: self.left,
            width: self.width,
            height: self.height,
        }
    }

    /// Move the top-left corner to `(x, y)`, keeping the size
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.top = y;
        self.right = x + self.width;
        self.bottom = y + self.height;
        self.left = x;
        self
    }

    /// Move by `(x, y)`, keeping the size
    pub fn move_by(&mut self, x: f64, y: f64) -> &mut Self {
        self.top += y;
        self.right += x;
        self.left += x;
        self.bottom += y;
        self
    }

    /// Overlapping region, carrying this rect's source
    ///
    /// Touching rects produce a zero-area intersection; `None` only when
    /// the overlap would have negative width or height.
    pub fn get_intersection(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        let left = self.left.max(other.left);
        let width = right - left;
        let height = bottom - top;

        if width < 0.0 || height < 0.0 {
            return None;
        }

        Some(Self::with_source(
            RectData { top, right, bottom, left, width, height },
            self.source.clone(),
        ))
    }

    /// Area of the overlap, `0` when there is none
    pub fn get_intersection_area(&self, other: &Rect) -> f64 {
        self.get_intersection(other).map_or(0.0, |r| r.get_area())
    }

    pub fn get_area(&self) -> f64 {
        self.width * self.height
    }

    /// Compare the six numbers (sources are ignored)
    pub fn is_equal(&self, other: &Rect) -> bool {
        self.to_data() == other.to_data()
    }

    /// Check if `other` lies entirely within this rect
    pub fn contains(&self, other: &Rect) -> bool {
        self.get_intersection(other)
            .is_some_and(|intersection| intersection.is_equal(other))
    }

    /// The part of this rect not clipped by ancestor `overflow`
    ///
    /// Walks the source's ancestors up to `<body>`. Returns `None` when an
    /// ancestor clips the rect away completely.
    pub fn get_visible(&self, document: &Document) -> Option<Rect> {
        let tree = document.tree();
        let mut visible = self.clone();

        let (mut child, mut parent) = match &self.source {
            Some(RectSourceHandle::Element(id)) => {
                if document.is_body(*id) {
                    return Some(visible);
                }
                (Some(*id), tree.parent(*id))
            }
            Some(RectSourceHandle::Range(range)) => (None, range.common_ancestor_container(tree)),
            Some(RectSourceHandle::Window) | None => return Some(visible),
        };

        let mut chain = ClipChain::new();

        while let Some(parent_id) = parent {
            if document.is_body(parent_id) {
                break;
            }
            let Some(parent_style) = tree.style(parent_id) else {
                if tree.is_text(parent_id) {
                    child = None;
                    parent = tree.parent(parent_id);
                    continue;
                }
                break;
            };

            let child_position: Option<Position> =
                child.and_then(|c| tree.style(c)).map(|s| s.position);

            if chain.step(child_position, parent_style) == ClipStep::Clip {
                let parent_rect = Rect::new(document, RectSource::Element(parent_id));
                match visible.get_intersection(&parent_rect) {
                    Some(intersection) => {
                        if intersection.get_area() < visible.get_area() {
                            visible = intersection;
                        }
                    }
                    None => {
                        tracing::trace!("Rect clipped away by {:?}", parent_id);
                        return None;
                    }
                }
            }

            child = Some(parent_id);
            parent = tree.parent(parent_id);
        }

        Some(visible)
    }

    /// Shrink to the area inside borders and scrollbars
    ///
    /// Only element and window sources can be measured; other rects are
    /// left untouched.
    pub fn exclude_scrollbars_and_borders(&mut self, document: &Document) -> &mut Self {
        let (scroll_bar_width, scroll_bar_height, direction) = match &self.source {
            Some(RectSourceHandle::Window) => {
                let window = document.window();
                let html = document.document_element();
                let Some(geometry) = document.tree().geometry(html) else {
                    return self;
                };
                let direction = document
                    .computed_style(html)
                    .map_or(Direction::Ltr, |s| s.direction);
                (
                    window.inner_width - geometry.client_width,
                    window.inner_height - geometry.client_height,
                    direction,
                )
            }
            Some(RectSourceHandle::Element(id)) => {
                let id = *id;
                let Some(element) = document.tree().element(id) else {
                    return self;
                };
                let borders = get_border_widths(document, id);
                let geometry = &element.geometry;

                self.left += borders.left;
                self.top += borders.top;
                self.right -= borders.right;
                self.bottom -= borders.bottom;
                self.width = self.right - self.left;
                self.height = self.bottom - self.top;

                (
                    geometry.offset_width - geometry.client_width - borders.left - borders.right,
                    geometry.offset_height - geometry.client_height - borders.top - borders.bottom,
                    element.style.direction,
                )
            }
            Some(RectSourceHandle::Range(_)) | None => return self,
        };

        self.width -= scroll_bar_width;
        match direction {
            Direction::Ltr => self.right -= scroll_bar_width,
            Direction::Rtl => self.left += scroll_bar_width,
        }

        self.height -= scroll_bar_height;
        self.bottom -= scroll_bar_height;

        self
    }

    /// Convert to the coordinate system of `position: absolute`
    ///
    /// Adds the page scroll and, for element sources with a positioned
    /// ancestor, re-bases onto that ancestor's padding box.
    pub fn to_absolute_rect(&self, document: &Document) -> Rect {
        let positioned_ancestor = match &self.source {
            Some(RectSourceHandle::Element(id)) => get_positioned_ancestor(document, *id),
            _ => None,
        };
        self.to_absolute_rect_within(document, positioned_ancestor)
    }

    pub(crate) fn to_absolute_rect_within(
        &self,
        document: &Document,
        positioned_ancestor: Option<NodeId>,
    ) -> Rect {
        let window = document.window();
        let mut absolute = self.clone();
        absolute.move_by(window.scroll_x, window.scroll_y);

        if let Some(ancestor) = positioned_ancestor {
            shift_to_compensate_positioned_ancestor(document, &mut absolute, ancestor);
        }

        absolute
    }

    /// One rect per line box of the range
    ///
    /// A range with no client rects (collapsed at some positions) gets a
    /// zero-width rect at the left edge of its start container.
    pub fn get_dom_range_rects(document: &Document, range: &Range) -> Vec<Rect> {
        let client_rects = range.client_rects();
        if !client_rects.is_empty() {
            return client_rects
                .iter()
                .map(|&r| Self::from_data(r.into()))
                .collect();
        }

        let tree = document.tree();
        let mut start_container = Some(range.start_container);
        if tree.is_text(range.start_container) {
            start_container = tree.parent(range.start_container);
        }

        let mut rect = Self::from_data(
            start_container
                .and_then(|id| document.bounding_client_rect(id))
                .map(RectData::from)
                .unwrap_or_default(),
        );
        rect.right = rect.left;
        rect.width = 0.0;

        vec![rect]
    }

    /// Smallest rect enclosing all `rects`, `None` for none
    pub fn get_bounding_rect<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<Rect>,
    {
        use std::borrow::Borrow;

        let mut data = RectData {
            top: f64::INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::NEG_INFINITY,
            left: f64::INFINITY,
            width: 0.0,
            height: 0.0,
        };
        let mut count = 0usize;

        for rect in rects {
            let rect: &Rect = rect.borrow();
            count += 1;
            data.left = data.left.min(rect.left);
            data.top = data.top.min(rect.top);
            data.right = data.right.max(rect.right);
            data.bottom = data.bottom.max(rect.bottom);
        }

        if count == 0 {
            return None;
        }

        data.width = data.right - data.left;
        data.height = data.bottom - data.top;

        Some(Self::from_data(data))
    }
}

impl From<RectData> for Rect {
    fn from(data: RectData) -> Self {
        Self::from_data(data)
    }
}

/// `position: absolute` is relative to the positioned ancestor's padding
/// box, which may itself be scrolled.
fn shift_to_compensate_positioned_ancestor(document: &Document, rect: &mut Rect, ancestor: NodeId) {
    let window = document.window();
    let mut ancestor_rect = Rect::new(document, RectSource::Element(ancestor));
    ancestor_rect.move_by(window.scroll_x, window.scroll_y);
    let borders = get_border_widths(document, ancestor);
    let (scroll_left, scroll_top) = document
        .tree()
        .geometry(ancestor)
        .map_or((0.0, 0.0), |g| (g.scroll_left, g.scroll_top));

    let move_x = -ancestor_rect.left + scroll_left - borders.left;
    let move_y = -ancestor_rect.top + scroll_top - borders.top;

    rect.move_by(move_x, move_y);
}
