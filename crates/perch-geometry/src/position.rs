//! Optimal positioning
//!
//! Given an element to place, a target to attach it to and an ordered list
//! of candidate placements, pick the placement that keeps the element
//! inside the limiter and the viewport as much as possible, and return it in
//! `position: absolute` coordinates.

use std::fmt;

use perch_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::ancestors::get_positioned_ancestor;
use crate::rect::{Rect, RectData, RectSource};

/// Output of a positioning function, in viewport coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PositioningFunctionResult<C = ()> {
    pub top: f64,
    pub left: f64,
    pub name: String,
    pub config: Option<C>,
}

impl<C> PositioningFunctionResult<C> {
    pub fn new(name: impl Into<String>, top: f64, left: f64) -> Self {
        Self {
            top,
            left,
            name: name.into(),
            config: None,
        }
    }

    /// Attach caller data that is handed back with the chosen position
    pub fn with_config(mut self, config: C) -> Self {
        self.config = Some(config);
        self
    }
}

/// Candidate placement: `(target, element, viewport, limiter)` to a
/// position, or `None` to sit this query out
pub type PositioningFunction<C = ()> =
    dyn Fn(&Rect, &Rect, &Rect, Option<&Rect>) -> Option<PositioningFunctionResult<C>>;

/// A rect source given directly or computed on demand
///
/// Lazy anchors are resolved exactly once per query.
pub enum Anchor {
    Direct(RectSource),
    Lazy(Box<dyn FnOnce() -> RectSource>),
}

impl Anchor {
    pub fn lazy(f: impl FnOnce() -> RectSource + 'static) -> Self {
        Self::Lazy(Box::new(f))
    }

    pub fn resolve(self) -> RectSource {
        match self {
            Self::Direct(source) => source,
            Self::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(source) => f.debug_tuple("Direct").field(source).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<RectSource> for Anchor {
    fn from(source: RectSource) -> Self {
        Self::Direct(source)
    }
}

impl From<NodeId> for Anchor {
    fn from(id: NodeId) -> Self {
        Self::Direct(RectSource::Element(id))
    }
}

impl From<Rect> for Anchor {
    fn from(rect: Rect) -> Self {
        Self::Direct(RectSource::Rect(rect))
    }
}

impl From<RectData> for Anchor {
    fn from(data: RectData) -> Self {
        Self::Direct(RectSource::Data(data))
    }
}

/// Pixel insets that shrink the usable viewport, e.g. for a sticky header
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOffsetConfig {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Arguments of `get_optimal_position`
pub struct OptimalPositionOptions<C = ()> {
    /// Element to be positioned
    pub element: NodeId,
    /// What the element is attached to
    pub target: Anchor,
    /// Candidates in order of preference
    pub positions: Vec<Box<PositioningFunction<C>>>,
    /// Area the element should preferably stay in
    pub limiter: Option<Anchor>,
    /// Prefer positions inside the viewport
    pub fit_in_viewport: bool,
    pub viewport_offset_config: ViewportOffsetConfig,
}

impl<C> OptimalPositionOptions<C> {
    pub fn new(element: NodeId, target: impl Into<Anchor>) -> Self {
        Self {
            element,
            target: target.into(),
            positions: Vec::new(),
            limiter: None,
            fit_in_viewport: false,
            viewport_offset_config: ViewportOffsetConfig::default(),
        }
    }

    /// Append one candidate
    pub fn position<F>(mut self, f: F) -> Self
    where
        F: Fn(&Rect, &Rect, &Rect, Option<&Rect>) -> Option<PositioningFunctionResult<C>> + 'static,
    {
        self.positions.push(Box::new(f));
        self
    }

    /// Append boxed candidates
    pub fn positions(
        mut self,
        positions: impl IntoIterator<Item = Box<PositioningFunction<C>>>,
    ) -> Self {
        self.positions.extend(positions);
        self
    }

    pub fn limiter(mut self, limiter: impl Into<Anchor>) -> Self {
        self.limiter = Some(limiter.into());
        self
    }

    pub fn fit_in_viewport(mut self, fit: bool) -> Self {
        self.fit_in_viewport = fit;
        self
    }

    pub fn viewport_offset_config(mut self, config: ViewportOffsetConfig) -> Self {
        self.viewport_offset_config = config;
        self
    }
}

impl<C> fmt::Debug for OptimalPositionOptions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimalPositionOptions")
            .field("element", &self.element)
            .field("target", &self.target)
            .field("positions", &self.positions.len())
            .field("limiter", &self.limiter)
            .field("fit_in_viewport", &self.fit_in_viewport)
            .field("viewport_offset_config", &self.viewport_offset_config)
            .finish()
    }
}

/// The chosen position, in `position: absolute` coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalPosition<C = ()> {
    pub left: f64,
    pub top: f64,
    pub name: String,
    pub config: Option<C>,
}

/// Rects every candidate is evaluated against
#[derive(Debug)]
struct PlacementContext {
    target_rect: Rect,
    element_rect: Rect,
    viewport_rect: Rect,
    limiter_rect: Option<Rect>,
}

/// One candidate placed in the viewport
#[derive(Debug)]
struct Candidate<C> {
    name: String,
    config: Option<C>,
    rect: Rect,
}

impl<C> Candidate<C> {
    fn new(function: &PositioningFunction<C>, ctx: &PlacementContext) -> Option<Self> {
        let result = function(
            &ctx.target_rect,
            &ctx.element_rect,
            &ctx.viewport_rect,
            ctx.limiter_rect.as_ref(),
        )?;
        // A nameless result is an opt-out too.
        if result.name.is_empty() {
            return None;
        }

        let mut rect = ctx.element_rect.clone();
        rect.move_to(result.left, result.top);

        Some(Self {
            name: result.name,
            config: result.config,
            rect,
        })
    }

    fn limiter_intersection_area(&self, ctx: &PlacementContext) -> f64 {
        ctx.limiter_rect
            .as_ref()
            .map_or(0.0, |limiter| limiter.get_intersection_area(&self.rect))
    }

    fn viewport_intersection_area(&self, ctx: &PlacementContext) -> f64 {
        ctx.viewport_rect.get_intersection_area(&self.rect)
    }

    fn into_optimal(
        self,
        document: &Document,
        positioned_ancestor: Option<NodeId>,
    ) -> OptimalPosition<C> {
        let absolute = self.rect.to_absolute_rect_within(document, positioned_ancestor);
        OptimalPosition {
            left: absolute.left,
            top: absolute.top,
            name: self.name,
            config: self.config,
        }
    }
}

/// Pick the best placement for `options.element`
///
/// Returns `None` when the target is off-screen or fully clipped, when no
/// candidate takes part, or when every candidate lies completely outside
/// both the limiter and the viewport.
pub fn get_optimal_position<C>(
    document: &Document,
    options: OptimalPositionOptions<C>,
) -> Option<OptimalPosition<C>> {
    let OptimalPositionOptions {
        element,
        target,
        positions,
        limiter,
        fit_in_viewport,
        viewport_offset_config,
    } = options;

    let target = target.resolve();
    let limiter = limiter.map(Anchor::resolve);

    let positioned_ancestor = get_positioned_ancestor(document, element);
    let viewport_rect = constrained_viewport_rect(document, &viewport_offset_config);
    let element_rect = Rect::new(document, RectSource::Element(element));

    let Some(target_rect) = visible_viewport_intersection_rect(document, target, &viewport_rect)
    else {
        tracing::debug!("Target of {:?} is not visible in the viewport", element);
        return None;
    };

    let mut ctx = PlacementContext {
        target_rect,
        element_rect,
        viewport_rect,
        limiter_rect: None,
    };

    let best = if limiter.is_none() && !fit_in_viewport {
        let first = positions.first()?;
        Candidate::new(first.as_ref(), &ctx)
    } else {
        if let Some(limiter) = limiter {
            ctx.limiter_rect =
                visible_viewport_intersection_rect(document, limiter, &ctx.viewport_rect);
            if ctx.limiter_rect.is_none() {
                tracing::trace!("Limiter is not visible, positioning without it");
            }
        }
        best_candidate(&positions, &ctx)
    };

    let Some(best) = best else {
        tracing::debug!("No position found for {:?}", element);
        return None;
    };

    tracing::trace!("Chose position {:?} for {:?}", best.name, element);
    Some(best.into_optimal(document, positioned_ancestor))
}

fn best_candidate<C>(
    positions: &[Box<PositioningFunction<C>>],
    ctx: &PlacementContext,
) -> Option<Candidate<C>> {
    let element_area = ctx.element_rect.get_area();
    let mut max_fit_factor = 0.0;
    let mut best = None;

    for function in positions {
        let Some(candidate) = Candidate::new(function.as_ref(), ctx) else {
            continue;
        };

        let limiter_area = candidate.limiter_intersection_area(ctx);
        let viewport_area = candidate.viewport_intersection_area(ctx);

        // Entirely inside the limiter; nothing can beat that.
        if limiter_area == element_area {
            return Some(candidate);
        }

        // Squares favour candidates that do well against both constraints.
        let fit_factor = viewport_area.powi(2) + limiter_area.powi(2);
        tracing::trace!(
            "Position {:?}: limiter area {}, viewport area {}, fit {}",
            candidate.name,
            limiter_area,
            viewport_area,
            fit_factor
        );

        if fit_factor > max_fit_factor {
            max_fit_factor = fit_factor;
            best = Some(candidate);
        }
    }

    best
}

/// The window rect shrunk by the configured insets
fn constrained_viewport_rect(document: &Document, offsets: &ViewportOffsetConfig) -> Rect {
    let mut viewport = Rect::new(document, RectSource::Window);

    viewport.top += offsets.top;
    viewport.height -= offsets.top;
    viewport.bottom -= offsets.bottom;
    viewport.height -= offsets.bottom;

    viewport.left += offsets.left;
    viewport.width -= offsets.left;
    viewport.right -= offsets.right;
    viewport.width -= offsets.right;

    viewport
}

/// The visible part of `source` that is also inside the viewport
fn visible_viewport_intersection_rect(
    document: &Document,
    source: RectSource,
    viewport: &Rect,
) -> Option<Rect> {
    Rect::new(document, source)
        .get_visible(document)?
        .get_intersection(viewport)
}
