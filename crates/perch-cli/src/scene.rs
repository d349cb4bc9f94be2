//! Scene files
//!
//! A scene is a measured page (window plus a flat list of nodes), one
//! positioning request and an optional list of frames that change the
//! layout afterwards. Nodes are named; `html` and `body` always exist.

use std::collections::{BTreeMap, HashMap};

use perch_dom::{ComputedStyle, DOMRect, Document, DomError, NodeId, Window};
use perch_geometry::{OptimalPositionOptions, Preset, UnknownPresetError, ViewportOffsetConfig};
use serde::Deserialize;

/// Scene loading error
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Unknown node: {0:?}")]
    UnknownNode(String),
    #[error("Duplicate node id: {0:?}")]
    DuplicateNode(String),
    #[error("Scene has no positions")]
    NoPositions,
    #[error(transparent)]
    Preset(#[from] UnknownPresetError),
    #[error("Cannot attach node {id:?}: {source}")]
    Dom {
        id: String,
        #[source]
        source: DomError,
    },
}

/// One node of the page
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneNode {
    pub id: String,
    /// Parent node id, `body` when omitted
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Border box in viewport coordinates
    #[serde(default)]
    pub rect: DOMRect,
    #[serde(default)]
    pub style: ComputedStyle,
    /// Inner size without borders and scrollbars, `rect` size when omitted
    #[serde(default)]
    pub client_width: Option<f64>,
    #[serde(default)]
    pub client_height: Option<f64>,
    #[serde(default)]
    pub scroll_left: f64,
    #[serde(default)]
    pub scroll_top: f64,
}

fn default_tag() -> String {
    "div".to_string()
}

/// Layout change applied after the first run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Frame {
    pub window: Option<Window>,
    /// New border boxes by node id
    pub rects: BTreeMap<String, DOMRect>,
}

/// Scene file contents
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub window: Window,
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
    /// Node to position
    pub element: String,
    /// Node to attach to
    pub target: String,
    #[serde(default)]
    pub limiter: Option<String>,
    /// Preset names in order of preference
    pub positions: Vec<String>,
    #[serde(default)]
    pub fit_in_viewport: bool,
    #[serde(default)]
    pub viewport_offset: ViewportOffsetConfig,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Scene {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build the document and resolve node names
    pub fn build(&self) -> Result<Stage, SceneError> {
        let mut document = Document::new(self.window);
        let mut ids = HashMap::from([
            ("html".to_string(), document.document_element()),
            ("body".to_string(), document.body()),
        ]);

        for node in &self.nodes {
            if ids.contains_key(&node.id) {
                return Err(SceneError::DuplicateNode(node.id.clone()));
            }
            let parent = match &node.parent {
                Some(parent) => lookup(&ids, parent)?,
                None => document.body(),
            };
            let id = document
                .append_element(parent, &node.tag)
                .map_err(|source| SceneError::Dom { id: node.id.clone(), source })?;

            document.set_rect(id, node.rect);
            if let Some(style) = document.tree_mut().style_mut(id) {
                *style = node.style.clone();
            }
            if let Some(geometry) = document.tree_mut().geometry_mut(id) {
                geometry.client_width = node.client_width.unwrap_or(node.rect.width);
                geometry.client_height = node.client_height.unwrap_or(node.rect.height);
                geometry.scroll_left = node.scroll_left;
                geometry.scroll_top = node.scroll_top;
            }
            ids.insert(node.id.clone(), id);
        }

        tracing::debug!("Built scene with {} nodes", self.nodes.len());

        Ok(Stage {
            element: lookup(&ids, &self.element)?,
            target: lookup(&ids, &self.target)?,
            limiter: self.limiter.as_deref().map(|name| lookup(&ids, name)).transpose()?,
            presets: self.presets()?,
            document,
            ids,
        })
    }

    fn presets(&self) -> Result<Vec<Preset>, SceneError> {
        if self.positions.is_empty() {
            return Err(SceneError::NoPositions);
        }
        let presets = self
            .positions
            .iter()
            .map(|name| name.parse::<Preset>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(presets)
    }
}

fn lookup(ids: &HashMap<String, NodeId>, name: &str) -> Result<NodeId, SceneError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| SceneError::UnknownNode(name.to_string()))
}

/// A scene turned into a live document
#[derive(Debug)]
pub struct Stage {
    pub document: Document,
    pub element: NodeId,
    pub target: NodeId,
    pub limiter: Option<NodeId>,
    pub presets: Vec<Preset>,
    ids: HashMap<String, NodeId>,
}

impl Stage {
    /// Positioning request for the current layout
    pub fn options(&self, scene: &Scene) -> OptimalPositionOptions {
        let mut options = OptimalPositionOptions::new(self.element, self.target)
            .positions(self.presets.iter().map(|preset| preset.function()))
            .fit_in_viewport(scene.fit_in_viewport)
            .viewport_offset_config(scene.viewport_offset);
        if let Some(limiter) = self.limiter {
            options = options.limiter(limiter);
        }
        options
    }

    /// Apply a frame's changes to the document
    pub fn apply(&mut self, frame: &Frame) -> Result<(), SceneError> {
        if let Some(window) = frame.window {
            self.document.set_window(window);
        }
        for (name, rect) in &frame.rects {
            let id = lookup(&self.ids, name)?;
            self.document.set_rect(id, *rect);
        }
        Ok(())
    }
}
