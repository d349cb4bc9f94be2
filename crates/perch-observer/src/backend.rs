//! Resize observer backends

use perch_dom::{Document, NodeId};

use crate::entry::{ResizeObserverEntry, ResizeObserverSize};

/// Sizes closer than this are considered unchanged
const SIZE_EPSILON: f64 = 0.01;

/// The platform side of resize observation
///
/// Backends that get notified by the platform push entries into
/// `ResizeObserverRegistry::deliver` and return nothing from `take_entries`.
pub trait ResizeObserverBackend {
    /// Start watching an element
    fn observe(&mut self, target: NodeId);

    /// Stop watching an element
    fn unobserve(&mut self, target: NodeId);

    /// Entries for elements whose size changed since the last call
    fn take_entries(&mut self, document: &Document) -> Vec<ResizeObserverEntry>;
}

#[derive(Debug)]
struct ObservedElement {
    target: NodeId,
    last_size: Option<(f64, f64)>,
}

/// Backend that compares border box sizes between calls
///
/// Reports every element the first time it is measured and then whenever
/// its width or height changes. Elements without geometry (text nodes,
/// detached or unknown ids) are not reported.
#[derive(Debug, Default)]
pub struct PollingResizeBackend {
    observed: Vec<ObservedElement>,
}

impl PollingResizeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observed elements
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

impl ResizeObserverBackend for PollingResizeBackend {
    fn observe(&mut self, target: NodeId) {
        if self.observed.iter().any(|o| o.target == target) {
            return;
        }
        self.observed.push(ObservedElement { target, last_size: None });
    }

    fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|o| o.target != target);
    }

    fn take_entries(&mut self, document: &Document) -> Vec<ResizeObserverEntry> {
        let mut entries = Vec::new();

        for observed in &mut self.observed {
            if !document.is_connected(observed.target) {
                continue;
            }
            let Some(geometry) = document.tree().geometry(observed.target) else {
                continue;
            };

            let width = geometry.bounding_client_rect.width;
            let height = geometry.bounding_client_rect.height;
            let changed = match observed.last_size {
                Some((last_width, last_height)) => {
                    (last_width - width).abs() > SIZE_EPSILON
                        || (last_height - height).abs() > SIZE_EPSILON
                }
                None => true,
            };
            if !changed {
                continue;
            }

            observed.last_size = Some((width, height));
            entries.push(ResizeObserverEntry::new(
                observed.target,
                ResizeObserverSize::new(geometry.client_width, geometry.client_height),
                ResizeObserverSize::new(width, height),
            ));
        }

        entries
    }
}
