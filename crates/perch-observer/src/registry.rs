//! Resize observer registry
//!
//! Maps each observed element to the callbacks registered for it and owns
//! the single backend instance. The backend exists only while at least one
//! element is observed.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use perch_dom::{Document, NodeId};

use crate::backend::{PollingResizeBackend, ResizeObserverBackend};
use crate::entry::ResizeObserverEntry;

type Callback = Rc<dyn Fn(&ResizeObserverEntry)>;
type BackendFactory = Box<dyn Fn() -> Box<dyn ResizeObserverBackend>>;

struct Registration {
    id: u64,
    callback: Callback,
}

struct RegistryState {
    factory: BackendFactory,
    backend: Option<Box<dyn ResizeObserverBackend>>,
    /// Registrations per element, in registration order
    elements: HashMap<NodeId, Vec<Registration>>,
    next_id: u64,
}

impl RegistryState {
    fn is_registered(&self, element: NodeId, id: u64) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|registrations| registrations.iter().any(|r| r.id == id))
    }

    /// Take one registration out, tearing down the backend after the last
    ///
    /// The removed registration is handed back so its callback is dropped
    /// after the state is released.
    fn remove(&mut self, element: NodeId, id: u64) -> Option<Registration> {
        let registrations = self.elements.get_mut(&element)?;
        let index = registrations.iter().position(|r| r.id == id)?;
        let removed = registrations.remove(index);
        if !registrations.is_empty() {
            return Some(removed);
        }

        self.elements.remove(&element);
        if let Some(backend) = self.backend.as_mut() {
            backend.unobserve(element);
            tracing::trace!("Stopped observing {:?}", element);
        }
        if self.elements.is_empty() && self.backend.take().is_some() {
            tracing::debug!("Last element unobserved, dropping resize backend");
        }
        Some(removed)
    }
}

/// Shared resize observation registry
///
/// Clones share the same state.
#[derive(Clone)]
pub struct ResizeObserverRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl ResizeObserverRegistry {
    /// Registry creating its backend with `factory` whenever one is needed
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn ResizeObserverBackend> + 'static,
    {
        Self {
            state: Rc::new(RefCell::new(RegistryState {
                factory: Box::new(factory),
                backend: None,
                elements: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Registry backed by [`PollingResizeBackend`]
    pub fn polling() -> Self {
        Self::new(|| Box::new(PollingResizeBackend::new()))
    }

    /// Call `callback` whenever `element` is resized
    ///
    /// Registrations are additive: observing the same element twice keeps
    /// both callbacks.
    pub fn observe<F>(&self, element: NodeId, callback: F) -> ResizeObserver
    where
        F: Fn(&ResizeObserverEntry) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;

        if state.backend.is_none() {
            tracing::debug!("Creating resize backend");
            let backend = (state.factory)();
            state.backend = Some(backend);
        }

        let first = !state.elements.contains_key(&element);
        state
            .elements
            .entry(element)
            .or_default()
            .push(Registration { id, callback: Rc::new(callback) });

        if first {
            if let Some(backend) = state.backend.as_mut() {
                backend.observe(element);
            }
            tracing::trace!("Observing {:?}", element);
        }

        ResizeObserver {
            registry: Rc::downgrade(&self.state),
            element,
            id,
            destroyed: Cell::new(false),
        }
    }

    /// Check if a backend instance currently exists
    pub fn has_backend(&self) -> bool {
        self.state.borrow().backend.is_some()
    }

    /// Check if any callback is registered for `element`
    pub fn is_observing(&self, element: NodeId) -> bool {
        self.state.borrow().elements.contains_key(&element)
    }

    /// Number of live registrations for `element`
    pub fn registration_count(&self, element: NodeId) -> usize {
        self.state
            .borrow()
            .elements
            .get(&element)
            .map_or(0, Vec::len)
    }

    /// Number of observed elements
    pub fn observed_len(&self) -> usize {
        self.state.borrow().elements.len()
    }

    /// Invoke the callbacks registered for each entry's target
    ///
    /// Callbacks run without the registry borrowed, so they may observe or
    /// destroy. A registration destroyed during delivery is not called
    /// afterwards.
    pub fn deliver(&self, entries: &[ResizeObserverEntry]) {
        for entry in entries {
            let callbacks: Vec<(u64, Callback)> = {
                let state = self.state.borrow();
                match state.elements.get(&entry.target) {
                    Some(registrations) => registrations
                        .iter()
                        .map(|r| (r.id, Rc::clone(&r.callback)))
                        .collect(),
                    None => continue,
                }
            };

            for (id, callback) in callbacks {
                if self.state.borrow().is_registered(entry.target, id) {
                    callback(entry);
                }
            }
        }
    }

    /// Collect pending entries from the backend and deliver them
    ///
    /// Returns the number of entries delivered.
    pub fn poll(&self, document: &Document) -> usize {
        let entries = match self.state.borrow_mut().backend.as_mut() {
            Some(backend) => backend.take_entries(document),
            None => return 0,
        };
        if !entries.is_empty() {
            tracing::trace!("Delivering {} resize entries", entries.len());
        }
        self.deliver(&entries);
        entries.len()
    }
}

impl fmt::Debug for ResizeObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ResizeObserverRegistry")
            .field("observed", &state.elements.len())
            .field("has_backend", &state.backend.is_some())
            .finish()
    }
}

/// Handle to one registration
///
/// Dropping the handle releases the registration.
#[must_use = "dropping the handle stops observing"]
pub struct ResizeObserver {
    registry: Weak<RefCell<RegistryState>>,
    element: NodeId,
    id: u64,
    destroyed: Cell<bool>,
}

impl ResizeObserver {
    /// The observed element
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Check if `destroy` already ran
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Release the registration
    ///
    /// Safe to call repeatedly, and from inside a resize callback.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(state) = self.registry.upgrade() {
            let removed = state.borrow_mut().remove(self.element, self.id);
            drop(removed);
        }
    }
}

impl Drop for ResizeObserver {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for ResizeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeObserver")
            .field("element", &self.element)
            .field("id", &self.id)
            .field("destroyed", &self.destroyed.get())
            .finish()
    }
}
