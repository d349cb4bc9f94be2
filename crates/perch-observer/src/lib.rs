//! Perch Observer - Resize observation
//!
//! One backend observer is shared by every consumer. Consumers register a
//! callback per element through [`ResizeObserverRegistry::observe`] and get
//! a [`ResizeObserver`] guard back; dropping or destroying the guard
//! releases the registration.
//!
//! ```ignore
//! let registry = ResizeObserverRegistry::polling();
//! let observer = registry.observe(panel, |entry| reposition(entry.target));
//!
//! // After every layout:
//! registry.poll(&document);
//!
//! observer.destroy();
//! ```

mod backend;
mod entry;
mod registry;

pub use backend::{PollingResizeBackend, ResizeObserverBackend};
pub use entry::{ResizeObserverEntry, ResizeObserverSize};
pub use registry::{ResizeObserver, ResizeObserverRegistry};
