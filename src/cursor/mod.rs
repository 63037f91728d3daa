//! Custom cursor subsystem.
//!
//! A single marker element follows the pointer with eased motion and shows
//! hover, press and idle states:
//!
//! - `geometry`: point type and interpolation
//! - `state`: visual flags and their class names
//! - `idle`: quiet-window debounce
//! - `hover`: selector matching and hovered-element tracking
//! - `session`: the per-page state owner and its handlers
//! - `host`: device checks and idempotent marker mounting
//! - `driver`: routes page events, mutation batches and timer fires
//! - `browser`: web-sys wiring (listeners, frames, mutation observer)

pub mod browser;
pub mod driver;
pub mod geometry;
pub mod host;
pub mod hover;
pub mod idle;
pub mod session;
pub mod state;


pub use driver::{install_once, CursorDriver, HoverEvent, MutationBatch};
pub use geometry::XY;
pub use host::{mount, CursorPage, HostCapabilities, MountedCursor};
pub use hover::{ElementId, HoverTracker, InteractiveElementSet, InteractiveNode, SelectorList};
pub use idle::IdleTimer;
pub use session::{CursorSession, MarkerSink};
pub use state::{CursorClass, VisualState};
