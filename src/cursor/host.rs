//! Host capability checks and idempotent marker mounting.

use super::geometry::XY;
use super::session::{CursorSession, MarkerSink};
use crate::config::CursorConfig;
use crate::error::PortfolioResult;

/// Read-only facts about the device, queried once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostCapabilities {
    /// `(pointer: coarse)` matched.
    pub coarse_pointer: bool,
    /// The window exposes `ontouchstart`.
    pub touch_events: bool,
    /// `(prefers-reduced-motion: reduce)` matched.
    pub reduced_motion: bool,
    /// Viewport size in CSS pixels.
    pub viewport: XY<f64>,
}

impl HostCapabilities {
    /// Touch-primary devices get no custom cursor at all.
    pub fn is_touch_primary(&self) -> bool {
        self.coarse_pointer || self.touch_events
    }
}

/// The page as seen by the cursor at startup.
pub trait CursorPage {
    type Marker: MarkerSink;

    fn capabilities(&self) -> HostCapabilities;

    /// Marker already present in the page, if any.
    fn find_marker(&self, id: &str) -> Option<Self::Marker>;

    /// Create the marker and attach it to the page.
    fn create_marker(&self, id: &str) -> PortfolioResult<Self::Marker>;

    /// Host clock in milliseconds.
    fn now_ms(&self) -> f64;
}

/// A marker plus the session that drives it.
pub struct MountedCursor<M> {
    pub marker: M,
    pub session: CursorSession,
    /// The marker was found in the page rather than created.
    pub reused: bool,
    pub capabilities: HostCapabilities,
}

/// Prepare the cursor for `page`.
///
/// Returns `Ok(None)` on touch-primary devices, before anything is created.
/// Otherwise the marker is found or created, parked hidden at the viewport
/// center, and the idle window is started.
pub fn mount<P: CursorPage>(
    page: &P,
    config: &CursorConfig,
) -> PortfolioResult<Option<MountedCursor<P::Marker>>> {
    let capabilities = page.capabilities();
    if capabilities.is_touch_primary() {
        log::info!("[Cursor] Touch-primary device, custom cursor disabled");
        return Ok(None);
    }

    let (marker, reused) = match page.find_marker(&config.marker_id) {
        Some(marker) => (marker, true),
        None => (page.create_marker(&config.marker_id)?, false),
    };

    let smoothing = config.smoothing_for(capabilities.reduced_motion);
    let mut session = CursorSession::new(
        XY::center_of(capabilities.viewport),
        smoothing,
        config.idle_delay_ms,
    );
    session.arm_idle(page.now_ms());
    session.render_position(&marker);
    session.sync_state(&marker);

    log::debug!(
        "[Cursor] Mounted marker #{} (reused: {}, smoothing: {}, reduced motion: {})",
        config.marker_id,
        reused,
        smoothing,
        capabilities.reduced_motion
    );

    Ok(Some(MountedCursor {
        marker,
        session,
        reused,
        capabilities,
    }))
}
