//! Cursor session: the single owner of pointer target, rendered position
//! and visual flags for one page.
//!
//! Every input is a small synchronous handler. The animation loop calls
//! [`CursorSession::render_frame`] once per display frame; nothing else
//! touches the rendered position.

use super::geometry::XY;
use super::hover::{ElementId, HoverTracker};
use super::idle::IdleTimer;
use super::state::{CursorClass, VisualState};

/// Where the session writes its output. The browser implementation is the
/// marker `HtmlElement`.
pub trait MarkerSink {
    fn set_transform(&self, transform: &str);
    fn set_opacity(&self, opacity: &str);
    fn set_class(&self, class: CursorClass, on: bool);
}

#[derive(Debug, Clone)]
pub struct CursorSession {
    target: XY<f64>,
    position: XY<f64>,
    smoothing: f64,
    state: VisualState,
    hover: HoverTracker,
    idle: IdleTimer,
    /// Flags as last written to the marker; `None` until the first sync.
    rendered: Option<VisualState>,
    frames: u64,
}

impl CursorSession {
    /// New hidden session resting at `start`.
    ///
    /// `smoothing` is expected in (0, 1]; see `CursorConfig::validate`.
    pub fn new(start: XY<f64>, smoothing: f64, idle_delay_ms: u32) -> Self {
        Self {
            target: start,
            position: start,
            smoothing,
            state: VisualState::default(),
            hover: HoverTracker::default(),
            idle: IdleTimer::new(idle_delay_ms),
            rendered: None,
            frames: 0,
        }
    }

    pub fn target(&self) -> XY<f64> {
        self.target
    }

    pub fn position(&self) -> XY<f64> {
        self.position
    }

    pub fn state(&self) -> VisualState {
        self.state
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn idle_delay_ms(&self) -> f64 {
        self.idle.delay_ms()
    }

    // ------------------------------------------------------------------
    // Input handlers
    // ------------------------------------------------------------------

    /// Pointer moved. Only the latest target is kept.
    pub fn pointer_move(&mut self, at: XY<f64>, now_ms: f64) {
        self.target = at;
        self.state.visible = true;
        self.state.idle = false;
        self.idle.rearm(now_ms);
    }

    /// Pointer left the page surface.
    pub fn pointer_leave_viewport(&mut self) {
        self.state.visible = false;
        self.hover.reset_pointer();
        self.state.hovering = self.hover.is_hovering();
    }

    pub fn press(&mut self) {
        self.state.pressed = true;
    }

    /// Released anywhere, not necessarily over the pressed element.
    pub fn release(&mut self) {
        self.state.pressed = false;
    }

    pub fn element_enter(&mut self, id: ElementId) {
        self.hover.pointer_enter(id);
        self.state.hovering = self.hover.is_hovering();
    }

    pub fn element_leave(&mut self, id: ElementId) {
        self.hover.pointer_leave(id);
        self.state.hovering = self.hover.is_hovering();
    }

    pub fn element_focus(&mut self, id: ElementId) {
        self.hover.focus(id);
        self.state.hovering = self.hover.is_hovering();
    }

    pub fn element_blur(&mut self, id: ElementId) {
        self.hover.blur(id);
        self.state.hovering = self.hover.is_hovering();
    }

    /// Forget hovered or focused elements for which `live` is false. A
    /// removed element gets no `pointerleave`, so it is dropped here.
    pub fn prune_hover(&mut self, live: impl Fn(ElementId) -> bool) {
        self.hover.retain(live);
        self.state.hovering = self.hover.is_hovering();
    }

    /// Start the quiet window without a movement (page load).
    pub fn arm_idle(&mut self, now_ms: f64) {
        self.idle.rearm(now_ms);
    }

    /// Set `idle` if the quiet window elapsed. Returns whether it changed.
    pub fn poll_idle(&mut self, now_ms: f64) -> bool {
        if self.idle.is_due(now_ms) && !self.state.idle {
            self.state.idle = true;
            return true;
        }
        false
    }

    /// Time left in the quiet window, `None` once it has been reported.
    pub fn idle_remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.idle.remaining_ms(now_ms)
    }

    // ------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------

    /// One interpolation step toward the latest target.
    pub fn step(&mut self) -> XY<f64> {
        self.position = self.position.lerp_toward(self.target, self.smoothing);
        self.frames += 1;
        self.position
    }

    /// Run `frames` steps back to back. Used where no display clock exists.
    pub fn advance(&mut self, frames: u32) -> XY<f64> {
        for _ in 0..frames {
            self.step();
        }
        self.position
    }

    /// Write the current position without stepping.
    pub fn render_position(&self, sink: &impl MarkerSink) {
        sink.set_transform(&self.position.centered_transform());
    }

    /// Write opacity and classes whose flag changed since the last sync.
    pub fn sync_state(&mut self, sink: &impl MarkerSink) {
        let previous = self.rendered;
        let current = self.state;

        if previous.map_or(true, |p| p.visible != current.visible) {
            sink.set_opacity(current.opacity());
        }
        for class in CursorClass::ALL {
            let on = current.has_class(class);
            if previous.map_or(true, |p| p.has_class(class) != on) {
                sink.set_class(class, on);
            }
        }
        self.rendered = Some(current);
    }

    /// One animation frame: step, move the marker, flush flag changes.
    pub fn render_frame(&mut self, sink: &impl MarkerSink) {
        self.step();
        self.render_position(sink);
        self.sync_state(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CursorSession {
        CursorSession::new(XY::new(0.0, 0.0), 0.16, 2500)
    }

    #[test]
    fn test_starts_hidden_at_start_point() {
        let s = CursorSession::new(XY::new(400.0, 300.0), 0.16, 2500);
        assert_eq!(s.position(), XY::new(400.0, 300.0));
        assert_eq!(s.target(), XY::new(400.0, 300.0));
        assert!(!s.state().visible);
    }

    #[test]
    fn test_move_shows_and_clears_idle() {
        let mut s = session();
        s.arm_idle(0.0);
        assert!(s.poll_idle(2500.0));
        assert!(s.state().idle);

        s.pointer_move(XY::new(5.0, 6.0), 2600.0);
        assert!(s.state().visible);
        assert!(!s.state().idle);
        assert_eq!(s.target(), XY::new(5.0, 6.0));
    }

    #[test]
    fn test_latest_target_wins() {
        let mut s = session();
        s.pointer_move(XY::new(10.0, 10.0), 0.0);
        s.pointer_move(XY::new(20.0, 20.0), 1.0);
        s.pointer_move(XY::new(100.0, 50.0), 2.0);
        let pos = s.step();
        assert!((pos.x - 16.0).abs() < 1e-9);
        assert!((pos.y - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_leave_keeps_tracking() {
        let mut s = session();
        s.pointer_move(XY::new(50.0, 50.0), 0.0);
        s.pointer_leave_viewport();
        assert!(!s.state().visible);
        s.advance(3);
        assert!(s.position().x > 0.0);
    }

    #[test]
    fn test_poll_idle_reports_once() {
        let mut s = session();
        s.arm_idle(0.0);
        assert!(!s.poll_idle(100.0));
        assert!(s.poll_idle(3000.0));
        assert!(!s.poll_idle(9000.0));
    }

    #[test]
    fn test_prune_hover_unpins_removed_element() {
        let mut s = session();
        s.element_enter(0);
        s.prune_hover(|id| id != 0);
        assert!(!s.state().hovering);

        s.element_enter(1);
        assert!(s.state().hovering);
        s.element_leave(1);
        assert!(!s.state().hovering);
    }

    #[test]
    fn test_frame_count() {
        let mut s = session();
        s.advance(10);
        assert_eq!(s.frame_count(), 10);
    }
}
