//! Event routing between page callbacks and the cursor session.
//!
//! [`CursorDriver`] is generic over the node and marker types so the browser
//! runtime and the tests feed it the same way. The browser side only turns
//! `web-sys` events and mutation records into calls on it, and owns the
//! listener, frame and timeout handles.

use std::cell::RefCell;

use super::geometry::XY;
use super::host::MountedCursor;
use super::hover::{ElementId, InteractiveElementSet, InteractiveNode, SelectorList};
use super::session::{CursorSession, MarkerSink};
use super::state::VisualState;
use crate::error::PortfolioResult;

/// Events a bound interactive element reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Enter,
    Leave,
    Focus,
    Blur,
}

/// One observer delivery: the inserted elements, and whether anything was
/// removed.
#[derive(Debug, Clone)]
pub struct MutationBatch<N> {
    pub added: Vec<N>,
    pub removed: bool,
}

impl<N> Default for MutationBatch<N> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: false,
        }
    }
}

pub struct CursorDriver<N, M> {
    marker: M,
    session: CursorSession,
    elements: InteractiveElementSet<N>,
}

impl<N: InteractiveNode, M: MarkerSink> CursorDriver<N, M> {
    pub fn new(mounted: MountedCursor<M>, selectors: SelectorList) -> Self {
        Self {
            marker: mounted.marker,
            session: mounted.session,
            elements: InteractiveElementSet::new(selectors),
        }
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    pub fn session(&self) -> &CursorSession {
        &self.session
    }

    pub fn elements(&self) -> &InteractiveElementSet<N> {
        &self.elements
    }

    pub fn state(&self) -> VisualState {
        self.session.state()
    }

    pub fn idle_delay_ms(&self) -> u32 {
        self.session.idle_delay_ms() as u32
    }

    /// Record unbound matches under `roots`. The caller attaches hover
    /// listeners to the returned elements, passing their ids back through
    /// [`CursorDriver::element_event`].
    pub fn bind_roots(&mut self, roots: &[N]) -> Vec<(ElementId, N)> {
        let added = self.elements.extend_from(roots);
        if !added.is_empty() {
            log::debug!(
                "[Cursor] Bound {} interactive element(s), {} total",
                added.len(),
                self.elements.len()
            );
        }
        added
    }

    /// Handle one observer delivery. Removals drop hover entries for
    /// detached elements before the insertions are bound.
    pub fn apply_batch(&mut self, batch: MutationBatch<N>) -> Vec<(ElementId, N)> {
        if batch.removed {
            self.prune_detached();
            self.session.sync_state(&self.marker);
        }
        if batch.added.is_empty() {
            return Vec::new();
        }
        self.bind_roots(&batch.added)
    }

    pub fn pointer_move(&mut self, at: XY<f64>, now_ms: f64) {
        self.session.pointer_move(at, now_ms);
        self.session.sync_state(&self.marker);
    }

    /// `pointerout` seen on the window. Without a related target the
    /// pointer went off the page.
    pub fn pointer_out(&mut self, has_related_target: bool) {
        if has_related_target {
            return;
        }
        self.session.pointer_leave_viewport();
        self.session.sync_state(&self.marker);
    }

    pub fn press(&mut self) {
        self.session.press();
        self.session.sync_state(&self.marker);
    }

    pub fn release(&mut self) {
        self.session.release();
        self.session.sync_state(&self.marker);
    }

    pub fn element_event(&mut self, id: ElementId, event: HoverEvent) {
        self.prune_detached();
        match event {
            HoverEvent::Enter => self.session.element_enter(id),
            HoverEvent::Leave => self.session.element_leave(id),
            HoverEvent::Focus => self.session.element_focus(id),
            HoverEvent::Blur => self.session.element_blur(id),
        }
        self.session.sync_state(&self.marker);
    }

    /// The idle timeout fired at `now_ms`.
    ///
    /// Returns the delay for a replacement timeout when the quiet window
    /// has not elapsed on the host clock yet.
    pub fn idle_fired(&mut self, now_ms: f64) -> Option<u32> {
        if self.session.poll_idle(now_ms) {
            self.session.sync_state(&self.marker);
            return None;
        }
        let delay = self.session.idle_delay_ms().max(1.0);
        self.session
            .idle_remaining_ms(now_ms)
            .map(|left| left.ceil().clamp(1.0, delay) as u32)
    }

    /// One display frame.
    pub fn frame(&mut self) {
        self.session.render_frame(&self.marker);
    }

    fn prune_detached(&mut self) {
        let elements = &self.elements;
        self.session.prune_hover(|id| elements.is_live(id));
    }
}

/// Fill `slot` from `init` unless it is already occupied.
///
/// `init` may decline with `Ok(None)`, leaving the slot empty. Returns
/// whether a value was installed by this call.
pub fn install_once<T>(
    slot: &RefCell<Option<T>>,
    init: impl FnOnce() -> PortfolioResult<Option<T>>,
) -> PortfolioResult<bool> {
    if slot.borrow().is_some() {
        return Ok(false);
    }
    match init()? {
        Some(value) => {
            *slot.borrow_mut() = Some(value);
            Ok(true)
        },
        None => Ok(false),
    }
}
