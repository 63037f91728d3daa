//! Browser driver for the cursor.
//!
//! Wires `web-sys` events, `requestAnimationFrame`, a debounce timeout and a
//! `MutationObserver` to one shared [`CursorDriver`]. Each callback borrows
//! the driver briefly; the driver writes flag changes straight to the marker.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, MouseEvent, MutationObserver, MutationObserverInit,
    MutationRecord, Window,
};

use super::driver::{install_once, CursorDriver, HoverEvent, MutationBatch};
use super::geometry::XY;
use super::host::{mount, CursorPage, HostCapabilities};
use super::hover::{ElementId, InteractiveNode, SelectorList};
use super::session::MarkerSink;
use super::state::{CursorClass, VisualState};
use crate::config::CursorConfig;
use crate::error::{OptionExt, PortfolioResult, ResultExt};

/// Property on `window` holding `{ el: <marker> }` for inspection.
const DEBUG_HANDLE: &str = "__customCursor";

thread_local! {
    static ACTIVE: RefCell<Option<Rc<CursorRuntime>>> = const { RefCell::new(None) };
}

/// Monotonic page clock; `Date.now()` where `performance` is missing.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::debug!("[Cursor] Failed to set {}: {:?}", property, e);
    }
}

impl MarkerSink for HtmlElement {
    fn set_transform(&self, transform: &str) {
        set_style(self, "transform", transform);
    }

    fn set_opacity(&self, opacity: &str) {
        set_style(self, "opacity", opacity);
    }

    fn set_class(&self, class: CursorClass, on: bool) {
        if let Err(e) = self.class_list().toggle_with_force(class.class_name(), on) {
            log::debug!("[Cursor] Failed to toggle class {}: {:?}", class, e);
        }
    }
}

impl InteractiveNode for Element {
    fn matches_selector(&self, selector: &str) -> bool {
        self.matches(selector).unwrap_or(false)
    }

    fn descendants_matching(&self, selector: &str) -> Vec<Self> {
        let Ok(list) = self.query_selector_all(selector) else {
            log::warn!("[Cursor] Invalid selector list: {}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn is_connected(&self) -> bool {
        web_sys::Node::is_connected(self)
    }
}

/// The live page.
struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    fn media_matches(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }

    fn dimension(value: Result<JsValue, JsValue>) -> f64 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }
}

impl CursorPage for BrowserPage {
    type Marker = HtmlElement;

    fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            coarse_pointer: self.media_matches("(pointer: coarse)"),
            touch_events: js_sys::Reflect::has(&self.window, &JsValue::from_str("ontouchstart"))
                .unwrap_or(false),
            reduced_motion: self.media_matches("(prefers-reduced-motion: reduce)"),
            viewport: XY::new(
                Self::dimension(self.window.inner_width()),
                Self::dimension(self.window.inner_height()),
            ),
        }
    }

    fn find_marker(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn create_marker(&self, id: &str) -> PortfolioResult<HtmlElement> {
        let marker = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .context("created marker is not an HtmlElement")?;
        marker.set_id(id);
        self.document.body().context("body")?.append_child(&marker)?;
        Ok(marker)
    }

    fn now_ms(&self) -> f64 {
        now_ms()
    }
}

/// Turn observer records into one batch of inserted elements.
fn batch_from_records(records: &js_sys::Array) -> MutationBatch<Element> {
    let mut batch = MutationBatch::default();
    for record in records
        .iter()
        .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
    {
        let nodes = record.added_nodes();
        batch.added.extend(
            (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .map(Element::from),
        );
        batch.removed |= record.removed_nodes().length() > 0;
    }
    batch
}

/// Everything kept alive for the page's lifetime.
struct CursorRuntime {
    driver: RefCell<CursorDriver<Element, HtmlElement>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    idle_timeout: RefCell<Option<Timeout>>,
    observer: RefCell<Option<MutationObserver>>,
    observer_callback: RefCell<Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>>,
}

impl CursorRuntime {
    fn listen(
        self: &Rc<Self>,
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl Fn(&Rc<CursorRuntime>, &Event) + 'static,
    ) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let listener = EventListener::new(target, event, move |e| {
            if let Some(runtime) = weak.upgrade() {
                handler(&runtime, e);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn install_window_listeners(self: &Rc<Self>, window: &Window) {
        self.listen(window, "pointermove", |runtime, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let at = XY::new(f64::from(event.client_x()), f64::from(event.client_y()));
            runtime.driver.borrow_mut().pointer_move(at, now_ms());
            runtime.schedule_idle(None);
        });
        // `pointerleave` does not bubble to the window; `pointerout` does,
        // with no related target once the pointer is off the page.
        self.listen(window, "pointerout", |runtime, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let has_related_target = event.related_target().is_some();
            runtime.driver.borrow_mut().pointer_out(has_related_target);
        });
        self.listen(window, "pointerdown", |runtime, _| {
            runtime.driver.borrow_mut().press()
        });
        self.listen(window, "pointerup", |runtime, _| {
            runtime.driver.borrow_mut().release()
        });
    }

    fn bind_hover(self: &Rc<Self>, id: ElementId, element: &Element) {
        for (name, event) in [
            ("pointerenter", HoverEvent::Enter),
            ("pointerleave", HoverEvent::Leave),
            ("focus", HoverEvent::Focus),
            ("blur", HoverEvent::Blur),
        ] {
            self.listen(element, name, move |runtime, _| {
                runtime.driver.borrow_mut().element_event(id, event)
            });
        }
    }

    fn bind_all(self: &Rc<Self>, added: Vec<(ElementId, Element)>) {
        for (id, element) in &added {
            self.bind_hover(*id, element);
        }
    }

    fn observe_insertions(self: &Rc<Self>, document: &Document) -> PortfolioResult<()> {
        let body = document.body().context("body")?;
        let weak = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |records: js_sys::Array, _observer: MutationObserver| {
                let Some(runtime) = weak.upgrade() else {
                    return;
                };
                let batch = batch_from_records(&records);
                let added = runtime.driver.borrow_mut().apply_batch(batch);
                runtime.bind_all(added);
            },
        );

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(&body, &init)?;

        *self.observer.borrow_mut() = Some(observer);
        *self.observer_callback.borrow_mut() = Some(callback);
        Ok(())
    }

    /// Replace the pending idle timeout. `None` waits the full delay.
    fn schedule_idle(self: &Rc<Self>, delay_ms: Option<u32>) {
        let delay = delay_ms.unwrap_or_else(|| self.driver.borrow().idle_delay_ms());
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(delay, move || {
            if let Some(runtime) = weak.upgrade() {
                let rearm = runtime.driver.borrow_mut().idle_fired(now_ms());
                if let Some(remaining) = rearm {
                    runtime.schedule_idle(Some(remaining));
                }
            }
        });
        *self.idle_timeout.borrow_mut() = Some(timeout);
    }

    /// Self-rescheduling animation frame.
    fn schedule_frame(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_timestamp| {
            if let Some(runtime) = weak.upgrade() {
                runtime.driver.borrow_mut().frame();
                runtime.schedule_frame();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn install_unload(self: &Rc<Self>, window: &Window) {
        self.listen(window, "unload", |runtime, _| {
            if let Some(observer) = runtime.observer.borrow_mut().take() {
                observer.disconnect();
                log::debug!("[Cursor] Mutation observer disconnected");
            }
        });
    }
}

fn expose_debug_handle(window: &Window, marker: &HtmlElement) -> PortfolioResult<()> {
    let handle = js_sys::Object::new();
    js_sys::Reflect::set(&handle, &JsValue::from_str("el"), marker)?;
    js_sys::Reflect::set(window, &JsValue::from_str(DEBUG_HANDLE), &handle)?;
    Ok(())
}

/// Mount the marker and wire every callback. `None` on touch devices.
fn launch(config: &CursorConfig) -> PortfolioResult<Option<Rc<CursorRuntime>>> {
    let window = web_sys::window().context("window")?;
    let document = window.document().context("document")?;
    let page = BrowserPage {
        window: window.clone(),
        document: document.clone(),
    };

    let Some(mounted) = mount(&page, config)? else {
        return Ok(None);
    };

    let runtime = Rc::new(CursorRuntime {
        driver: RefCell::new(CursorDriver::new(
            mounted,
            SelectorList::new(&config.interactive_selectors),
        )),
        listeners: RefCell::new(Vec::new()),
        frame: RefCell::new(None),
        idle_timeout: RefCell::new(None),
        observer: RefCell::new(None),
        observer_callback: RefCell::new(None),
    });

    runtime.install_window_listeners(&window);
    if let Some(root) = document.document_element() {
        let added = runtime.driver.borrow_mut().bind_roots(&[root]);
        runtime.bind_all(added);
    }
    if let Err(e) = runtime.observe_insertions(&document) {
        log::warn!("[Cursor] Dynamic hover binding unavailable: {}", e);
    }
    runtime.schedule_idle(None);
    runtime.schedule_frame();
    runtime.install_unload(&window);

    if let Err(e) = expose_debug_handle(&window, runtime.driver.borrow().marker()) {
        log::debug!("[Cursor] Debug handle not exposed: {}", e);
    }

    log::info!(
        "[Cursor] Custom cursor started ({} interactive elements)",
        runtime.driver.borrow().elements().len()
    );
    Ok(Some(runtime))
}

/// Start the custom cursor on the current page.
///
/// A second call while a cursor is active does nothing.
pub fn start(config: &CursorConfig) -> PortfolioResult<()> {
    ACTIVE.with(|active| {
        if !install_once(active, || launch(config))? {
            log::debug!("[Cursor] Not started (already running or touch device)");
        }
        Ok(())
    })
}

/// Snapshot of the active cursor's flags, if a cursor is running.
pub fn current_state() -> Option<VisualState> {
    ACTIVE.with(|active| {
        active
            .borrow()
            .as_ref()
            .map(|runtime| runtime.driver.borrow().state())
    })
}
