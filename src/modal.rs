//! Modal dialog: one overlay toggled by an opener and two closers.

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement};

use crate::config::ModalConfig;
use crate::error::{OptionExt, PortfolioResult, ResultExt};

pub trait ModalSurface {
    fn set_open(&self, open: bool);
}

pub struct Modal<S> {
    surface: S,
}

impl<S: ModalSurface> Modal<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn open(&self) {
        self.surface.set_open(true);
    }

    pub fn close(&self) {
        self.surface.set_open(false);
    }

    /// A click reached the overlay. Only clicks on the backdrop itself close
    /// the dialog; clicks inside it bubble up with another target.
    pub fn overlay_clicked(&self, on_backdrop: bool) -> bool {
        if on_backdrop {
            self.close();
        }
        on_backdrop
    }
}

struct OverlaySurface {
    overlay: HtmlElement,
    active_class: String,
}

impl ModalSurface for OverlaySurface {
    fn set_open(&self, open: bool) {
        self.overlay
            .class_list()
            .toggle_with_force(&self.active_class, open)
            .log_err("[Modal] Failed to toggle overlay class");
    }
}

fn on_click(target: &EventTarget, modal: &Rc<Modal<OverlaySurface>>, open: bool) {
    let modal = Rc::clone(modal);
    EventListener::new(target, "click", move |_| {
        if open {
            modal.open();
        } else {
            modal.close();
        }
    })
    .forget();
}

/// Wire the modal into the current page.
///
/// The overlay is required; a missing opener or closer only drops that
/// binding.
pub fn start(config: &ModalConfig) -> PortfolioResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .context("document")?;

    let overlay = document
        .get_element_by_id(&config.overlay_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .context(&format!("#{}", config.overlay_id))?;

    let modal = Rc::new(Modal::new(OverlaySurface {
        overlay: overlay.clone(),
        active_class: config.active_class.clone(),
    }));

    match document.get_element_by_id(&config.open_id) {
        Some(opener) => on_click(&opener, &modal, true),
        None => log::warn!("[Modal] #{} not found", config.open_id),
    }

    match document.query_selector(&config.close_selector).ok().flatten() {
        Some(closer) => on_click(&closer, &modal, false),
        None => log::warn!("[Modal] {} not found", config.close_selector),
    }

    match document.get_element_by_id(&config.close_button_id) {
        Some(closer) => on_click(&closer, &modal, false),
        None => log::warn!("[Modal] #{} not found", config.close_button_id),
    }

    let backdrop: EventTarget = overlay.clone().into();
    let overlay_modal = Rc::clone(&modal);
    EventListener::new(&overlay, "click", move |event| {
        let on_backdrop = event.target().map_or(false, |target| target == backdrop);
        overlay_modal.overlay_clicked(on_backdrop);
    })
    .forget();

    log::debug!("[Modal] Bound to #{}", config.overlay_id);
    Ok(())
}
