//! Portfolio page behaviors compiled to WebAssembly.
//!
//! A custom eased cursor, a persisted dark/light theme toggle and a modal
//! dialog. The module's start hook only sets up logging; the page calls
//! `start()` (or `startWithConfig(obj)` / `startWithJson(text)`) once the
//! script is loaded.

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod cursor;
pub mod error;
pub mod logging;
pub mod modal;
pub mod theme;

use config::PageConfig;
use error::PortfolioResult;

/// Initialize panic hook and logging for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::Level::Info);
}

/// Start every behavior with the default configuration.
#[wasm_bindgen]
pub fn start() {
    run(PageConfig::default());
}

/// Start every behavior with a partial configuration object.
///
/// Fields left out keep their defaults. An unreadable object is the only
/// error surfaced to JavaScript.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config: JsValue) -> Result<(), JsValue> {
    let config = read_config(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    run(config);
    Ok(())
}

/// Start every behavior with configuration given as JSON text, e.g. the
/// contents of a `<script type="application/json">` block.
#[wasm_bindgen(js_name = startWithJson)]
pub fn start_with_json(text: &str) -> Result<(), JsValue> {
    let config = read_json_config(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    run(config);
    Ok(())
}

fn read_json_config(text: &str) -> PortfolioResult<PageConfig> {
    if text.trim().is_empty() {
        return Ok(PageConfig::default());
    }
    PageConfig::from_json(text)
}

fn read_config(value: JsValue) -> PortfolioResult<PageConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(PageConfig::default());
    }
    let mut config: PageConfig = serde_wasm_bindgen::from_value(value)?;
    config.validate();
    Ok(config)
}

/// Current cursor flags (`hovering`, `pressed`, `idle`, `visible`), or
/// `undefined` when no custom cursor is running.
#[wasm_bindgen(js_name = cursorState)]
pub fn cursor_state() -> JsValue {
    cursor::browser::current_state()
        .and_then(|state| serde_wasm_bindgen::to_value(&state).ok())
        .unwrap_or(JsValue::UNDEFINED)
}

fn run(config: PageConfig) {
    logging::init(config.log_level());
    on_dom_ready(move || {
        if let Err(e) = cursor::browser::start(&config.cursor) {
            log::error!("[Cursor] Failed to start: {}", e);
        }
        if let Err(e) = theme::start(&config.theme) {
            log::warn!("[Theme] Not started: {}", e);
        }
        if let Err(e) = modal::start(&config.modal) {
            log::warn!("[Modal] Not started: {}", e);
        }
    });
}

/// Run `f` now, or on `DOMContentLoaded` while the document is still parsing.
fn on_dom_ready(f: impl FnOnce() + 'static) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("[Portfolio] No document, nothing started");
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| f()).forget();
    } else {
        f();
    }
}
