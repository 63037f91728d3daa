//! Console logging for the page behaviors.
//!
//! Log lines go to the browser console through `console_log`, prefixed with
//! the subsystem in brackets (`[Cursor]`, `[Theme]`, `[Modal]`).

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the panic hook and console logger once. Later calls only adjust
/// the level.
pub fn init(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            // a logger is already installed
            return;
        }
        log::info!("[Portfolio] WASM module initialized");
    });
    log::set_max_level(level.to_level_filter());
}
