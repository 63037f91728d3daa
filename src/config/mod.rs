//! Page behavior configuration.
//!
//! Every field has a default matching the portfolio markup, so the page can
//! call `start()` with no arguments. A partial object passed from JavaScript
//! (or JSON text) overrides only the fields it names.
//!
//! - `CursorConfig`: marker id, smoothing, idle window, hover selectors
//! - `ThemeConfig`: storage key, body class, toggle checkbox id
//! - `ModalConfig`: overlay/opener/closer element lookups

pub mod cursor;
pub mod page;

pub use cursor::CursorConfig;
pub use page::{ModalConfig, PageConfig, ThemeConfig};
