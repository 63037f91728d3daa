//! Central error types for the portfolio page behaviors.
//!
//! Nothing here is ever shown to a visitor. Entry points log these errors
//! and keep going, so a missing element degrades one behavior instead of
//! breaking the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Main error type for page behavior setup.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// An element the behavior needs is not in the page
    #[error("Element not found: {selector}")]
    ElementMissing { selector: String },

    /// Configuration could not be read
    #[error("Config error: {0}")]
    Config(String),

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl PortfolioError {
    pub fn missing(selector: impl Into<String>) -> Self {
        PortfolioError::ElementMissing {
            selector: selector.into(),
        }
    }
}

impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        PortfolioError::Dom(describe_js(&value))
    }
}

impl From<serde_wasm_bindgen::Error> for PortfolioError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        PortfolioError::Config(err.to_string())
    }
}

impl From<String> for PortfolioError {
    fn from(msg: String) -> Self {
        PortfolioError::Other(msg)
    }
}

impl From<&str> for PortfolioError {
    fn from(msg: &str) -> Self {
        PortfolioError::Other(msg.to_string())
    }
}

/// Best-effort text for a thrown JS value.
fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error, converting it to PortfolioError::Other.
    fn context(self, msg: &str) -> PortfolioResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> PortfolioResult<T>;

    /// For best-effort DOM writes: log a failure at debug level and go on.
    fn log_err(self, msg: &str) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> PortfolioResult<T> {
        self.map_err(|e| PortfolioError::Other(format!("{}: {:?}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> PortfolioResult<T> {
        self.map_err(|e| PortfolioError::Other(format!("{}: {:?}", f(), e)))
    }

    fn log_err(self, msg: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("{}: {:?}", msg, e);
                None
            },
        }
    }
}

/// Extension trait for turning a missing element into an error.
pub trait OptionExt<T> {
    /// Convert None to PortfolioError::ElementMissing for the given selector.
    fn context(self, selector: &str) -> PortfolioResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, selector: &str) -> PortfolioResult<T> {
        self.ok_or_else(|| PortfolioError::missing(selector))
    }
}

/// Type alias for Results using PortfolioError.
pub type PortfolioResult<T> = Result<T, PortfolioError>;
