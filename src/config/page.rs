//! Theme toggle and modal configuration, plus the top-level `PageConfig`.

use serde::{Deserialize, Serialize};

use super::CursorConfig;
use crate::error::PortfolioResult;

/// Settings for the dark/light theme toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    /// `localStorage` key holding `"dark"` or `"light"`.
    pub storage_key: String,
    /// Class added to `<body>` in dark mode.
    pub dark_class: String,
    /// Id of the checkbox that flips the theme.
    pub toggle_id: String,
    /// Follow `prefers-color-scheme` changes while the page is open.
    pub follow_system: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            dark_class: "dark-mode".to_string(),
            toggle_id: "theme-toggle".to_string(),
            follow_system: true,
        }
    }
}

/// Settings for the modal dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModalConfig {
    pub overlay_id: String,
    pub open_id: String,
    /// Selector for the "x" button inside the dialog.
    pub close_selector: String,
    pub close_button_id: String,
    /// Class that makes the overlay visible.
    pub active_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            overlay_id: "modal-overlay".to_string(),
            open_id: "open-modal".to_string(),
            close_selector: ".close-modal".to_string(),
            close_button_id: "close-btn".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Everything `start_with_config` accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub cursor: CursorConfig,
    pub theme: ThemeConfig,
    pub modal: ModalConfig,
    /// Verbose console logging.
    pub debug: bool,
}

impl PageConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(text: &str) -> PortfolioResult<Self> {
        let mut config: PageConfig = serde_json::from_str(text)?;
        config.validate();
        Ok(config)
    }

    pub fn validate(&mut self) {
        self.cursor.validate();
    }

    pub fn log_level(&self) -> log::Level {
        if self.debug {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;

    #[test]
    fn test_empty_json_is_default() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_nested_override() {
        let config = PageConfig::from_json(
            r#"{"theme": {"storageKey": "site-theme"}, "cursor": {"smoothing": 7}, "debug": true}"#,
        )
        .unwrap();
        assert_eq!(config.theme.storage_key, "site-theme");
        assert_eq!(config.theme.dark_class, "dark-mode");
        // validate() ran
        assert_eq!(config.cursor.smoothing, 1.0);
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn test_invalid_json() {
        let err = PageConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, PortfolioError::Json(_)));
    }

    #[test]
    fn test_modal_defaults() {
        let modal = ModalConfig::default();
        assert_eq!(modal.overlay_id, "modal-overlay");
        assert_eq!(modal.close_selector, ".close-modal");
        assert_eq!(modal.active_class, "active");
    }
}
