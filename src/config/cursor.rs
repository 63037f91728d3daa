//! Cursor configuration.

use serde::{Deserialize, Serialize};

/// Id of the marker element, reused when the page already contains it.
pub const DEFAULT_MARKER_ID: &str = "custom-cursor";

/// Fraction of the remaining distance closed per frame.
pub const DEFAULT_SMOOTHING: f64 = 0.16;

/// Faster convergence used when the visitor asked for reduced motion.
pub const DEFAULT_REDUCED_MOTION_SMOOTHING: f64 = 0.6;

/// Quiet window before the marker is marked idle (2.5s).
pub const DEFAULT_IDLE_DELAY_MS: u32 = 2500;

/// Elements that make the marker grow when entered or focused.
pub const DEFAULT_INTERACTIVE_SELECTORS: &[&str] = &[
    "a",
    "button",
    "input",
    "textarea",
    "select",
    ".btn-github-card",
    ".btn-github-principal",
    ".card-projeto",
    ".link-social",
    ".formulario-contato button",
    "label[for]",
];

/// Settings for the custom cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CursorConfig {
    /// Id of the marker element.
    pub marker_id: String,

    /// Smoothing factor in (0, 1]. Larger means less lag.
    pub smoothing: f64,

    /// Smoothing factor used under `prefers-reduced-motion: reduce`.
    pub reduced_motion_smoothing: f64,

    /// Milliseconds without pointer movement before `idle` is set.
    pub idle_delay_ms: u32,

    /// Selectors for elements that trigger the hover state.
    pub interactive_selectors: Vec<String>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            marker_id: DEFAULT_MARKER_ID.to_string(),
            smoothing: DEFAULT_SMOOTHING,
            reduced_motion_smoothing: DEFAULT_REDUCED_MOTION_SMOOTHING,
            idle_delay_ms: DEFAULT_IDLE_DELAY_MS,
            interactive_selectors: DEFAULT_INTERACTIVE_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl CursorConfig {
    /// Validate and clamp settings to acceptable ranges.
    ///
    /// Non-finite or non-positive smoothing falls back to the default; values
    /// above 1.0 are clamped so the marker can never overshoot.
    pub fn validate(&mut self) {
        self.smoothing = sanitize_smoothing(self.smoothing, DEFAULT_SMOOTHING);
        self.reduced_motion_smoothing = sanitize_smoothing(
            self.reduced_motion_smoothing,
            DEFAULT_REDUCED_MOTION_SMOOTHING,
        );
        self.idle_delay_ms = self.idle_delay_ms.clamp(100, 60_000);
        if self.marker_id.trim().is_empty() {
            self.marker_id = DEFAULT_MARKER_ID.to_string();
        }
        self.interactive_selectors
            .retain(|selector| !selector.trim().is_empty());
    }

    /// Smoothing factor for the current motion preference.
    pub fn smoothing_for(&self, reduced_motion: bool) -> f64 {
        if reduced_motion {
            self.reduced_motion_smoothing
        } else {
            self.smoothing
        }
    }
}

fn sanitize_smoothing(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        fallback
    } else {
        value.min(1.0)
    }
}
