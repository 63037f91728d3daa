//! Visual state flags carried by the marker.

use serde::Serialize;

/// Class names toggled on the marker element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorClass {
    /// Over a link, button or other interactive element.
    Hover,
    /// Pointer button held down.
    Active,
    /// No movement for the quiet window.
    Idle,
}

impl CursorClass {
    pub const ALL: [CursorClass; 3] = [CursorClass::Hover, CursorClass::Active, CursorClass::Idle];

    pub fn class_name(self) -> &'static str {
        match self {
            CursorClass::Hover => "hover",
            CursorClass::Active => "active",
            CursorClass::Idle => "idle",
        }
    }
}

impl std::fmt::Display for CursorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Independent boolean flags of the marker.
///
/// `visible` only drives opacity; the animation keeps running while hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisualState {
    pub hovering: bool,
    pub pressed: bool,
    pub idle: bool,
    pub visible: bool,
}

impl VisualState {
    /// Whether the class for `class` should be present.
    pub fn has_class(&self, class: CursorClass) -> bool {
        match class {
            CursorClass::Hover => self.hovering,
            CursorClass::Active => self.pressed,
            CursorClass::Idle => self.idle,
        }
    }

    pub fn opacity(&self) -> &'static str {
        if self.visible {
            "1"
        } else {
            "0"
        }
    }
}
