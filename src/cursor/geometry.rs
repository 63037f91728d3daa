//! Point type and interpolation math for the cursor marker.

use serde::{Deserialize, Serialize};

/// 2D coordinate helper type (viewport CSS pixels for `f64`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

impl<T> XY<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy> XY<T> {
    pub fn map<U, F: Fn(T) -> U>(&self, f: F) -> XY<U> {
        XY {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl XY<f64> {
    /// Center of a viewport of the given size.
    pub fn center_of(size: XY<f64>) -> Self {
        size.map(|v| v / 2.0)
    }

    pub fn distance_to(&self, other: XY<f64>) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move `factor` of the way toward `target`.
    ///
    /// With `factor` in (0, 1] the result never passes `target`.
    pub fn lerp_toward(&self, target: XY<f64>, factor: f64) -> Self {
        XY {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }

    /// CSS transform placing an element's center (not its corner) here.
    pub fn centered_transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) translate(-50%, -50%)",
            self.x, self.y
        )
    }
}
