//! Intensity windows.

use serde::{Deserialize, Serialize};

/// An intensity window, stored as its lower and upper bounds.
///
/// Windows are usually specified by a center and a width; `min` and `max`
/// are then `center - width / 2` and `center + width / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Lower bound of the window.
    pub min: f64,
    /// Upper bound of the window.
    pub max: f64,
}

impl Window {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Creates a window from its center and width.
    #[must_use]
    pub fn from_center_width(center: f64, width: f64) -> Self {
        Self {
            min: center - width / 2.0,
            max: center + width / 2.0,
        }
    }

    /// Returns the window center.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Returns the window width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns a copy of this window moved to a new center, keeping its width.
    #[must_use]
    pub fn with_center(&self, center: f64) -> Self {
        Self::from_center_width(center, self.width())
    }

    /// Returns a copy of this window resized around its current center.
    #[must_use]
    pub fn with_width(&self, width: f64) -> Self {
        Self::from_center_width(self.center(), width)
    }
}

impl Default for Window {
    /// A soft-tissue window: center 40, width 400.
    fn default() -> Self {
        Self::from_center_width(40.0, 400.0)
    }
}
