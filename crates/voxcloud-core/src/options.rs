//! Configuration options for point cloud construction.

use serde::{Deserialize, Serialize};

use crate::classify::{CategoryMode, Classifier};
use crate::connectivity::Neighborhood;
use crate::window::Window;

/// Parameters of a point cloud rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Classification window (also drives grayscale intensity).
    pub window: Window,

    /// Binary window test or anatomical bands.
    pub category_mode: CategoryMode,

    /// Keep only voxels on a category boundary.
    pub contours: bool,

    /// Neighborhood used by the boundary test.
    pub neighborhood: Neighborhood,

    /// Skip every voxel that is not classified as visible.
    pub hide_empty: bool,
}

impl BuildOptions {
    /// Returns the classifier described by these options.
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.category_mode, self.window)
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            window: Window::default(),
            category_mode: CategoryMode::BinaryWindow,
            contours: false,
            neighborhood: Neighborhood::Six,
            hide_empty: true,
        }
    }
}
