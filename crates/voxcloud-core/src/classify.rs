//! Intensity windowing, thresholding and the category palette.
//!
//! Two boundary conventions coexist here on purpose:
//! - [`normalize`] saturates at the window bounds (`value <= min` gives 0,
//!   `value >= max` gives 1).
//! - [`classify_binary`] tests the closed interval `[min, max]`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::window::Window;

/// Segmentation outcome of classifying a single intensity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// No visible match.
    Background,
    /// Inside the window in binary mode.
    InWindow,
    /// Bone.
    Bone,
    /// Weakly calcified structures.
    WeaklyCalcified,
    /// Gray matter.
    GrayMatter,
    /// White matter.
    WhiteMatter,
    /// Water and cerebrospinal fluid.
    Fluid,
    /// Fat, lungs and air.
    FatAir,
}

impl Category {
    /// Returns true for every category except [`Category::Background`].
    #[must_use]
    pub fn is_visible(self) -> bool {
        self != Category::Background
    }
}

/// Result of the binary window test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl From<Visibility> for Category {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => Category::InWindow,
            Visibility::Hidden => Category::Background,
        }
    }
}

/// How voxel intensities are turned into categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryMode {
    /// Visible iff the value lies inside the current window.
    #[default]
    BinaryWindow,
    /// Fixed anatomical bands, independent of the window.
    Banded,
}

/// Half-open `[low, high)` anatomical bands, highest intensity first.
pub const BANDS: [(Category, f64, f64); 6] = [
    (Category::Bone, 200.0, 1024.0),
    (Category::WeaklyCalcified, 100.0, 200.0),
    (Category::GrayMatter, 37.0, 45.0),
    (Category::WhiteMatter, 20.0, 30.0),
    (Category::Fluid, -5.0, 15.0),
    (Category::FatAir, -1024.0, -10.0),
];

/// Maps a value linearly onto `[0, 1]` across the window.
///
/// A degenerate window (`min >= max`) acts as a step at `min`.
#[must_use]
pub fn normalize(value: f64, window_min: f64, window_max: f64) -> f64 {
    if value <= window_min {
        return 0.0;
    }
    if value >= window_max {
        return 1.0;
    }
    (value - window_min) / (window_max - window_min)
}

/// Closed-interval window test.
#[must_use]
pub fn classify_binary(value: f64, window_min: f64, window_max: f64) -> Visibility {
    if window_min <= value && value <= window_max {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Looks up the anatomical band containing `value`.
#[must_use]
pub fn classify_banded(value: f64) -> Category {
    BANDS
        .iter()
        .find(|(_, low, high)| *low <= value && value < *high)
        .map_or(Category::Background, |(category, _, _)| *category)
}

/// Returns the display color of a category.
///
/// Background and in-window voxels are drawn in grayscale from the
/// normalized intensity `c`; named bands use a fixed palette.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn color_for(category: Category, c: f64) -> Vec3 {
    match category {
        Category::Background | Category::InWindow => Vec3::splat(c as f32),
        Category::Bone => Vec3::new(1.0, 1.0, 1.0),
        Category::WeaklyCalcified => Vec3::new(0.5, 0.5, 0.5),
        Category::GrayMatter => Vec3::new(0.0, 1.0, 0.0),
        Category::WhiteMatter => Vec3::new(1.0, 0.7, 0.0),
        Category::Fluid => Vec3::new(0.2, 0.2, 1.0),
        Category::FatAir => Vec3::new(1.0, 0.0, 0.0),
    }
}

/// A category mode bound to a window, usable as a per-value classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    pub mode: CategoryMode,
    pub window: Window,
}

impl Classifier {
    #[must_use]
    pub fn new(mode: CategoryMode, window: Window) -> Self {
        Self { mode, window }
    }

    /// Classifies a single intensity value.
    #[must_use]
    pub fn classify(&self, value: f64) -> Category {
        match self.mode {
            CategoryMode::BinaryWindow => {
                classify_binary(value, self.window.min, self.window.max).into()
            }
            CategoryMode::Banded => classify_banded(value),
        }
    }

    /// Windowed intensity of a value in `[0, 1]`.
    #[must_use]
    pub fn intensity(&self, value: f64) -> f64 {
        normalize(value, self.window.min, self.window.max)
    }
}
