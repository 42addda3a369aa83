//! Core pipeline for voxcloud.
//!
//! This crate turns a scalar volume into a colored point cloud:
//! - [`VoxelGrid`] stores the intensity samples and voxel spacing
//! - [`classify`] windows and categorizes intensities
//! - [`connectivity`] finds voxels on a category boundary (contour mode)
//! - [`PointCloudBuilder`] scans the grid and emits normalized points

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod classify;
pub mod connectivity;
pub mod error;
pub mod options;
pub mod point_cloud;
pub mod volume;
pub mod window;

pub use classify::{
    classify_banded, classify_binary, color_for, normalize, Category, CategoryMode, Classifier,
    Visibility,
};
pub use connectivity::{is_boundary, Neighborhood};
pub use error::{Result, VoxcloudError};
pub use options::BuildOptions;
pub use point_cloud::{rebuild, DrawablePoint, PointCloudBuilder};
pub use volume::{Intensity, VoxelGrid};
pub use window::Window;

// Re-export glam types for convenience
pub use glam::{Mat4, UVec3, Vec3};
