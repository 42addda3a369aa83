//! voxcloud: view a scalar volume (a CT or MRI stack) as a colored point cloud.
//!
//! A volume is loaded into a [`VoxelGrid`], handed to a [`Viewer`], and every
//! change to the window, the category mode, contour mode or hide-empty
//! rebuilds the point list. Pointer and wheel input drive the view
//! independently of the points.
//!
//! # Quick Start
//!
//! ```
//! use voxcloud::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let grid = VoxelGrid::from_samples(2, 2, 2, vec![500; 8])?;
//!     let mut viewer = Viewer::default();
//!     viewer.set_category_mode(CategoryMode::Banded);
//!     viewer.replace_volume(grid);
//!     assert_eq!(viewer.points().len(), 8);
//!
//!     viewer.wheel(1000.0);
//!     let frame = viewer.frame(16.0 / 9.0);
//!     assert_eq!(frame.points.len(), 8);
//!     Ok(())
//! }
//! ```

mod init;
mod session;
mod volume;

pub use init::init_logging;
pub use session::{Frame, PointRenderer, Viewer, ViewerOptions};
pub use volume::volume_from_slices;

// Re-export core types
pub use voxcloud_core::{
    classify_banded, classify_binary, color_for, is_boundary, normalize, point_cloud::as_bytes,
    rebuild, BuildOptions, Category, CategoryMode, Classifier, DrawablePoint, Intensity,
    Neighborhood, PointCloudBuilder, Result, Visibility, VoxcloudError, VoxelGrid, Window,
};

// Re-export view types
pub use voxcloud_view::{
    modified_delta, Modifiers, PointerButton, Projection, ProjectionMode, ViewController,
    ViewTransform,
};

pub use glam::{Mat4, UVec3, Vec2, Vec3};
