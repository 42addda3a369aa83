//! Conversion of a voxel grid into a colored point cloud.

use glam::{UVec3, Vec3};

use crate::classify::color_for;
use crate::connectivity::is_boundary_at;
use crate::options::BuildOptions;
use crate::volume::VoxelGrid;

/// A single point ready to be drawn.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawablePoint {
    /// Position in normalized space, the longest physical axis spanning `[-1, 1]`.
    pub position: Vec3,
    /// RGB color in `[0, 1]`.
    pub color: Vec3,
}

/// Reinterprets a point list as raw bytes for upload to a vertex buffer.
#[must_use]
pub fn as_bytes(points: &[DrawablePoint]) -> &[u8] {
    bytemuck::cast_slice(points)
}

/// Builds point clouds from a voxel grid.
///
/// The builder precomputes the per-axis scale so that the longest physical
/// axis of the grid maps to a length of 2 while the other axes keep their
/// relative proportions.
#[derive(Debug, Clone, Copy)]
pub struct PointCloudBuilder<'a> {
    grid: &'a VoxelGrid,
    global_factor: f32,
    scale: Vec3,
}

impl<'a> PointCloudBuilder<'a> {
    /// Creates a builder for `grid`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(grid: &'a VoxelGrid) -> Self {
        let physical_size = grid.spacing() * grid.dimensions().as_vec3();
        let global_factor = 2.0 / physical_size.max_element();
        Self {
            grid,
            global_factor,
            scale: grid.spacing() * global_factor,
        }
    }

    /// Returns `2 / max(sx * W, sy * H, sz * D)`.
    #[must_use]
    pub fn global_factor(&self) -> f32 {
        self.global_factor
    }

    /// Returns the per-axis scale (spacing times the global factor).
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Returns the normalized position of a voxel.
    #[must_use]
    pub fn position_of(&self, coord: UVec3) -> Vec3 {
        (coord.as_vec3() - self.grid.dimensions().as_vec3() / 2.0) * self.scale
    }

    /// Scans every voxel and returns the points to draw, in storage order.
    #[must_use]
    pub fn build(&self, options: &BuildOptions) -> Vec<DrawablePoint> {
        let classifier = options.classifier();
        let classify = |value: f64| classifier.classify(value);
        let mut points = Vec::new();

        for (index, &sample) in self.grid.samples().iter().enumerate() {
            let value = f64::from(sample);
            let category = classifier.classify(value);
            let c = classifier.intensity(value);

            if !category.is_visible() && (options.hide_empty || c == 0.0) {
                continue;
            }

            let coord = self.grid.coordinate_unchecked(index);
            if options.contours
                && !is_boundary_at(self.grid, coord, category, &classify, options.neighborhood)
            {
                continue;
            }

            points.push(DrawablePoint {
                position: self.position_of(coord),
                color: color_for(category, c),
            });
        }

        log::info!(
            "rebuilt point cloud: {} of {} voxels",
            points.len(),
            self.grid.num_voxels()
        );
        points
    }
}

/// Rebuilds the full point list of `grid` under `options`.
#[must_use]
pub fn rebuild(grid: &VoxelGrid, options: &BuildOptions) -> Vec<DrawablePoint> {
    PointCloudBuilder::new(grid).build(options)
}
