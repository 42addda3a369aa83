//! Voxel grid holding a scalar intensity volume.

use glam::{IVec3, UVec3, Vec3};

use crate::error::{Result, VoxcloudError};
use crate::window::Window;

/// A signed intensity sample (e.g. a Hounsfield unit).
pub type Intensity = i32;

/// Offset between the unsigned native sample domain and the signed
/// intensity domain, before the rescale intercept is applied.
pub const UNSIGNED_SAMPLE_OFFSET: f64 = 32768.0;

/// A regular 3D grid of intensity samples.
///
/// Samples are stored column by column, then row by row, then slice by
/// slice: the voxel `(x, y, z)` lives at `x + y * W + z * W * H`.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    dimensions: UVec3,
    spacing: Vec3,
    samples: Vec<Intensity>,
    intercept: f64,
    display_window: Option<Window>,
}

impl VoxelGrid {
    /// Creates a zero-filled grid.
    ///
    /// # Errors
    /// Returns [`VoxcloudError::InvalidDimensions`] if any dimension is zero
    /// or the voxel count does not fit in memory indices.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        let len = voxel_count(width, height, depth)?;
        Ok(Self {
            dimensions: UVec3::new(width, height, depth),
            spacing: Vec3::ONE,
            samples: vec![0; len],
            intercept: 0.0,
            display_window: None,
        })
    }

    /// Creates a grid from already-remapped intensities in storage order.
    pub fn from_samples(width: u32, height: u32, depth: u32, samples: Vec<Intensity>) -> Result<Self> {
        let len = voxel_count(width, height, depth)?;
        if samples.len() != len {
            return Err(VoxcloudError::SizeMismatch {
                expected: len,
                actual: samples.len(),
            });
        }
        Ok(Self {
            dimensions: UVec3::new(width, height, depth),
            spacing: Vec3::ONE,
            samples,
            intercept: 0.0,
            display_window: None,
        })
    }

    /// Builder-style variant of [`VoxelGrid::set_spacing`].
    pub fn with_spacing(mut self, spacing: Vec3) -> Result<Self> {
        self.set_spacing(spacing)?;
        Ok(self)
    }

    /// Returns the grid dimensions `(W, H, D)`.
    #[must_use]
    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.dimensions.y
    }

    /// Number of slices.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.dimensions.z
    }

    /// Returns the total number of voxels.
    #[must_use]
    pub fn num_voxels(&self) -> usize {
        self.samples.len()
    }

    /// Returns the physical size of a voxel along each axis.
    #[must_use]
    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    /// Sets the physical voxel size (pixel width, pixel height, slice spacing).
    pub fn set_spacing(&mut self, spacing: Vec3) -> Result<()> {
        if !spacing.is_finite() || spacing.min_element() <= 0.0 {
            return Err(VoxcloudError::InvalidSpacing(spacing));
        }
        self.spacing = spacing;
        Ok(())
    }

    /// Returns the rescale intercept used by the last ingested slice.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns the window passed with the last ingested slice, if any.
    #[must_use]
    pub fn display_window(&self) -> Option<Window> {
        self.display_window
    }

    /// Returns all samples in storage order.
    #[must_use]
    pub fn samples(&self) -> &[Intensity] {
        &self.samples
    }

    /// Flattens a voxel coordinate to a linear index.
    pub fn flatten_index(&self, x: u32, y: u32, z: u32) -> Result<usize> {
        self.check_coordinate(x, y, z)?;
        Ok(self.flatten_unchecked(UVec3::new(x, y, z)))
    }

    /// Unflattens a linear index to its voxel coordinate.
    pub fn get_coordinate(&self, index: usize) -> Result<UVec3> {
        if index >= self.samples.len() {
            return Err(VoxcloudError::OutOfRange {
                what: "voxel index",
                index,
                limit: self.samples.len(),
            });
        }
        Ok(self.coordinate_unchecked(index))
    }

    /// Returns the sample at `(x, y, z)`.
    pub fn get_value(&self, x: u32, y: u32, z: u32) -> Result<Intensity> {
        self.check_coordinate(x, y, z)?;
        Ok(self.value_at(UVec3::new(x, y, z)))
    }

    /// Returns true if a signed coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: IVec3) -> bool {
        coord.cmpge(IVec3::ZERO).all() && coord.as_uvec3().cmplt(self.dimensions).all()
    }

    /// Ingests one slice of native unsigned samples.
    ///
    /// Each native sample `v` is stored as `round(v - (2^15 - intercept))`.
    /// The slice is either written completely or not at all.
    ///
    /// # Errors
    /// [`VoxcloudError::OutOfRange`] if `layer_index >= D`, and
    /// [`VoxcloudError::SizeMismatch`] if `layer.len() != W * H`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_layer(
        &mut self,
        layer: &[u16],
        layer_index: usize,
        window: Window,
        intercept: f64,
    ) -> Result<()> {
        let depth = self.dimensions.z as usize;
        if layer_index >= depth {
            return Err(VoxcloudError::OutOfRange {
                what: "layer",
                index: layer_index,
                limit: depth,
            });
        }
        let layer_len = self.dimensions.x as usize * self.dimensions.y as usize;
        if layer.len() != layer_len {
            return Err(VoxcloudError::SizeMismatch {
                expected: layer_len,
                actual: layer.len(),
            });
        }

        let offset = UNSIGNED_SAMPLE_OFFSET - intercept;
        let start = layer_len * layer_index;
        for (dst, &native) in self.samples[start..start + layer_len].iter_mut().zip(layer) {
            *dst = (f64::from(native) - offset).round() as Intensity;
        }
        self.intercept = intercept;
        self.display_window = Some(window);

        log::debug!("ingested layer {layer_index}/{depth} (intercept={intercept})");
        Ok(())
    }

    fn check_coordinate(&self, x: u32, y: u32, z: u32) -> Result<()> {
        let checks = [
            ("column", x, self.dimensions.x),
            ("row", y, self.dimensions.y),
            ("layer", z, self.dimensions.z),
        ];
        for (what, index, limit) in checks {
            if index >= limit {
                return Err(VoxcloudError::OutOfRange {
                    what,
                    index: index as usize,
                    limit: limit as usize,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn flatten_unchecked(&self, coord: UVec3) -> usize {
        let w = self.dimensions.x as usize;
        let h = self.dimensions.y as usize;
        coord.x as usize + coord.y as usize * w + coord.z as usize * w * h
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn coordinate_unchecked(&self, index: usize) -> UVec3 {
        let w = self.dimensions.x as usize;
        let h = self.dimensions.y as usize;
        UVec3::new((index % w) as u32, ((index / w) % h) as u32, (index / (w * h)) as u32)
    }

    pub(crate) fn value_at(&self, coord: UVec3) -> Intensity {
        self.samples[self.flatten_unchecked(coord)]
    }
}

fn voxel_count(width: u32, height: u32, depth: u32) -> Result<usize> {
    let invalid = VoxcloudError::InvalidDimensions {
        width,
        height,
        depth,
    };
    if width == 0 || height == 0 || depth == 0 {
        return Err(invalid);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(depth as usize))
        .ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_zero_filled() {
        let grid = VoxelGrid::new(3, 4, 5).unwrap();
        assert_eq!(grid.num_voxels(), 60);
        assert!(grid.samples().iter().all(|&v| v == 0));
        assert_eq!(grid.spacing(), Vec3::ONE);
        assert!(grid.display_window().is_none());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        for (w, h, d) in [(0, 1, 1), (1, 0, 1), (1, 1, 0)] {
            assert!(matches!(
                VoxelGrid::new(w, h, d),
                Err(VoxcloudError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_from_samples_size_mismatch() {
        let result = VoxelGrid::from_samples(2, 2, 2, vec![0; 7]);
        assert!(matches!(
            result,
            Err(VoxcloudError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_invalid_spacing_rejected() {
        let mut grid = VoxelGrid::new(1, 1, 1).unwrap();
        assert!(grid.set_spacing(Vec3::new(1.0, 0.0, 1.0)).is_err());
        assert!(grid.set_spacing(Vec3::new(1.0, f32::NAN, 1.0)).is_err());
        assert!(grid.set_spacing(Vec3::new(0.5, 0.5, 2.0)).is_ok());
        assert_eq!(grid.spacing(), Vec3::new(0.5, 0.5, 2.0));
    }

    #[test]
    fn test_indexing_is_column_fastest() {
        let grid = VoxelGrid::from_samples(2, 3, 2, (0..12).collect()).unwrap();
        assert_eq!(grid.get_value(1, 0, 0).unwrap(), 1);
        assert_eq!(grid.get_value(0, 1, 0).unwrap(), 2);
        assert_eq!(grid.get_value(0, 0, 1).unwrap(), 6);
        assert_eq!(grid.get_value(1, 2, 1).unwrap(), 11);
        assert_eq!(grid.get_coordinate(11).unwrap(), UVec3::new(1, 2, 1));
    }

    #[test]
    fn test_out_of_range_access() {
        let grid = VoxelGrid::new(2, 2, 2).unwrap();
        assert!(matches!(
            grid.get_value(2, 0, 0),
            Err(VoxcloudError::OutOfRange { what: "column", .. })
        ));
        assert!(matches!(
            grid.get_value(0, 0, 2),
            Err(VoxcloudError::OutOfRange { what: "layer", .. })
        ));
        assert!(grid.get_coordinate(8).is_err());
        assert!(grid.flatten_index(0, 5, 0).is_err());
    }

    #[test]
    fn test_contains() {
        let grid = VoxelGrid::new(2, 3, 4).unwrap();
        assert!(grid.contains(IVec3::new(0, 0, 0)));
        assert!(grid.contains(IVec3::new(1, 2, 3)));
        assert!(!grid.contains(IVec3::new(-1, 0, 0)));
        assert!(!grid.contains(IVec3::new(2, 0, 0)));
        assert!(!grid.contains(IVec3::new(0, 0, 4)));
    }

    #[test]
    fn test_set_layer_remaps_and_touches_one_slice() {
        let mut grid = VoxelGrid::new(2, 2, 3).unwrap();
        let window = Window::from_center_width(40.0, 400.0);
        // 2^15 - (-1024) = 33792
        let layer = [33792_u16, 33793, 34792, 32768];
        grid.set_layer(&layer, 1, window, -1024.0).unwrap();

        assert_eq!(&grid.samples()[4..8], &[0, 1, 1000, -1024]);
        assert!(grid.samples()[..4].iter().all(|&v| v == 0));
        assert!(grid.samples()[8..].iter().all(|&v| v == 0));
        assert_eq!(grid.display_window(), Some(window));
        assert_eq!(grid.intercept(), -1024.0);
    }

    #[test]
    fn test_set_layer_rounds_fractional_intercept() {
        let mut grid = VoxelGrid::new(1, 1, 1).unwrap();
        grid.set_layer(&[32768], 0, Window::default(), 0.6).unwrap();
        assert_eq!(grid.samples()[0], 1);
    }

    #[test]
    fn test_set_layer_errors_leave_grid_untouched() {
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        assert!(matches!(
            grid.set_layer(&[1, 2, 3, 4], 2, Window::default(), 0.0),
            Err(VoxcloudError::OutOfRange { what: "layer", index: 2, limit: 2 })
        ));
        assert!(matches!(
            grid.set_layer(&[1, 2, 3], 0, Window::default(), 0.0),
            Err(VoxcloudError::SizeMismatch { expected: 4, actual: 3 })
        ));
        assert!(grid.samples().iter().all(|&v| v == 0));
        assert!(grid.display_window().is_none());
    }

    proptest! {
        #[test]
        fn prop_coordinate_round_trip(w in 1u32..8, h in 1u32..8, d in 1u32..8, seed in any::<usize>()) {
            let grid = VoxelGrid::new(w, h, d).unwrap();
            let index = seed % grid.num_voxels();
            let c = grid.get_coordinate(index).unwrap();
            prop_assert_eq!(grid.flatten_index(c.x, c.y, c.z).unwrap(), index);
        }
    }
}
