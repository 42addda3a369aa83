//! Assembling voxel grids from stacks of 2D slices.
//!
//! # Example
//!
//! ```
//! use voxcloud::*;
//!
//! fn main() -> Result<()> {
//!     // Two 2x2 slices of raw 16-bit samples, rescale intercept -1024.
//!     let slices = [[33792_u16; 4], [34292_u16; 4]];
//!     let window = Window::from_center_width(40.0, 400.0);
//!     let grid = volume_from_slices(2, 2, slices.iter().map(|s| &s[..]), window, -1024.0)?;
//!     assert_eq!(grid.get_value(0, 0, 1)?, 500);
//!     Ok(())
//! }
//! ```

use crate::{Result, VoxcloudError, VoxelGrid, Window};

/// Builds a grid from slices of native unsigned samples, in depth order.
///
/// Every slice goes through [`VoxelGrid::set_layer`] with the same window
/// and intercept. The depth is the number of slices.
pub fn volume_from_slices<'a, I>(
    width: u32,
    height: u32,
    slices: I,
    window: Window,
    intercept: f64,
) -> Result<VoxelGrid>
where
    I: IntoIterator<Item = &'a [u16]>,
    I::IntoIter: ExactSizeIterator,
{
    let slices = slices.into_iter();
    let depth = u32::try_from(slices.len()).map_err(|_| VoxcloudError::InvalidDimensions {
        width,
        height,
        depth: u32::MAX,
    })?;
    let mut grid = VoxelGrid::new(width, height, depth)?;
    for (layer_index, slice) in slices.enumerate() {
        grid.set_layer(slice, layer_index, window, intercept)?;
    }
    log::debug!("assembled {width}x{height}x{depth} volume");
    Ok(grid)
}
