//! Neighborhood-based boundary detection for contour mode.

use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

use crate::classify::Category;
use crate::error::Result;
use crate::volume::VoxelGrid;

/// Neighbor-set topology used for the boundary test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Neighborhood {
    /// Face neighbors only.
    #[default]
    Six,
    /// Face and edge neighbors.
    Eighteen,
    /// The full 3x3x3 block minus the center.
    TwentySix,
}

const FACE_OFFSETS: [IVec3; 6] = [
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, 0, -1),
    IVec3::new(0, 0, 1),
];

const EDGE_OFFSETS: [IVec3; 12] = [
    IVec3::new(-1, -1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(-1, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, 1),
    IVec3::new(1, 0, 1),
    IVec3::new(0, -1, -1),
    IVec3::new(0, 1, -1),
    IVec3::new(0, -1, 1),
    IVec3::new(0, 1, 1),
];

const CORNER_OFFSETS: [IVec3; 8] = [
    IVec3::new(-1, -1, -1),
    IVec3::new(1, -1, -1),
    IVec3::new(-1, 1, -1),
    IVec3::new(1, 1, -1),
    IVec3::new(-1, -1, 1),
    IVec3::new(1, -1, 1),
    IVec3::new(-1, 1, 1),
    IVec3::new(1, 1, 1),
];

impl Neighborhood {
    /// Number of neighbors in the full (interior) neighborhood.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Neighborhood::Six => 6,
            Neighborhood::Eighteen => 18,
            Neighborhood::TwentySix => 26,
        }
    }

    /// Iterates over the neighbor offsets, faces first.
    pub fn offsets(self) -> impl Iterator<Item = IVec3> {
        let (edges, corners) = match self {
            Neighborhood::Six => (0, 0),
            Neighborhood::Eighteen => (EDGE_OFFSETS.len(), 0),
            Neighborhood::TwentySix => (EDGE_OFFSETS.len(), CORNER_OFFSETS.len()),
        };
        FACE_OFFSETS
            .into_iter()
            .chain(EDGE_OFFSETS.into_iter().take(edges))
            .chain(CORNER_OFFSETS.into_iter().take(corners))
    }
}

/// Returns true if any in-bounds neighbor of the voxel at `index` is
/// classified differently from `category`.
///
/// Neighbors outside the grid are excluded from the test; they are neither
/// wrapped nor mirrored.
///
/// # Errors
/// [`crate::VoxcloudError::OutOfRange`] if `index` is not a voxel of `grid`.
pub fn is_boundary<F>(
    grid: &VoxelGrid,
    index: usize,
    category: Category,
    classify: F,
    neighborhood: Neighborhood,
) -> Result<bool>
where
    F: Fn(f64) -> Category,
{
    let coord = grid.get_coordinate(index)?;
    Ok(is_boundary_at(grid, coord, category, &classify, neighborhood))
}

pub(crate) fn is_boundary_at<F>(
    grid: &VoxelGrid,
    coord: UVec3,
    category: Category,
    classify: &F,
    neighborhood: Neighborhood,
) -> bool
where
    F: Fn(f64) -> Category,
{
    let center = coord.as_ivec3();
    neighborhood
        .offsets()
        .map(|offset| center + offset)
        .filter(|&neighbor| grid.contains(neighbor))
        .any(|neighbor| {
            let value = grid.value_at(neighbor.as_uvec3());
            classify(f64::from(value)) != category
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_banded;
    use std::collections::HashSet;

    const ALL: [Neighborhood; 3] = [
        Neighborhood::Six,
        Neighborhood::Eighteen,
        Neighborhood::TwentySix,
    ];

    #[test]
    fn test_offset_sets() {
        for neighborhood in ALL {
            let offsets: HashSet<IVec3> = neighborhood.offsets().collect();
            assert_eq!(offsets.len(), neighborhood.size());
            assert!(!offsets.contains(&IVec3::ZERO));
            for offset in &offsets {
                let manhattan = offset.abs().element_sum();
                match neighborhood {
                    Neighborhood::Six => assert_eq!(manhattan, 1),
                    Neighborhood::Eighteen => assert!(manhattan <= 2),
                    Neighborhood::TwentySix => assert!(manhattan <= 3),
                }
            }
        }
    }

    #[test]
    fn test_uniform_volume_has_no_boundary() {
        let grid = VoxelGrid::from_samples(3, 3, 3, vec![500; 27]).unwrap();
        for neighborhood in ALL {
            for index in 0..grid.num_voxels() {
                assert!(!is_boundary(&grid, index, Category::Bone, classify_banded, neighborhood)
                    .unwrap());
            }
        }
    }

    #[test]
    fn test_edge_neighbor_only_seen_by_eighteen_and_up() {
        // Center voxel (1,1,1) is bone; only its edge neighbor (0,0,1) differs.
        let mut samples = vec![500; 27];
        samples[9] = -1000;
        let grid = VoxelGrid::from_samples(3, 3, 3, samples).unwrap();
        let center = grid.flatten_index(1, 1, 1).unwrap();

        let check = |n| is_boundary(&grid, center, Category::Bone, classify_banded, n).unwrap();
        assert!(!check(Neighborhood::Six));
        assert!(check(Neighborhood::Eighteen));
        assert!(check(Neighborhood::TwentySix));
    }

    #[test]
    fn test_corner_neighbor_only_seen_by_twenty_six() {
        let mut samples = vec![500; 27];
        samples[0] = -1000;
        let grid = VoxelGrid::from_samples(3, 3, 3, samples).unwrap();
        let center = grid.flatten_index(1, 1, 1).unwrap();

        let check = |n| is_boundary(&grid, center, Category::Bone, classify_banded, n).unwrap();
        assert!(!check(Neighborhood::Six));
        assert!(!check(Neighborhood::Eighteen));
        assert!(check(Neighborhood::TwentySix));
    }

    #[test]
    fn test_outside_neighbors_are_ignored() {
        let grid = VoxelGrid::from_samples(1, 1, 1, vec![500]).unwrap();
        for neighborhood in ALL {
            assert!(!is_boundary(&grid, 0, Category::Bone, classify_banded, neighborhood).unwrap());
        }
    }

    #[test]
    fn test_invalid_index() {
        let grid = VoxelGrid::new(2, 2, 2).unwrap();
        assert!(is_boundary(&grid, 8, Category::Background, classify_banded, Neighborhood::Six)
            .is_err());
    }
}
