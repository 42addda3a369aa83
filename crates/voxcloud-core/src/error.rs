//! Error types for voxcloud.

use glam::Vec3;
use thiserror::Error;

/// The main error type for voxcloud operations.
#[derive(Error, Debug)]
pub enum VoxcloudError {
    /// A voxel grid was requested with a zero (or overflowing) dimension.
    #[error("invalid grid dimensions {width}x{height}x{depth}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        depth: u32,
    },

    /// Voxel spacing must be finite and strictly positive on every axis.
    #[error("invalid voxel spacing {0}")]
    InvalidSpacing(Vec3),

    /// An index or coordinate fell outside the volume.
    #[error("{what} {index} is outside of volume (limit={limit})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The operation needs a loaded volume.
    #[error("no volume loaded")]
    NoVolume,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for voxcloud operations.
pub type Result<T> = std::result::Result<T, VoxcloudError>;
