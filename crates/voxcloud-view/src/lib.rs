//! View model for voxcloud.
//!
//! This crate provides the camera side of the viewer:
//! - [`ViewTransform`] accumulating orbit and pan, with log-scale zoom
//! - [`Projection`] variants producing OpenGL-style projection matrices
//! - [`ViewController`] mapping pointer and wheel input onto the view

// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod input;

pub use camera::{Projection, ProjectionMode, ViewTransform};
pub use input::{modified_delta, Modifiers, PointerButton, ViewController};
