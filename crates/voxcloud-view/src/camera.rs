//! Camera and view management.
//!
//! The view is an accumulated orbit/pan matrix, a zoom level on a log2 scale
//! and a projection. All matrices are column-major and follow OpenGL clip
//! space conventions.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Orbit angle per pixel of pointer motion, in degrees.
pub const ORBIT_DEGREES_PER_PIXEL: f32 = 0.5;

/// Pan distance per pixel of pointer motion.
pub const PAN_UNITS_PER_PIXEL: f32 = 0.001;

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectionMode {
    /// Orthographic projection.
    #[default]
    Orthographic,
    /// Perspective projection.
    Perspective,
}

/// A projection together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Symmetric view box; the half-size is divided by `2^log2_zoom`.
    Orthographic { half_size: f32 },
    /// Fixed frustum; zoom dollies the camera along its view axis.
    Perspective { fov_y: f32, near: f32, far: f32 },
}

impl Projection {
    /// Unit view box around the origin.
    pub const ORTHOGRAPHIC: Self = Projection::Orthographic { half_size: 1.0 };

    /// 90 degree vertical field of view, near 0.5, far 5.0.
    pub const PERSPECTIVE: Self = Projection::Perspective {
        fov_y: std::f32::consts::FRAC_PI_2,
        near: 0.5,
        far: 5.0,
    };

    /// Returns the default projection for a mode.
    #[must_use]
    pub fn for_mode(mode: ProjectionMode) -> Self {
        match mode {
            ProjectionMode::Orthographic => Self::ORTHOGRAPHIC,
            ProjectionMode::Perspective => Self::PERSPECTIVE,
        }
    }

    /// Returns the mode of this projection.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Projection::Orthographic { .. } => ProjectionMode::Orthographic,
            Projection::Perspective { .. } => ProjectionMode::Perspective,
        }
    }

    /// Computes the projection matrix for a viewport aspect (width / height).
    #[must_use]
    pub fn compute_projection(&self, aspect_ratio: f32, log2_zoom: f32) -> Mat4 {
        match *self {
            Projection::Orthographic { half_size } => {
                let h = half_size * (-log2_zoom).exp2();
                Mat4::from_scale(Vec3::new(1.0, aspect_ratio, 1.0))
                    * Mat4::orthographic_rh_gl(-h, h, -h, h, -h, h)
            }
            Projection::Perspective { fov_y, near, far } => {
                Mat4::perspective_rh_gl(fov_y, aspect_ratio, near, far)
            }
        }
    }

    /// Camera placement applied before the accumulated transform.
    #[must_use]
    pub fn camera_offset(&self, log2_zoom: f32) -> Mat4 {
        match self {
            Projection::Orthographic { .. } => Mat4::IDENTITY,
            Projection::Perspective { .. } => {
                Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0 * (1.0 - log2_zoom)))
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::ORTHOGRAPHIC
    }
}

/// Accumulated orbit/pan transform with log-scale zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    transform: Mat4,
    log2_zoom: f32,
    projection: Projection,
}

impl ViewTransform {
    /// Creates an identity view with the given projection mode.
    #[must_use]
    pub fn new(mode: ProjectionMode) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            log2_zoom: 0.0,
            projection: Projection::for_mode(mode),
        }
    }

    /// Returns the accumulated orbit/pan transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Returns the zoom level (positive zooms in).
    #[must_use]
    pub fn log2_zoom(&self) -> f32 {
        self.log2_zoom
    }

    /// Returns the current projection.
    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Returns the current projection mode.
    #[must_use]
    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection.mode()
    }

    /// Switches projection mode, resetting its parameters to the defaults.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        if self.projection.mode() != mode {
            self.projection = Projection::for_mode(mode);
            log::debug!("projection mode set to {mode:?}");
        }
    }

    /// Rotates about the screen axes by half a degree per pixel.
    ///
    /// Horizontal motion turns about the up axis, vertical motion about the
    /// right axis. The rotation is applied in screen space, on top of the
    /// accumulated transform.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let yaw = (ORBIT_DEGREES_PER_PIXEL * dx).to_radians();
        let pitch = (ORBIT_DEGREES_PER_PIXEL * dy).to_radians();
        let rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
        self.transform = Mat4::from_quat(rotation) * self.transform;
    }

    /// Translates in screen space; screen y grows downwards.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let offset = Vec3::new(dx, -dy, 0.0) * PAN_UNITS_PER_PIXEL;
        self.transform = Mat4::from_translation(offset) * self.transform;
    }

    /// Adds `delta` to the log2 zoom level.
    pub fn zoom(&mut self, delta: f32) {
        self.log2_zoom += delta;
    }

    /// Half-size of the orthographic view box at the current zoom, or `None`
    /// under perspective, where zoom moves the camera instead.
    #[must_use]
    pub fn view_half_size(&self) -> Option<f32> {
        match self.projection {
            Projection::Orthographic { half_size } => Some(half_size * (-self.log2_zoom).exp2()),
            Projection::Perspective { .. } => None,
        }
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection.compute_projection(aspect_ratio, self.log2_zoom)
    }

    /// Returns the model-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.projection.camera_offset(self.log2_zoom) * self.transform
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Restores the identity transform and zoom level 0.
    pub fn reset(&mut self) {
        self.transform = Mat4::IDENTITY;
        self.log2_zoom = 0.0;
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ProjectionMode::Orthographic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_defaults() {
        let view = ViewTransform::default();
        assert_eq!(view.transform(), Mat4::IDENTITY);
        assert_eq!(view.log2_zoom(), 0.0);
        assert_eq!(view.projection_mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn test_orbit_horizontal_turns_about_up_axis() {
        let mut view = ViewTransform::default();
        view.orbit(180.0, 0.0); // 90 degrees
        let x = view.transform().transform_vector3(Vec3::X);
        assert!(approx(x, Vec3::NEG_Z));
        let y = view.transform().transform_vector3(Vec3::Y);
        assert!(approx(y, Vec3::Y));
    }

    #[test]
    fn test_orbit_vertical_turns_about_right_axis() {
        let mut view = ViewTransform::default();
        view.orbit(0.0, 180.0);
        let y = view.transform().transform_vector3(Vec3::Y);
        assert!(approx(y, Vec3::Z));
    }

    #[test]
    fn test_pan_is_screen_space() {
        let mut view = ViewTransform::default();
        view.orbit(180.0, 0.0);
        view.pan(100.0, 50.0);
        // Pre-multiplied: the translation is not rotated by the orbit.
        let origin = view.transform().transform_point3(Vec3::ZERO);
        assert!(approx(origin, Vec3::new(0.1, -0.05, 0.0)));
    }

    #[test]
    fn test_zoom_is_additive() {
        let mut view = ViewTransform::default();
        view.zoom(1.0);
        view.zoom(0.5);
        assert_eq!(view.log2_zoom(), 1.5);
        view.reset();
        assert_eq!(view.log2_zoom(), 0.0);
    }

    #[test]
    fn test_orthographic_half_size() {
        let mut view = ViewTransform::default();
        view.zoom(1.0);
        assert!((view.view_half_size().unwrap() - 0.5).abs() < 1e-6);

        let proj = view.projection_matrix(1.0);
        let clip = proj * Vec4::new(0.5, 0.0, 0.0, 1.0);
        assert!((clip.x - 1.0).abs() < 1e-6);
        assert!((proj.w_axis.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthographic_aspect_scales_vertical_axis() {
        let view = ViewTransform::default();
        let proj = view.projection_matrix(2.0);
        let clip = proj * Vec4::new(0.0, 0.25, 0.0, 1.0);
        assert!((clip.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_dolly() {
        let mut view = ViewTransform::new(ProjectionMode::Perspective);
        let clip = view.view_projection_matrix(1.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.w - 2.0).abs() < 1e-5);

        view.zoom(0.5);
        let clip = view.view_projection_matrix(1.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_fov_is_ninety_degrees() {
        let proj = Projection::PERSPECTIVE.compute_projection(1.0, 0.0);
        // cot(45 degrees) == 1
        assert!((proj.x_axis.x - 1.0).abs() < 1e-5);
        assert!((proj.y_axis.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_projection_mode() {
        let mut view = ViewTransform::default();
        view.set_projection_mode(ProjectionMode::Perspective);
        assert_eq!(view.projection(), Projection::PERSPECTIVE);
        assert_eq!(view.view_matrix(), Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)));
        assert_eq!(view.view_half_size(), None);
    }
}
