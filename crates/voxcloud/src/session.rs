//! Viewer session: the loaded volume, the control surface and the view.
//!
//! Every control that can change which voxels are drawn triggers a full
//! rebuild of the point list. Alpha and view input never do.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use voxcloud_core::{
    BuildOptions, CategoryMode, DrawablePoint, Neighborhood, PointCloudBuilder, Result,
    VoxcloudError, VoxelGrid, Window,
};
use voxcloud_view::{Modifiers, PointerButton, ProjectionMode, ViewController, ViewTransform};

/// Persistable state of the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerOptions {
    /// Point cloud construction parameters.
    #[serde(flatten)]
    pub build: BuildOptions,

    /// Uniform point alpha in `[0, 1]`.
    pub alpha: f32,

    /// Projection used by the view.
    pub projection_mode: ProjectionMode,
}

impl ViewerOptions {
    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            build: BuildOptions::default(),
            alpha: 0.05,
            projection_mode: ProjectionMode::Orthographic,
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Column-major projection matrix.
    pub projection: [f32; 16],
    /// Column-major model-view matrix.
    pub model_view: [f32; 16],
    /// Points to draw, blended additively with `alpha`.
    pub points: &'a [DrawablePoint],
    /// Uniform point alpha.
    pub alpha: f32,
}

/// A sink for frames, implemented by the drawing backend.
pub trait PointRenderer {
    /// Draws the given frame.
    fn draw(&mut self, frame: &Frame<'_>);
}

/// An interactive viewing session over one volume at a time.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    volume: Option<VoxelGrid>,
    options: ViewerOptions,
    controller: ViewController,
    points: Vec<DrawablePoint>,
}

impl Viewer {
    /// Creates an empty session with the given options.
    #[must_use]
    pub fn new(options: ViewerOptions) -> Self {
        let mut viewer = Self {
            volume: None,
            options,
            controller: ViewController::new(options.projection_mode),
            points: Vec::new(),
        };
        viewer.set_alpha(options.alpha);
        viewer
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Returns the loaded volume, if any.
    #[must_use]
    pub fn volume(&self) -> Option<&VoxelGrid> {
        self.volume.as_ref()
    }

    /// Returns the current point list.
    #[must_use]
    pub fn points(&self) -> &[DrawablePoint] {
        &self.points
    }

    /// Swaps in a new volume and returns the previous one.
    ///
    /// If the new volume carries a display window from ingestion, it becomes
    /// the classification window.
    pub fn replace_volume(&mut self, volume: VoxelGrid) -> Option<VoxelGrid> {
        if let Some(window) = volume.display_window() {
            self.options.build.window = window;
        }
        let dims = volume.dimensions();
        log::info!("volume replaced: {}x{}x{}", dims.x, dims.y, dims.z);
        let previous = self.volume.replace(volume);
        self.rebuild();
        previous
    }

    /// Removes the volume, leaving an empty point list.
    pub fn take_volume(&mut self) -> Option<VoxelGrid> {
        self.points.clear();
        self.volume.take()
    }

    /// Sets the physical voxel spacing of the loaded volume.
    pub fn set_voxel_spacing(&mut self, spacing: Vec3) -> Result<()> {
        let volume = self.volume.as_mut().ok_or(VoxcloudError::NoVolume)?;
        volume.set_spacing(spacing)?;
        self.rebuild();
        Ok(())
    }

    /// Sets the classification window.
    pub fn set_window(&mut self, window: Window) {
        self.update_build(|build| build.window = window);
    }

    /// Moves the window center, keeping its width.
    pub fn set_window_center(&mut self, center: f64) {
        let window = self.options.build.window.with_center(center);
        self.set_window(window);
    }

    /// Resizes the window around its center.
    pub fn set_window_width(&mut self, width: f64) {
        let window = self.options.build.window.with_width(width);
        self.set_window(window);
    }

    /// Enables or disables contour mode.
    pub fn set_contours(&mut self, enabled: bool) {
        self.update_build(|build| build.contours = enabled);
    }

    /// Selects the neighborhood used by contour mode.
    pub fn set_neighborhood(&mut self, neighborhood: Neighborhood) {
        self.update_build(|build| build.neighborhood = neighborhood);
    }

    /// Switches between the binary window test and anatomical bands.
    pub fn set_category_mode(&mut self, mode: CategoryMode) {
        self.update_build(|build| build.category_mode = mode);
    }

    /// Enables or disables hiding of invisible voxels.
    pub fn set_hide_empty(&mut self, hide: bool) {
        self.update_build(|build| build.hide_empty = hide);
    }

    /// Returns the uniform point alpha.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.options.alpha
    }

    /// Sets the uniform point alpha, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) {
        let clamped = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        if clamped != alpha {
            log::warn!("alpha {alpha} clamped to {clamped}");
        }
        self.options.alpha = clamped;
    }

    /// Switches the projection mode of the view.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.options.projection_mode = mode;
        self.controller.view_mut().set_projection_mode(mode);
    }

    /// Returns the current view.
    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        self.controller.view()
    }

    /// Records the keyboard modifier state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.controller.set_modifiers(modifiers);
    }

    /// Forwards a pointer press.
    pub fn pointer_pressed(&mut self, button: PointerButton, pos: Vec2) {
        self.controller.pointer_pressed(button, pos);
    }

    /// Forwards a pointer release.
    pub fn pointer_released(&mut self, button: PointerButton) {
        self.controller.pointer_released(button);
    }

    /// Forwards pointer motion; returns true if a redraw is needed.
    pub fn pointer_moved(&mut self, pos: Vec2) -> bool {
        self.controller.pointer_moved(pos)
    }

    /// Forwards a wheel event in raw wheel units.
    pub fn wheel(&mut self, delta: f32) {
        self.controller.wheel(delta);
    }

    /// Resets orbit, pan and zoom.
    pub fn reset_view(&mut self) {
        self.controller.view_mut().reset();
    }

    /// Rebuilds the point list from scratch and returns the point count.
    pub fn rebuild(&mut self) -> usize {
        self.points = match &self.volume {
            Some(volume) => PointCloudBuilder::new(volume).build(&self.options.build),
            None => Vec::new(),
        };
        self.points.len()
    }

    /// Captures the current frame for a viewport of the given aspect ratio.
    #[must_use]
    pub fn frame(&self, aspect_ratio: f32) -> Frame<'_> {
        let view = self.controller.view();
        Frame {
            projection: view.projection_matrix(aspect_ratio).to_cols_array(),
            model_view: view.view_matrix().to_cols_array(),
            points: &self.points,
            alpha: self.options.alpha,
        }
    }

    /// Hands the current frame to a renderer.
    pub fn render<R: PointRenderer>(&self, renderer: &mut R, aspect_ratio: f32) {
        renderer.draw(&self.frame(aspect_ratio));
    }

    fn update_build(&mut self, apply: impl FnOnce(&mut BuildOptions)) {
        let before = self.options.build;
        apply(&mut self.options.build);
        if self.options.build != before {
            self.rebuild();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let viewer = Viewer::new(ViewerOptions::default());
        assert!(viewer.volume().is_none());
        assert!(viewer.points().is_empty());
        assert!((viewer.alpha() - 0.05).abs() < 1e-6);
        assert_eq!(viewer.view().projection_mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut viewer = Viewer::default();
        viewer.set_alpha(1.5);
        assert_eq!(viewer.alpha(), 1.0);
        viewer.set_alpha(-0.5);
        assert_eq!(viewer.alpha(), 0.0);
        viewer.set_alpha(f32::NAN);
        assert_eq!(viewer.alpha(), 0.0);
    }

    #[test]
    fn test_spacing_without_volume() {
        let mut viewer = Viewer::default();
        assert!(matches!(
            viewer.set_voxel_spacing(Vec3::ONE),
            Err(VoxcloudError::NoVolume)
        ));
    }

    #[test]
    fn test_window_setters() {
        let mut viewer = Viewer::default();
        viewer.set_window(Window::new(0.0, 100.0));
        viewer.set_window_center(200.0);
        assert_eq!(viewer.options().build.window, Window::new(150.0, 250.0));
        viewer.set_window_width(10.0);
        assert_eq!(viewer.options().build.window, Window::new(195.0, 205.0));
    }

    #[test]
    fn test_options_json_round_trip() {
        let mut options = ViewerOptions::default();
        options.build.contours = true;
        options.build.category_mode = CategoryMode::Banded;
        options.projection_mode = ProjectionMode::Perspective;
        let json = options.to_json().unwrap();
        assert!(json.contains("\"contours\": true"));
        assert_eq!(ViewerOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_bad_json_is_reported() {
        assert!(matches!(
            ViewerOptions::from_json("{ not json"),
            Err(VoxcloudError::JsonError(_))
        ));
    }
}
