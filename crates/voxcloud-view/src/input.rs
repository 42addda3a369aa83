//! Pointer, wheel and modifier handling for the view.

use glam::Vec2;

use crate::camera::{ProjectionMode, ViewTransform};

/// Multiplier applied to every delta while the precision modifier is held.
pub const PRECISION_BOOST: f32 = 10.0;

/// Raw wheel units per unit of log2 zoom.
pub const WHEEL_UNITS_PER_ZOOM: f32 = 1000.0;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Modifiers with only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Returns whether the precision-boost modifier (shift) is held.
    #[must_use]
    pub fn precision_boost(&self) -> bool {
        self.shift
    }
}

/// Scales a delta by [`PRECISION_BOOST`] when the boost modifier is held.
#[must_use]
pub fn modified_delta(delta: f32, modifiers: Modifiers) -> f32 {
    if modifiers.precision_boost() {
        delta * PRECISION_BOOST
    } else {
        delta
    }
}

/// Pointer buttons that drive the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Orbits while dragged.
    Primary,
    /// Pans while dragged.
    Secondary,
}

/// Routes pointer and wheel events to a [`ViewTransform`].
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    view: ViewTransform,
    last_pos: Vec2,
    primary_down: bool,
    secondary_down: bool,
    modifiers: Modifiers,
}

impl ViewController {
    /// Creates a controller around an identity view.
    #[must_use]
    pub fn new(mode: ProjectionMode) -> Self {
        Self {
            view: ViewTransform::new(mode),
            ..Self::default()
        }
    }

    /// Returns the controlled view.
    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Returns the controlled view mutably.
    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    /// Records the current modifier state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Returns the current modifier state.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Handles a button press at `pos`; the position becomes the drag origin.
    pub fn pointer_pressed(&mut self, button: PointerButton, pos: Vec2) {
        match button {
            PointerButton::Primary => self.primary_down = true,
            PointerButton::Secondary => self.secondary_down = true,
        }
        self.last_pos = pos;
    }

    /// Handles a button release.
    pub fn pointer_released(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.primary_down = false,
            PointerButton::Secondary => self.secondary_down = false,
        }
    }

    /// Handles pointer motion. Returns true if the view changed.
    ///
    /// The primary button orbits and takes precedence over the secondary
    /// button, which pans.
    pub fn pointer_moved(&mut self, pos: Vec2) -> bool {
        let dx = modified_delta(pos.x - self.last_pos.x, self.modifiers);
        let dy = modified_delta(pos.y - self.last_pos.y, self.modifiers);
        self.last_pos = pos;

        if self.primary_down {
            self.view.orbit(dx, dy);
            true
        } else if self.secondary_down {
            self.view.pan(dx, dy);
            true
        } else {
            false
        }
    }

    /// Handles a wheel event in raw wheel units (120 per notch on most mice).
    pub fn wheel(&mut self, delta: f32) {
        let delta = modified_delta(delta / WHEEL_UNITS_PER_ZOOM, self.modifiers);
        self.view.zoom(delta);
        log::debug!("log2 zoom now {:.3}", self.view.log2_zoom());
    }
}
