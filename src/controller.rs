//! The contract shared by camera input controllers.

use std::fmt;

use crate::input::InputEvent;

/// Size of the surface a controller listens on, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSize {
    pub width: f64,
    pub height: f64,
}

impl TargetSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub(crate) fn resolve(self) -> Result<Self, ControllerError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ControllerError::UnresolvedTarget {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Errors raised while wiring a controller up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerError {
    /// The event target has no usable area to measure pointer motion against.
    UnresolvedTarget { width: f64, height: f64 },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::UnresolvedTarget { width, height } => write!(
                f,
                "failed to resolve event target: {}x{} has no area",
                width, height
            ),
        }
    }
}

impl std::error::Error for ControllerError {}

/// An input controller that turns events into camera deltas.
///
/// Events only reach a controller between [`attach`](Self::attach) and
/// [`dispose`](Self::dispose). The owning camera calls
/// [`update`](Self::update) once per frame and consumes whatever it produced.
pub trait CameraController {
    /// Starts listening on a target of the given size.
    fn attach(&mut self, target: TargetSize) -> Result<(), ControllerError>;

    /// Tracks a new target size. Zero-sized targets (minimised windows) are
    /// ignored.
    fn resize(&mut self, target: TargetSize);

    fn handle_event(&mut self, event: &InputEvent);

    /// Applies queued input. Returns `false` when there was nothing to do.
    fn update(&mut self) -> bool;

    /// Drops in-flight input state and releases pointer lock. Safe to call
    /// repeatedly.
    fn cancel(&mut self);

    /// Stops listening and cancels.
    fn dispose(&mut self);

    fn is_attached(&self) -> bool;
    fn is_active(&self) -> bool;
    fn is_enabled(&self) -> bool;
    fn is_dirty(&self) -> bool;
}
