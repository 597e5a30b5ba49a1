//! Orbiting a camera around a target point with pointer drags and the wheel.
//!
//! The controller keeps a target and a [`Spherical`] offset from it. Input
//! events only accumulate deltas; [`OrbitController::update`] applies them
//! once per frame and recomputes the camera position from spherical state
//! (nothing is accumulated incrementally, so there is no drift).
//!
//! Controls:
//!
//! - **Primary drag**: rotate around the target
//! - **Secondary / middle drag**: pan the target
//! - **Wheel**: zoom
//! - **Escape / focus loss**: cancel
//!
//! While the pointer is locked the cursor stops moving, so drags are driven
//! by [`InputEvent::PointerMotion`] instead of cursor positions.
//!
//! # Example
//!
//! ```
//! use stagehand::{CameraController, DVec2, DVec3, InputEvent, OrbitConfig, OrbitController, PointerButton, TargetSize};
//!
//! let mut orbit = OrbitController::new(OrbitConfig::new().target(DVec3::ZERO));
//! orbit.attach(TargetSize::new(800.0, 600.0)).unwrap();
//! orbit.sync_from_camera(DVec3::new(0.0, 0.0, 10.0));
//!
//! orbit.handle_event(&InputEvent::PointerDown { position: DVec2::ZERO, button: PointerButton::Primary });
//! orbit.handle_event(&InputEvent::PointerMove { position: DVec2::new(40.0, 0.0) });
//! assert!(orbit.update());
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DVec2, DVec3};

use crate::controller::{CameraController, ControllerError, TargetSize};
use crate::input::{InputEvent, Key, PointerButton};
use crate::logging::trace_call;
use crate::pointer_lock::{PointerCapture, PointerLock};
use crate::spherical::{Spherical, SphericalDelta};

/// Bounds of the zoom accumulator between updates.
const MIN_SCALE: f64 = 0.01;
const MAX_SCALE: f64 = 100.0;
/// Zoom step applied per wheel notch.
const WHEEL_STEP: f64 = 0.1;

/// Settings for an [`OrbitController`].
#[derive(Clone, Debug)]
pub struct OrbitConfig {
    /// Point to orbit around.
    pub target: DVec3,
    /// Ignore all input and updates when `false`.
    pub enabled: bool,
    /// Rotation speed multiplier. At 1, dragging across the full target width
    /// turns one full revolution.
    pub speed: f64,
    /// Zoom speed multiplier.
    pub zoom_speed: f64,
    /// Pan speed multiplier.
    pub pan_speed: f64,
    /// Closest the camera may get to the target.
    pub min_distance: f64,
    /// Farthest the camera may get from the target.
    pub max_distance: f64,
    /// Grab the pointer while dragging.
    pub capture_pointer_lock: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: DVec3::ZERO,
            enabled: true,
            speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.01,
            max_distance: 100_000.0,
            capture_pointer_lock: false,
        }
    }
}

impl OrbitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point to orbit around. Defaults to the origin.
    pub fn target(mut self, target: impl Into<DVec3>) -> Self {
        self.target = target.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    pub fn pan_speed(mut self, pan_speed: f64) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    /// Clamp the camera's distance from the target to `[min, max]`.
    pub fn distance_limits(mut self, min: f64, max: f64) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    pub fn capture_pointer_lock(mut self, capture: bool) -> Self {
        self.capture_pointer_lock = capture;
        self
    }
}

/// What an in-progress drag does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Turns pointer drags and wheel input into an orbit around a target.
#[derive(Debug)]
pub struct OrbitController {
    target: DVec3,
    enabled: bool,
    speed: f64,
    zoom_speed: f64,
    pan_speed: f64,
    min_distance: f64,
    max_distance: f64,

    spherical: Spherical,
    spherical_delta: SphericalDelta,
    scale: f64,
    pan_offset: DVec3,
    pointer_start: DVec2,
    drag: Option<DragMode>,
    zoom_dirty: bool,
    dirty: bool,

    attached: bool,
    target_size: TargetSize,
    capture: PointerCapture,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            target: config.target,
            enabled: config.enabled,
            speed: config.speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            spherical: Spherical::default(),
            spherical_delta: SphericalDelta::default(),
            scale: 1.0,
            pan_offset: DVec3::ZERO,
            pointer_start: DVec2::ZERO,
            drag: None,
            zoom_dirty: false,
            dirty: false,
            attached: false,
            target_size: TargetSize::new(1.0, 1.0),
            capture: PointerCapture::new(config.capture_pointer_lock),
        }
    }

    /// Supplies the pointer lock used when `capture_pointer_lock` is set.
    pub fn with_pointer_lock(mut self, lock: impl PointerLock + 'static) -> Self {
        self.set_pointer_lock(lock);
        self
    }

    pub fn set_pointer_lock(&mut self, lock: impl PointerLock + 'static) {
        self.capture.set_lock(Box::new(lock));
    }

    /// Point the camera orbits around, as of the last update.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Moves the target, keeping the camera's offset from it. Takes effect
    /// on the next update.
    pub fn set_target(&mut self, target: DVec3) {
        self.pan(target - (self.target + self.pan_offset));
    }

    /// Queues a world-space shift of the target.
    pub fn pan(&mut self, offset: DVec3) {
        self.pan_offset += offset;
    }

    /// Camera position implied by the current target and spherical state.
    pub fn position(&self) -> DVec3 {
        self.target + self.spherical.to_vec3()
    }

    /// Offset of the camera from the target.
    pub fn spherical(&self) -> &Spherical {
        &self.spherical
    }

    /// Rotation queued by drags since the last update.
    pub fn spherical_delta(&self) -> &SphericalDelta {
        &self.spherical_delta
    }

    /// Pending zoom factor, reset to 1 by every update.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether a zoom is waiting for the next update.
    pub fn is_zoom_dirty(&self) -> bool {
        self.zoom_dirty
    }

    /// The drag in progress, if any.
    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag
    }

    /// Rotation speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Changes the rotation speed for subsequent drags.
    ///
    /// ```
    /// # use stagehand::{OrbitConfig, OrbitController};
    /// let mut orbit = OrbitController::new(OrbitConfig::default());
    /// orbit.set_speed(0.5);
    /// assert_eq!(orbit.speed(), 0.5);
    /// ```
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Turns the controller on or off. Disabling drops any queued motion.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.enabled {
            self.cancel();
        }
        self.enabled = enabled;
    }

    /// Whether drags still try to lock the pointer. Turns `false` for good
    /// after the first rejected request.
    pub fn capture_pointer_lock(&self) -> bool {
        self.capture.enabled()
    }

    /// Re-derives spherical state from where the camera actually is.
    ///
    /// The camera calls this after every update so that movement from other
    /// controllers never makes the orbit snap back.
    pub fn sync_from_camera(&mut self, camera_position: DVec3) {
        self.spherical.set_from_vectors(camera_position, self.target);
    }

    /// Acknowledges the last update; called by the camera after it copies
    /// [`position`](Self::position).
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Queues a zoom step. Positive `delta` moves toward the target.
    ///
    /// Zoom is honoured by the next update even when no drag is active.
    /// Ignored while the controller is disabled.
    pub fn zoom(&mut self, delta: f64) {
        trace_call!("OrbitController::zoom({})", delta);
        if !self.enabled {
            return;
        }
        self.scale *= 1.0 - delta * self.zoom_speed;
        self.scale = self.scale.clamp(MIN_SCALE, MAX_SCALE);
        self.zoom_dirty = true;
    }

    fn has_pending(&self) -> bool {
        self.zoom_dirty || !self.spherical_delta.is_zero() || self.pan_offset != DVec3::ZERO
    }

    fn on_pointer_down(&mut self, position: DVec2, button: PointerButton) {
        if self.drag.is_some() {
            return;
        }
        let mode = match button {
            PointerButton::Primary => DragMode::Rotate,
            PointerButton::Secondary | PointerButton::Auxiliary => DragMode::Pan,
            PointerButton::Other => return,
        };

        self.drag = Some(mode);
        self.pointer_start = position;
        log::debug!("orbit drag started: {:?}", mode);

        self.capture.capture("OrbitController");
    }

    fn on_pointer_move(&mut self, position: DVec2) {
        let delta = position - self.pointer_start;
        self.pointer_start = position;
        // A locked cursor reports relative motion instead.
        if !self.capture.held() {
            self.drag_by(delta);
        }
    }

    fn on_pointer_motion(&mut self, delta: DVec2) {
        if self.capture.held() {
            self.drag_by(delta);
        }
    }

    fn drag_by(&mut self, delta: DVec2) {
        let Some(mode) = self.drag else {
            return;
        };

        match mode {
            DragMode::Rotate => {
                self.spherical_delta.theta -= (TAU * delta.x / self.target_size.width) * self.speed;
                self.spherical_delta.phi -= (PI * delta.y / self.target_size.height) * self.speed;
                self.spherical_delta.phi = self.spherical_delta.phi.clamp(-FRAC_PI_2, FRAC_PI_2);
            }
            DragMode::Pan => {
                let offset = self.pan_vector(delta);
                self.pan(offset);
            }
        }
    }

    fn on_pointer_up(&mut self) {
        if self.drag.take().is_some() {
            log::debug!("orbit drag ended");
            self.capture.release();
        }
    }

    /// World offset that drags the scene along with the pointer.
    fn pan_vector(&self, pixels: DVec2) -> DVec3 {
        let forward = -self.spherical.to_vec3().normalize_or_zero();
        let right = forward.cross(DVec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let world_per_pixel = self.spherical.radius * self.pan_speed / self.target_size.height;

        (right * -pixels.x + up * pixels.y) * world_per_pixel
    }
}

impl CameraController for OrbitController {
    fn attach(&mut self, target: TargetSize) -> Result<(), ControllerError> {
        self.target_size = target.resolve()?;
        self.attached = true;
        log::debug!(
            "orbit controller attached to {}x{} target",
            target.width,
            target.height
        );
        Ok(())
    }

    fn resize(&mut self, target: TargetSize) {
        if target.is_valid() {
            self.target_size = target;
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if !self.attached || !self.enabled {
            return;
        }

        match *event {
            InputEvent::PointerDown { position, button } => self.on_pointer_down(position, button),
            InputEvent::PointerMove { position } => self.on_pointer_move(position),
            InputEvent::PointerMotion { delta } => self.on_pointer_motion(delta),
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::Wheel { delta_y } if delta_y > 0.0 => self.zoom(WHEEL_STEP),
            InputEvent::Wheel { delta_y } if delta_y < 0.0 => self.zoom(-WHEEL_STEP),
            InputEvent::KeyDown(Key::Escape) | InputEvent::Blur => self.cancel(),
            _ => {}
        }
    }

    /// Applies queued rotation, zoom and pan.
    ///
    /// No-op when disabled, or when no drag is active and nothing is queued.
    fn update(&mut self) -> bool {
        trace_call!("OrbitController::update");
        if !self.enabled {
            return false;
        }
        if self.drag.is_none() && !self.has_pending() {
            return false;
        }

        self.spherical.theta += self.spherical_delta.theta;
        let phi = self.spherical.phi() + self.spherical_delta.phi;
        self.spherical.set_phi(phi);

        self.spherical.radius =
            (self.spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset;

        self.spherical_delta.reset();
        self.scale = 1.0;
        self.pan_offset = DVec3::ZERO;
        self.zoom_dirty = false;

        self.dirty = true;
        true
    }

    fn cancel(&mut self) {
        trace_call!("OrbitController::cancel");
        if self.drag.take().is_some() {
            log::debug!("orbit drag cancelled");
        }
        self.spherical_delta.reset();
        self.scale = 1.0;
        self.pan_offset = DVec3::ZERO;
        self.zoom_dirty = false;
        self.capture.release();
    }

    fn dispose(&mut self) {
        self.cancel();
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer_lock::testing::FakeLock;
    use approx::assert_abs_diff_eq;

    fn orbit_at(position: DVec3, config: OrbitConfig) -> OrbitController {
        let mut orbit = OrbitController::new(config);
        orbit.attach(TargetSize::new(500.0, 400.0)).unwrap();
        orbit.sync_from_camera(position);
        orbit
    }

    fn press(orbit: &mut OrbitController, x: f64, y: f64, button: PointerButton) {
        orbit.handle_event(&InputEvent::PointerDown {
            position: DVec2::new(x, y),
            button,
        });
    }

    fn drag_to(orbit: &mut OrbitController, x: f64, y: f64) {
        orbit.handle_event(&InputEvent::PointerMove {
            position: DVec2::new(x, y),
        });
    }

    #[test]
    fn horizontal_drag_turns_theta() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        assert_abs_diff_eq!(orbit.spherical().phi(), FRAC_PI_2, epsilon = 1e-12);

        press(&mut orbit, 100.0, 100.0, PointerButton::Primary);
        drag_to(&mut orbit, 150.0, 100.0);

        let expected = -(TAU * 50.0 / 500.0);
        assert_abs_diff_eq!(orbit.spherical_delta().theta, expected, epsilon = 1e-12);
        assert_eq!(orbit.spherical_delta().phi, 0.0);

        assert!(orbit.update());
        assert_abs_diff_eq!(orbit.spherical().theta, expected, epsilon = 1e-12);
        assert!(orbit.spherical_delta().is_zero());
        assert!(orbit.is_dirty());
        assert_abs_diff_eq!(orbit.position().length(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn vertical_delta_is_clamped_per_move() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        drag_to(&mut orbit, 0.0, 4000.0);
        assert_eq!(orbit.spherical_delta().phi, -FRAC_PI_2);

        orbit.update();
        let phi = orbit.spherical().phi();
        assert!(phi >= crate::spherical::EPSILON);
    }

    #[test]
    fn zoom_without_drag_still_updates() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        orbit.zoom(0.1);
        assert_abs_diff_eq!(orbit.scale(), 0.9, epsilon = 1e-12);
        assert!(orbit.is_zoom_dirty());
        assert!(!orbit.is_active());

        assert!(orbit.update());
        assert_abs_diff_eq!(orbit.spherical().radius, 9.0, epsilon = 1e-12);
        assert_eq!(orbit.scale(), 1.0);
        assert!(!orbit.is_zoom_dirty());

        assert!(!orbit.update());
    }

    #[test]
    fn zoom_scale_is_bounded() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        for _ in 0..200 {
            orbit.zoom(0.5);
        }
        assert_eq!(orbit.scale(), MIN_SCALE);

        orbit.update();
        for _ in 0..200 {
            orbit.zoom(-5.0);
        }
        assert_eq!(orbit.scale(), MAX_SCALE);
    }

    #[test]
    fn wheel_direction_maps_to_zoom_sign() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        orbit.handle_event(&InputEvent::Wheel { delta_y: 3.0 });
        assert!(orbit.scale() < 1.0);
        orbit.update();

        orbit.handle_event(&InputEvent::Wheel { delta_y: -3.0 });
        assert!(orbit.scale() > 1.0);

        orbit.update();
        orbit.handle_event(&InputEvent::Wheel { delta_y: 0.0 });
        assert!(!orbit.is_zoom_dirty());
    }

    #[test]
    fn radius_respects_distance_limits() {
        let mut orbit = orbit_at(
            DVec3::new(0.0, 0.0, 10.0),
            OrbitConfig::new().distance_limits(5.0, 20.0),
        );
        orbit.zoom(0.99);
        orbit.update();
        assert_eq!(orbit.spherical().radius, 5.0);
    }

    #[test]
    fn idle_controller_does_not_update() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        assert!(!orbit.update());
        assert!(!orbit.is_dirty());
    }

    #[test]
    fn disabled_controller_ignores_everything() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::new().enabled(false));
        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        assert!(!orbit.is_active());
        orbit.zoom(0.1);
        assert!(!orbit.update());
    }

    #[test]
    fn zoom_while_disabled_is_dropped() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        orbit.set_enabled(false);
        orbit.zoom(0.1);
        assert_eq!(orbit.scale(), 1.0);
        assert!(!orbit.is_zoom_dirty());

        orbit.set_enabled(true);
        assert!(!orbit.update());
        assert_eq!(orbit.spherical().radius, 10.0);
    }

    #[test]
    fn disabling_discards_queued_zoom() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        orbit.zoom(0.1);
        orbit.set_enabled(false);
        orbit.set_enabled(true);
        assert!(!orbit.update());
    }

    #[test]
    fn detached_controller_ignores_events() {
        let mut orbit = OrbitController::new(OrbitConfig::default());
        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        assert!(!orbit.is_active());
    }

    #[test]
    fn release_then_update_keeps_last_motion() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        drag_to(&mut orbit, 25.0, 0.0);
        orbit.handle_event(&InputEvent::PointerUp {
            position: DVec2::new(25.0, 0.0),
            button: PointerButton::Primary,
        });
        assert!(!orbit.is_active());
        assert!(orbit.update());
        assert!(orbit.spherical().theta < 0.0);
    }

    #[test]
    fn blur_and_escape_cancel() {
        for event in [InputEvent::Blur, InputEvent::KeyDown(Key::Escape)] {
            let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
            press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
            drag_to(&mut orbit, 30.0, 10.0);
            orbit.handle_event(&event);

            assert!(!orbit.is_active());
            assert!(orbit.spherical_delta().is_zero());
            assert!(!orbit.update());
        }
    }

    #[test]
    fn secondary_drag_pans_target() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        press(&mut orbit, 200.0, 200.0, PointerButton::Secondary);
        assert_eq!(orbit.drag_mode(), Some(DragMode::Pan));
        drag_to(&mut orbit, 240.0, 200.0);
        orbit.update();

        // Looking down -Z, dragging right slides the target toward -X.
        assert!(orbit.target().x < 0.0);
        assert_abs_diff_eq!(orbit.target().y, 0.0, epsilon = 1e-12);
        // Pan moves camera and target together.
        assert_abs_diff_eq!(orbit.position().x, orbit.target().x, epsilon = 1e-9);
    }

    #[test]
    fn set_target_keeps_offset() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        orbit.set_target(DVec3::new(1.0, 2.0, 3.0));
        assert!(orbit.update());
        assert_eq!(orbit.target(), DVec3::new(1.0, 2.0, 3.0));
        let p = orbit.position();
        assert_abs_diff_eq!(p.z, 13.0, epsilon = 1e-9);
    }

    #[test]
    fn pointer_lock_failure_disables_capture() {
        let lock = FakeLock {
            reject: true,
            ..Default::default()
        };
        let mut orbit = orbit_at(
            DVec3::new(0.0, 0.0, 10.0),
            OrbitConfig::new().capture_pointer_lock(true),
        );
        orbit = orbit.with_pointer_lock(lock.clone());

        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        assert!(orbit.is_active());
        assert!(!orbit.capture_pointer_lock());

        orbit.handle_event(&InputEvent::PointerUp {
            position: DVec2::ZERO,
            button: PointerButton::Primary,
        });
        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        assert_eq!(lock.requests.get(), 1);
    }

    #[test]
    fn locked_drag_follows_relative_motion() {
        let lock = FakeLock::default();
        let mut orbit = orbit_at(
            DVec3::new(0.0, 0.0, 10.0),
            OrbitConfig::new().capture_pointer_lock(true),
        )
        .with_pointer_lock(lock.clone());

        press(&mut orbit, 100.0, 100.0, PointerButton::Primary);
        assert_eq!(lock.requests.get(), 1);

        // The locked cursor does not drive the drag.
        drag_to(&mut orbit, 150.0, 100.0);
        assert!(orbit.spherical_delta().is_zero());

        orbit.handle_event(&InputEvent::PointerMotion {
            delta: DVec2::new(50.0, 0.0),
        });
        let expected = -(TAU * 50.0 / 500.0);
        assert_abs_diff_eq!(orbit.spherical_delta().theta, expected, epsilon = 1e-12);
    }

    #[test]
    fn unlocked_drag_ignores_relative_motion() {
        let mut orbit = orbit_at(DVec3::new(0.0, 0.0, 10.0), OrbitConfig::default());
        press(&mut orbit, 100.0, 100.0, PointerButton::Primary);

        orbit.handle_event(&InputEvent::PointerMotion {
            delta: DVec2::new(50.0, 0.0),
        });
        assert!(orbit.spherical_delta().is_zero());

        drag_to(&mut orbit, 150.0, 100.0);
        assert!(orbit.spherical_delta().theta < 0.0);
    }

    #[test]
    fn pointer_lock_is_released_on_pointer_up() {
        let lock = FakeLock::default();
        let mut orbit = orbit_at(
            DVec3::new(0.0, 0.0, 10.0),
            OrbitConfig::new().capture_pointer_lock(true),
        )
        .with_pointer_lock(lock.clone());

        press(&mut orbit, 0.0, 0.0, PointerButton::Primary);
        orbit.handle_event(&InputEvent::PointerUp {
            position: DVec2::ZERO,
            button: PointerButton::Primary,
        });
        assert_eq!(lock.requests.get(), 1);
        assert_eq!(lock.exits.get(), 1);
    }
}
