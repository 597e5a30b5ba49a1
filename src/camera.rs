//! A perspective camera driven by optional orbit and WASD controllers.
//!
//! The camera's [`Transform`] is the single source of truth for where the
//! camera is. Controllers only produce deltas; [`Camera::update`] pulls them
//! in, then recomputes the view and projection matrices if anything changed.
//!
//! # Example
//!
//! ```
//! use stagehand::{Camera, CameraConfig, DVec3, OrbitConfig, OrbitController};
//!
//! let mut camera = Camera::new(CameraConfig::new().fov(45.0).position([0.0, 2.0, 8.0]))?;
//! camera.set_orbit(OrbitController::new(OrbitConfig::default()));
//!
//! // Once per frame. `update(false)` does the same but logs an error on
//! // frames where nothing moved.
//! if camera.reconcile() {
//!     camera.refresh()?;
//! }
//! # Ok::<(), stagehand::CameraError>(())
//! ```

use std::fmt;

use glam::{DMat4, DVec3};

use crate::angle::Angle;
use crate::controller::CameraController;
use crate::input::InputEvent;
use crate::logging::trace_call;
use crate::matrix4::{self, MatrixError};
use crate::orbit::OrbitController;
use crate::transform::Transform;
use crate::wasd::WasdController;

/// Errors from building or updating a [`Camera`].
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// A lens or clip setting is out of range.
    InvalidConfig(String),
    /// The camera or projection matrix could not be inverted.
    Matrix(MatrixError),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::InvalidConfig(msg) => write!(f, "invalid camera config: {}", msg),
            CameraError::Matrix(e) => write!(f, "camera matrix error: {}", e),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MatrixError> for CameraError {
    fn from(e: MatrixError) -> Self {
        CameraError::Matrix(e)
    }
}

/// Lens, clip planes and starting pose of a [`Camera`].
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Width over height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: DVec3,
    /// Euler angles in radians.
    pub rotation: DVec3,
    /// World up used when looking at a target.
    pub up: DVec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
            position: DVec3::new(0.0, 1.0, 5.0),
            rotation: DVec3::ZERO,
            up: DVec3::Y,
        }
    }
}

impl CameraConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical field of view in degrees, within `(0, 180)`.
    pub fn fov(mut self, degrees: f64) -> Self {
        self.fov_degrees = degrees;
        self
    }

    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Near and far clip distances. `0 < near < far` is required.
    pub fn clip(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn position(mut self, position: impl Into<DVec3>) -> Self {
        self.position = position.into();
        self
    }

    /// Starting Euler angles in radians.
    pub fn rotation(mut self, rotation: impl Into<DVec3>) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn up(mut self, up: impl Into<DVec3>) -> Self {
        self.up = up.into();
        self
    }

    /// Checks the lens, clip planes and up vector.
    ///
    /// ```
    /// use stagehand::CameraConfig;
    ///
    /// assert!(CameraConfig::new().validate().is_ok());
    /// assert!(CameraConfig::new().clip(5.0, 5.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(CameraError::InvalidConfig(format!(
                "fov must be within (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(CameraError::InvalidConfig(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            return Err(CameraError::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        if self.up.length_squared() == 0.0 {
            return Err(CameraError::InvalidConfig("up vector is zero".into()));
        }
        Ok(())
    }
}

/// Camera matrices laid out for a WGSL uniform buffer.
///
/// ```wgsl
/// struct Camera {
///     view: mat4x4f,
///     projection: mat4x4f,
///     projection_inverse: mat4x4f,
///     world: mat4x4f,
///     position: vec3f,
/// }
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub projection_inverse: [[f32; 4]; 4],
    /// Camera-to-world matrix (the inverse of `view`).
    pub world: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _padding: f32,
}

/// A perspective camera whose matrices follow its transform.
#[derive(Debug)]
pub struct Camera {
    transform: Transform,
    fov: Angle,
    aspect: f64,
    near: f64,
    far: f64,
    up: DVec3,

    orbit: Option<OrbitController>,
    wasd: Option<WasdController>,

    dirty: bool,
    world_matrix: DMat4,
    view_matrix: DMat4,
    projection_matrix: DMat4,
    projection_matrix_inverse: DMat4,
}

impl Camera {
    /// Builds a camera with its matrices already computed.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        config.validate()?;

        let mut camera = Self {
            transform: Transform::new()
                .position(config.position)
                .rotation(config.rotation),
            fov: Angle::from_degrees(config.fov_degrees),
            aspect: config.aspect,
            near: config.near,
            far: config.far,
            up: config.up,
            orbit: None,
            wasd: None,
            dirty: true,
            world_matrix: DMat4::IDENTITY,
            view_matrix: DMat4::IDENTITY,
            projection_matrix: DMat4::IDENTITY,
            projection_matrix_inverse: DMat4::IDENTITY,
        };
        camera.update(true)?;
        Ok(camera)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the transform. Marks the camera dirty.
    ///
    /// Edits made here are picked up by an installed orbit controller on
    /// the next [`reconcile`](Self::reconcile).
    pub fn transform_mut(&mut self) -> &mut Transform {
        self.dirty = true;
        &mut self.transform
    }

    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    /// Moves the camera without changing where it looks.
    ///
    /// ```
    /// # use stagehand::{Camera, CameraConfig, DVec3};
    /// let mut camera = Camera::new(CameraConfig::default())?;
    /// camera.set_position(DVec3::new(0.0, 10.0, 0.0));
    /// assert!(camera.is_dirty());
    /// # Ok::<(), stagehand::CameraError>(())
    /// ```
    pub fn set_position(&mut self, position: DVec3) {
        self.transform.position = position;
        self.dirty = true;
    }

    /// Euler angles in radians.
    pub fn rotation(&self) -> DVec3 {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, rotation: DVec3) {
        self.transform.rotation = rotation;
        self.dirty = true;
    }

    /// World up used by [`look_at`](Self::look_at).
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Vertical field of view.
    pub fn fov(&self) -> Angle {
        self.fov
    }

    /// Changes the vertical field of view.
    ///
    /// Out-of-range values are rejected and leave the camera untouched.
    ///
    /// ```
    /// # use stagehand::{Angle, Camera, CameraConfig};
    /// let mut camera = Camera::new(CameraConfig::default())?;
    /// camera.set_fov(Angle::from_degrees(75.0))?;
    /// assert!(camera.set_fov(Angle::from_degrees(180.0)).is_err());
    /// assert_eq!(camera.fov().degrees(), 75.0);
    /// # Ok::<(), stagehand::CameraError>(())
    /// ```
    pub fn set_fov(&mut self, fov: Angle) -> Result<(), CameraError> {
        self.lens().fov(fov.degrees()).validate()?;
        self.fov = fov;
        self.dirty = true;
        Ok(())
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Changes the aspect ratio. Must be positive and finite.
    pub fn set_aspect(&mut self, aspect: f64) -> Result<(), CameraError> {
        self.lens().aspect(aspect).validate()?;
        self.aspect = aspect;
        self.dirty = true;
        Ok(())
    }

    /// Near clip distance.
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Moves the near plane. Rejected unless `0 < near < far`.
    pub fn set_near(&mut self, near: f64) -> Result<(), CameraError> {
        self.lens().clip(near, self.far).validate()?;
        self.near = near;
        self.dirty = true;
        Ok(())
    }

    /// Far clip distance.
    pub fn far(&self) -> f64 {
        self.far
    }

    /// Moves the far plane. Rejected unless `near < far` and `far` is finite.
    pub fn set_far(&mut self, far: f64) -> Result<(), CameraError> {
        self.lens().clip(self.near, far).validate()?;
        self.far = far;
        self.dirty = true;
        Ok(())
    }

    /// Current lens settings as a config, for validating a proposed change.
    fn lens(&self) -> CameraConfig {
        CameraConfig {
            fov_degrees: self.fov.degrees(),
            aspect: self.aspect,
            near: self.near,
            far: self.far,
            position: self.transform.position,
            rotation: self.transform.rotation,
            up: self.up,
        }
    }

    /// Inverse of the camera's world matrix. Valid after [`update`](Self::update).
    pub fn view_matrix(&self) -> &DMat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &DMat4 {
        &self.projection_matrix
    }

    /// Maps clip space back to view space. The grid shader uses it to
    /// unproject pixels.
    pub fn projection_matrix_inverse(&self) -> &DMat4 {
        &self.projection_matrix_inverse
    }

    /// Whether a matrix recompute is owed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Points the camera at `target` using the configured up vector.
    pub fn look_at(&mut self, target: DVec3) -> bool {
        trace_call!("Camera::look_at({:?})", target);
        let turned = self.transform.look_at(target, self.up);
        self.dirty |= turned;
        turned
    }

    /// Installs an orbit controller, replacing any previous one.
    ///
    /// The controller is synced to the camera's current position and the
    /// camera turns to face its target.
    pub fn set_orbit(&mut self, mut orbit: OrbitController) -> Option<OrbitController> {
        orbit.sync_from_camera(self.transform.position);
        self.look_at(orbit.target());
        self.orbit.replace(orbit)
    }

    /// Installs a WASD controller, replacing any previous one.
    pub fn set_wasd(&mut self, wasd: WasdController) -> Option<WasdController> {
        self.wasd.replace(wasd)
    }

    /// Removes the orbit controller. The camera stays where it is.
    pub fn take_orbit(&mut self) -> Option<OrbitController> {
        self.orbit.take()
    }

    pub fn take_wasd(&mut self) -> Option<WasdController> {
        self.wasd.take()
    }

    /// The installed orbit controller, if any.
    pub fn orbit(&self) -> Option<&OrbitController> {
        self.orbit.as_ref()
    }

    pub fn orbit_mut(&mut self) -> Option<&mut OrbitController> {
        self.orbit.as_mut()
    }

    /// The installed WASD controller, if any.
    pub fn wasd(&self) -> Option<&WasdController> {
        self.wasd.as_ref()
    }

    pub fn wasd_mut(&mut self) -> Option<&mut WasdController> {
        self.wasd.as_mut()
    }

    /// Installed controllers, orbit first.
    pub fn controllers_mut(&mut self) -> impl Iterator<Item = &mut dyn CameraController> {
        let orbit = self.orbit.iter_mut().map(|c| c as &mut dyn CameraController);
        let wasd = self.wasd.iter_mut().map(|c| c as &mut dyn CameraController);
        orbit.chain(wasd)
    }

    /// Forwards an input event to every controller.
    pub fn handle_event(&mut self, event: &InputEvent) {
        for controller in self.controllers_mut() {
            controller.handle_event(event);
        }
    }

    /// Runs the controllers and folds their output into the transform.
    ///
    /// The orbit starts from wherever the camera is now, so direct edits
    /// made since the last frame are kept. Its result is applied first, then
    /// the WASD deltas on top of it. Returns whether the camera now owes a
    /// matrix recompute. Follow with [`refresh`](Self::refresh), not
    /// [`update`](Self::update), which would run the controllers a second
    /// time.
    pub fn reconcile(&mut self) -> bool {
        trace_call!("Camera::reconcile");

        if let Some(orbit) = self.orbit.as_mut() {
            orbit.sync_from_camera(self.transform.position);
            orbit.update();
            if orbit.is_dirty() {
                self.transform.position = orbit.position();
                let target = orbit.target();
                orbit.clear_dirty();
                self.transform.look_at(target, self.up);
                self.dirty = true;
            }
        }

        if let Some(wasd) = self.wasd.as_mut() {
            wasd.update();
            if wasd.is_dirty() {
                let (translation, rotation) = wasd.take_deltas();
                let translation = if wasd.is_relative() {
                    self.transform.quaternion() * translation
                } else {
                    translation
                };
                self.transform.position += translation;
                self.transform.rotation += rotation;
                self.dirty = true;
            }
        }

        self.dirty
    }

    /// Reconciles controllers and recomputes the matrices.
    ///
    /// Returns `Ok(false)` without touching anything when nothing changed and
    /// `force` is not set; that case is logged as an error since it usually
    /// means the caller updates more often than needed.
    pub fn update(&mut self, force: bool) -> Result<bool, CameraError> {
        trace_call!("Camera::update(force: {})", force);
        self.reconcile();

        if !force && !self.dirty {
            log::error!("Camera::update() called without changes; pass `force` to bypass this check");
            return Ok(false);
        }

        self.refresh()?;
        Ok(true)
    }

    /// Recomputes the matrices from the current transform and lens, without
    /// running the controllers.
    ///
    /// On error the previous matrices are kept and the camera stays dirty.
    pub fn refresh(&mut self) -> Result<(), CameraError> {
        self.transform.update();
        let view = matrix4::inverse(&self.transform.matrix)?;
        let projection = matrix4::perspective(self.fov.radians(), self.aspect, self.near, self.far);
        let projection_inverse = matrix4::inverse(&projection)?;

        self.world_matrix = self.transform.matrix;
        self.view_matrix = view;
        self.projection_matrix = projection;
        self.projection_matrix_inverse = projection_inverse;
        self.dirty = false;

        if let Some(orbit) = self.orbit.as_mut() {
            orbit.sync_from_camera(self.transform.position);
        }

        log::trace!("camera matrices recomputed at {:?}", self.transform.position);
        Ok(())
    }

    /// Matrices from the last successful refresh, converted for upload.
    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms {
            view: self.view_matrix.as_mat4().to_cols_array_2d(),
            projection: self.projection_matrix.as_mat4().to_cols_array_2d(),
            projection_inverse: self.projection_matrix_inverse.as_mat4().to_cols_array_2d(),
            world: self.world_matrix.as_mat4().to_cols_array_2d(),
            position: self.world_matrix.w_axis.truncate().as_vec3().to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::TargetSize;
    use crate::input::{Key, PointerButton};
    use crate::orbit::OrbitConfig;
    use crate::wasd::WasdConfig;
    use approx::assert_abs_diff_eq;
    use glam::DVec2;

    fn assert_mat_eq(a: &DMat4, b: &DMat4, epsilon: f64) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_abs_diff_eq!(x, y, epsilon = epsilon);
        }
    }

    #[test]
    fn config_is_validated() {
        assert!(Camera::new(CameraConfig::new().fov(0.0)).is_err());
        assert!(Camera::new(CameraConfig::new().fov(180.0)).is_err());
        assert!(Camera::new(CameraConfig::new().aspect(0.0)).is_err());
        assert!(matches!(
            Camera::new(CameraConfig::new().clip(10.0, 1.0)),
            Err(CameraError::InvalidConfig(_))
        ));
        assert!(Camera::new(CameraConfig::new().up(DVec3::ZERO)).is_err());
    }

    #[test]
    fn new_camera_has_matrices() {
        let camera = Camera::new(CameraConfig::default()).unwrap();
        assert!(!camera.is_dirty());
        assert_mat_eq(
            &(*camera.view_matrix() * camera.transform().matrix),
            &DMat4::IDENTITY,
            1e-9,
        );
        let expected = matrix4::perspective(60f64.to_radians(), 1.0, 0.1, 2000.0);
        assert_mat_eq(camera.projection_matrix(), &expected, 1e-12);
    }

    #[test]
    fn second_update_is_a_noop() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        camera.set_position(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.update(false), Ok(true));
        assert_eq!(camera.update(false), Ok(false));
        assert_eq!(camera.update(true), Ok(true));
    }

    #[test]
    fn lens_changes_recompute_projection() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        camera.set_fov(Angle::from_degrees(90.0)).unwrap();
        camera.set_aspect(2.0).unwrap();
        assert!(camera.update(false).unwrap());

        let m = matrix4::to_array(camera.projection_matrix());
        assert_abs_diff_eq!(m[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m[5], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_lens_changes_are_rejected() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        let projection = *camera.projection_matrix();

        assert!(matches!(
            camera.set_far(camera.near()),
            Err(CameraError::InvalidConfig(_))
        ));
        assert!(camera.set_near(0.0).is_err());
        assert!(camera.set_near(camera.far() + 1.0).is_err());
        assert!(camera.set_aspect(f64::INFINITY).is_err());
        assert!(camera.set_fov(Angle::from_degrees(0.0)).is_err());

        assert_eq!(camera.far(), 2000.0);
        assert!(!camera.is_dirty());
        assert_eq!(camera.update(false), Ok(false));
        assert_eq!(*camera.projection_matrix(), projection);
    }

    #[test]
    fn failed_refresh_keeps_previous_matrices() {
        let mut camera = Camera::new(CameraConfig::default()).unwrap();
        let view = *camera.view_matrix();
        let projection = *camera.projection_matrix();
        let projection_inverse = *camera.projection_matrix_inverse();

        camera.set_fov(Angle::from_degrees(90.0)).unwrap();
        camera.transform_mut().scale = DVec3::new(1.0, 0.0, 1.0);
        assert!(matches!(
            camera.update(false),
            Err(CameraError::Matrix(MatrixError::Singular { .. }))
        ));

        assert!(camera.is_dirty());
        assert_eq!(*camera.view_matrix(), view);
        assert_eq!(*camera.projection_matrix(), projection);
        assert_eq!(*camera.projection_matrix_inverse(), projection_inverse);
        assert!(camera.projection_matrix().is_finite());
        assert_eq!(camera.uniforms().position, [0.0, 1.0, 5.0]);
    }

    #[test]
    fn look_at_faces_target() {
        let mut camera = Camera::new(CameraConfig::new().position([4.0, 0.0, 0.0])).unwrap();
        assert!(camera.look_at(DVec3::ZERO));
        camera.update(false).unwrap();
        let forward = camera.transform().forward();
        assert_abs_diff_eq!(forward.x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn installing_orbit_faces_its_target() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 10.0])).unwrap();
        camera.set_orbit(OrbitController::new(OrbitConfig::new().target([0.0, 0.0, 0.0])));
        let orbit = camera.orbit().unwrap();
        assert_abs_diff_eq!(orbit.spherical().radius, 10.0, epsilon = 1e-12);
        assert!(camera.is_dirty());
    }

    #[test]
    fn orbit_drag_moves_camera_around_target() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 10.0])).unwrap();
        let mut orbit = OrbitController::new(OrbitConfig::default());
        orbit.attach(TargetSize::new(500.0, 500.0)).unwrap();
        camera.set_orbit(orbit);
        camera.update(false).unwrap();

        camera.handle_event(&InputEvent::PointerDown {
            position: DVec2::new(100.0, 100.0),
            button: PointerButton::Primary,
        });
        camera.handle_event(&InputEvent::PointerMove {
            position: DVec2::new(225.0, 100.0),
        });
        assert!(camera.update(false).unwrap());

        // A quarter turn: theta = -pi/2 puts the camera on -X.
        let p = camera.position();
        assert_abs_diff_eq!(p.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-9);
        let forward = camera.transform().forward();
        assert_abs_diff_eq!(forward.x, 1.0, epsilon = 1e-9);
        assert!(!camera.orbit().unwrap().is_dirty());
    }

    #[test]
    fn wasd_moves_along_view_direction() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 0.0])).unwrap();
        camera.set_rotation(DVec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0));
        let mut wasd = WasdController::new(WasdConfig::default());
        wasd.attach(TargetSize::new(1.0, 1.0)).unwrap();
        camera.set_wasd(wasd);
        camera.update(false).unwrap();

        camera.handle_event(&InputEvent::KeyDown(Key::W));
        assert!(camera.update(false).unwrap());

        // Yawed a quarter turn left, forward is -X.
        let p = camera.position();
        assert_abs_diff_eq!(p.x, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn wasd_world_frame_ignores_orientation() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 0.0])).unwrap();
        camera.set_rotation(DVec3::new(0.0, 1.0, 0.0));
        let mut wasd = WasdController::new(WasdConfig::new().relative(false));
        wasd.attach(TargetSize::new(1.0, 1.0)).unwrap();
        camera.set_wasd(wasd);

        camera.handle_event(&InputEvent::KeyDown(Key::D));
        camera.update(false).unwrap();
        assert_eq!(camera.position(), DVec3::X);
    }

    #[test]
    fn switching_from_wasd_to_orbit_does_not_snap() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 10.0])).unwrap();
        let mut orbit = OrbitController::new(OrbitConfig::default());
        orbit.attach(TargetSize::new(500.0, 500.0)).unwrap();
        let mut wasd = WasdController::new(WasdConfig::new().relative(false));
        wasd.attach(TargetSize::new(500.0, 500.0)).unwrap();
        camera.set_orbit(orbit);
        camera.set_wasd(wasd);
        camera.update(false).unwrap();

        camera.handle_event(&InputEvent::KeyDown(Key::E));
        camera.update(false).unwrap();
        camera.handle_event(&InputEvent::KeyUp(Key::E));
        let moved = camera.position();
        assert_abs_diff_eq!(moved.y, 1.0, epsilon = 1e-9);

        // Grabbing the orbit without moving leaves the camera where WASD put it.
        camera.handle_event(&InputEvent::PointerDown {
            position: DVec2::new(10.0, 10.0),
            button: PointerButton::Primary,
        });
        camera.update(true).unwrap();
        let p = camera.position();
        assert_abs_diff_eq!(p.x, moved.x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, moved.y, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, moved.z, epsilon = 1e-9);
    }

    #[test]
    fn orbit_starts_from_a_moved_camera() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 10.0])).unwrap();
        let mut orbit = OrbitController::new(OrbitConfig::default());
        orbit.attach(TargetSize::new(500.0, 500.0)).unwrap();
        camera.set_orbit(orbit);
        camera.update(false).unwrap();

        // Moved and zoomed in the same frame: the zoom scales the new distance.
        camera.set_position(DVec3::new(0.0, 0.0, 20.0));
        camera.handle_event(&InputEvent::Wheel { delta_y: 1.0 });
        assert!(camera.update(false).unwrap());

        let p = camera.position();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 18.0, epsilon = 1e-9);
    }

    #[test]
    fn orbit_keeps_transform_edits() {
        let mut camera = Camera::new(CameraConfig::new().position([0.0, 0.0, 10.0])).unwrap();
        let mut orbit = OrbitController::new(OrbitConfig::default());
        orbit.attach(TargetSize::new(500.0, 500.0)).unwrap();
        camera.set_orbit(orbit);
        camera.update(false).unwrap();

        camera.transform_mut().position = DVec3::new(6.0, 0.0, 0.0);
        camera.handle_event(&InputEvent::Wheel { delta_y: -1.0 });
        camera.update(false).unwrap();

        let p = camera.position();
        assert_abs_diff_eq!(p.x, 6.6, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-9);
        let forward = camera.transform().forward();
        assert_abs_diff_eq!(forward.x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn uniforms_mirror_matrices() {
        let camera = Camera::new(CameraConfig::default()).unwrap();
        let u = camera.uniforms();
        assert_eq!(u.position, [0.0, 1.0, 5.0]);
        assert_eq!(u.view[3][1], -1.0);
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 4 * 64 + 16);
    }
}
