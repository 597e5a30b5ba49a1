//! The CPU side of a render stage: one camera, its controllers, and the size
//! of the surface they listen on.
//!
//! A [`Stage`] is what a render loop talks to. Feed it input, call
//! [`Stage::tick`] once per frame, and upload [`Stage::uniforms`] when the
//! tick reports a change. GPU resources live beside it (see
//! [`GpuContext`](crate::GpuContext)).
//!
//! # Example
//!
//! ```
//! use stagehand::{InputEvent, Key, OrbitConfig, Stage, StageConfig, WasdConfig};
//!
//! let mut stage = Stage::new(
//!     StageConfig::new(800, 600)
//!         .orbit(OrbitConfig::default())
//!         .wasd(WasdConfig::default()),
//! )?;
//!
//! stage.handle_event(&InputEvent::KeyDown(Key::W));
//! assert!(stage.tick()?);
//! let uniforms = stage.uniforms();
//! # let _ = uniforms;
//! # Ok::<(), stagehand::StageError>(())
//! ```

use std::fmt;

use crate::camera::{Camera, CameraConfig, CameraError, CameraUniforms};
use crate::controller::{CameraController, ControllerError, TargetSize};
use crate::input::InputEvent;
use crate::orbit::{OrbitConfig, OrbitController};
use crate::pointer_lock::PointerLock;
use crate::wasd::{WasdConfig, WasdController};

/// Errors from building or advancing a [`Stage`].
#[derive(Debug)]
pub enum StageError {
    Camera(CameraError),
    Controller(ControllerError),
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::Camera(e) => write!(f, "{}", e),
            StageError::Controller(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StageError::Camera(e) => Some(e),
            StageError::Controller(e) => Some(e),
        }
    }
}

impl From<CameraError> for StageError {
    fn from(e: CameraError) -> Self {
        StageError::Camera(e)
    }
}

impl From<ControllerError> for StageError {
    fn from(e: ControllerError) -> Self {
        StageError::Controller(e)
    }
}

/// Stage settings. The camera's aspect ratio is derived from the size.
#[derive(Clone, Debug)]
pub struct StageConfig {
    pub width: u32,
    pub height: u32,
    pub camera: CameraConfig,
    pub orbit: Option<OrbitConfig>,
    pub wasd: Option<WasdConfig>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            camera: CameraConfig::default(),
            orbit: None,
            wasd: None,
        }
    }
}

impl StageConfig {
    /// A stage of the given surface size in pixels, with no controllers.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Adds an orbit controller.
    pub fn orbit(mut self, orbit: OrbitConfig) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Adds a WASD controller. It runs after the orbit each frame.
    pub fn wasd(mut self, wasd: WasdConfig) -> Self {
        self.wasd = Some(wasd);
        self
    }
}

/// One camera plus its controllers, sized to a render surface.
#[derive(Debug)]
pub struct Stage {
    camera: Camera,
    size: TargetSize,
}

impl Stage {
    /// Builds the camera and attaches the configured controllers.
    ///
    /// A zero-sized stage cannot host controllers and is rejected.
    pub fn new(config: StageConfig) -> Result<Self, StageError> {
        let size = TargetSize::new(config.width as f64, config.height as f64).resolve()?;

        let mut camera = Camera::new(config.camera.aspect(size.width / size.height))?;

        if let Some(orbit_config) = config.orbit {
            let mut orbit = OrbitController::new(orbit_config);
            orbit.attach(size)?;
            camera.set_orbit(orbit);
        }
        if let Some(wasd_config) = config.wasd {
            let mut wasd = WasdController::new(wasd_config);
            wasd.attach(size)?;
            camera.set_wasd(wasd);
        }
        camera.refresh()?;

        log::info!(
            "stage ready: {}x{}, orbit: {}, wasd: {}",
            config.width,
            config.height,
            camera.orbit().is_some(),
            camera.wasd().is_some()
        );

        Ok(Self { camera, size })
    }

    /// Hands a pointer lock to every controller that captures the pointer.
    pub fn set_pointer_lock<L>(&mut self, lock: L)
    where
        L: PointerLock + Clone + 'static,
    {
        if let Some(orbit) = self.camera.orbit_mut() {
            orbit.set_pointer_lock(lock.clone());
        }
        if let Some(wasd) = self.camera.wasd_mut() {
            wasd.set_pointer_lock(lock);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct camera access. Position edits survive the next tick even with
    /// an orbit controller installed.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Forwards an input event to every controller.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.camera.handle_event(event);
    }

    /// Tracks a new surface size. Zero sizes (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = TargetSize::new(width as f64, height as f64);
        if !size.is_valid() {
            log::debug!("ignoring resize to {}x{}", width, height);
            return;
        }

        if let Err(e) = self.camera.set_aspect(size.width / size.height) {
            log::warn!("keeping previous aspect ratio: {}", e);
            return;
        }
        self.size = size;
        for controller in self.camera.controllers_mut() {
            controller.resize(size);
        }
    }

    /// Advances one frame. Returns whether the camera matrices changed.
    pub fn tick(&mut self) -> Result<bool, StageError> {
        if !self.camera.reconcile() {
            return Ok(false);
        }
        self.camera.refresh()?;
        Ok(true)
    }

    /// Camera matrices ready for a uniform buffer.
    pub fn uniforms(&self) -> CameraUniforms {
        self.camera.uniforms()
    }

    /// Detaches all controllers, releasing any held pointer lock.
    pub fn dispose(&mut self) {
        for controller in self.camera.controllers_mut() {
            controller.dispose();
        }
    }
}
