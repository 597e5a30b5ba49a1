//! # Stagehand
//!
//! **Transforms, a dirty-tracked camera, and orbit/WASD controllers.**
//!
//! The core is the per-frame camera pipeline: input events queue deltas in
//! the controllers, the camera folds them into its [`Transform`] once per
//! frame, and view/projection matrices are recomputed only when something
//! moved.
//!
//! ## Quick Start
//!
//! ```
//! use stagehand::*;
//!
//! let mut stage = Stage::new(
//!     StageConfig::new(1280, 720)
//!         .camera(CameraConfig::new().position([0.0, 3.0, 10.0]))
//!         .orbit(OrbitConfig::new().target([0.0, 0.0, 0.0]))
//!         .wasd(WasdConfig::new().speed(0.2)),
//! )?;
//!
//! // From the event loop:
//! stage.handle_event(&InputEvent::Wheel { delta_y: 1.0 });
//!
//! // Once per frame:
//! if stage.tick()? {
//!     let uniforms: CameraUniforms = stage.uniforms();
//!     # let _ = uniforms;
//! }
//! # Ok::<(), StageError>(())
//! ```
//!
//! With a window, [`EventTranslator`] converts winit events and
//! [`WindowPointerLock`] grabs the cursor during drags. Forward raw mouse
//! motion through [`EventTranslator::translate_device`] as well, since a
//! locked cursor stops reporting positions. Enable the
//! `trace-calls` feature to log every controller and camera entry point at
//! trace level.

mod angle;
mod camera;
mod controller;
mod gpu;
mod grid_pass;
mod input;
mod logging;
pub mod matrix4;
mod orbit;
mod pointer_lock;
pub mod spherical;
mod stage;
mod transform;
mod wasd;

pub use angle::Angle;
pub use camera::{Camera, CameraConfig, CameraError, CameraUniforms};
pub use controller::{CameraController, ControllerError, TargetSize};
pub use gpu::{GpuContext, GpuError};
pub use grid_pass::{GridPass, GridUniforms};
pub use input::{EventTranslator, InputEvent, Key, PointerButton};
pub use logging::{LoggingConfig, init_logging};
pub use matrix4::MatrixError;
pub use orbit::{DragMode, OrbitConfig, OrbitController};
pub use pointer_lock::{PointerLock, PointerLockError, WindowPointerLock};
pub use spherical::{Spherical, SphericalDelta};
pub use stage::{Stage, StageConfig, StageError};
pub use transform::Transform;
pub use wasd::{WasdCommand, WasdConfig, WasdController};

// Re-export glam math types used throughout the API
pub use glam::{DMat4, DQuat, DVec2, DVec3};
