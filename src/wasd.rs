//! First-person keyboard movement.
//!
//! Held keys are tracked in press order. Each [`WasdController::update`]
//! replays every held command once, producing a translation delta in the
//! camera's local frame and an Euler rotation delta. The camera consumes
//! both through [`WasdController::take_deltas`]; the controller itself never
//! knows where the camera is.
//!
//! | Key | Command |
//! |---|---|
//! | W / S | forward / back (-Z / +Z) |
//! | A / D | left / right (-X / +X) |
//! | E / Q | up / down (+Y / -Y) |
//! | Shift / Control | 2x / 0.5x speed, last press wins |
//! | Arrows | yaw and pitch by `rotation_step` |
//! | Escape | cancel |

use std::collections::HashSet;

use glam::DVec3;

use crate::controller::{CameraController, ControllerError, TargetSize};
use crate::input::{InputEvent, Key};
use crate::logging::trace_call;
use crate::pointer_lock::{PointerCapture, PointerLock};

const FAST_MULTIPLIER: f64 = 2.0;
const SLOW_MULTIPLIER: f64 = 0.5;

/// Settings for a [`WasdController`].
#[derive(Clone, Debug)]
pub struct WasdConfig {
    pub enabled: bool,
    /// World units moved per update while a movement key is held.
    pub speed: f64,
    /// Radians turned per update while an arrow key is held.
    pub rotation_step: f64,
    /// Move along the camera's own axes rather than world axes.
    pub relative: bool,
    /// Bind arrow keys to rotation.
    pub arrow_keys: bool,
    /// Grab the pointer while any key is held.
    pub capture_pointer_lock: bool,
}

impl Default for WasdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            rotation_step: 0.1,
            relative: true,
            arrow_keys: true,
            capture_pointer_lock: false,
        }
    }
}

impl WasdConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// World units per update, before the Shift/Control multiplier.
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn rotation_step(mut self, step: f64) -> Self {
        self.rotation_step = step;
        self
    }

    /// `false` moves along world axes regardless of where the camera faces.
    pub fn relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    pub fn arrow_keys(mut self, arrow_keys: bool) -> Self {
        self.arrow_keys = arrow_keys;
        self
    }

    pub fn capture_pointer_lock(mut self, capture: bool) -> Self {
        self.capture_pointer_lock = capture;
        self
    }
}

/// The legal key set, by what each key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WasdCommand {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    Fast,
    Slow,
    Cancel,
    TurnUp,
    TurnDown,
    TurnLeft,
    TurnRight,
}

impl WasdCommand {
    /// Maps a key to its command. Arrow keys are only legal when
    /// `arrow_keys` is set.
    pub fn from_key(key: Key, arrow_keys: bool) -> Option<Self> {
        let command = match key {
            Key::W => Self::Forward,
            Key::S => Self::Back,
            Key::A => Self::Left,
            Key::D => Self::Right,
            Key::E => Self::Up,
            Key::Q => Self::Down,
            Key::Shift => Self::Fast,
            Key::Control => Self::Slow,
            Key::Escape => Self::Cancel,
            Key::ArrowUp if arrow_keys => Self::TurnUp,
            Key::ArrowDown if arrow_keys => Self::TurnDown,
            Key::ArrowLeft if arrow_keys => Self::TurnLeft,
            Key::ArrowRight if arrow_keys => Self::TurnRight,
            _ => return None,
        };
        Some(command)
    }

    /// Unit translation in the camera's local frame.
    fn translation(self) -> DVec3 {
        match self {
            Self::Forward => DVec3::NEG_Z,
            Self::Back => DVec3::Z,
            Self::Left => DVec3::NEG_X,
            Self::Right => DVec3::X,
            Self::Up => DVec3::Y,
            Self::Down => DVec3::NEG_Y,
            _ => DVec3::ZERO,
        }
    }

    /// Unit Euler rotation (pitch about X, yaw about Y).
    fn rotation(self) -> DVec3 {
        match self {
            Self::TurnUp => DVec3::X,
            Self::TurnDown => DVec3::NEG_X,
            Self::TurnLeft => DVec3::Y,
            Self::TurnRight => DVec3::NEG_Y,
            _ => DVec3::ZERO,
        }
    }
}

/// Turns held keys into per-frame camera deltas.
#[derive(Debug)]
pub struct WasdController {
    enabled: bool,
    speed: f64,
    rotation_step: f64,
    relative: bool,
    arrow_keys: bool,

    pressed: HashSet<WasdCommand>,
    moves: Vec<WasdCommand>,
    speed_multiplier: f64,
    position: DVec3,
    rotation: DVec3,
    dirty: bool,

    attached: bool,
    capture: PointerCapture,
}

impl WasdController {
    pub fn new(config: WasdConfig) -> Self {
        Self {
            enabled: config.enabled,
            speed: config.speed,
            rotation_step: config.rotation_step,
            relative: config.relative,
            arrow_keys: config.arrow_keys,
            pressed: HashSet::new(),
            moves: Vec::new(),
            speed_multiplier: 1.0,
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            dirty: false,
            attached: false,
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

    /// Base movement speed in world units per update.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// 2 while Shift wins, 0.5 while Control wins, otherwise 1.
    ///
    /// ```
    /// # use stagehand::{CameraController, InputEvent, Key, TargetSize, WasdConfig, WasdController};
    /// let mut wasd = WasdController::new(WasdConfig::default());
    /// wasd.attach(TargetSize::new(800.0, 600.0)).unwrap();
    /// wasd.handle_event(&InputEvent::KeyDown(Key::Shift));
    /// assert_eq!(wasd.speed_multiplier(), 2.0);
    /// ```
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Turns the controller on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether translation is in the camera's local frame.
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Whether held keys still try to lock the pointer.
    pub fn capture_pointer_lock(&self) -> bool {
        self.capture.enabled()
    }

    /// Whether `command`'s key is currently held.
    pub fn is_pressed(&self, command: WasdCommand) -> bool {
        self.pressed.contains(&command)
    }

    /// Held commands in the order they were pressed. Escape is never listed.
    ///
    /// ```
    /// # use stagehand::{CameraController, InputEvent, Key, TargetSize, WasdCommand, WasdConfig, WasdController};
    /// let mut wasd = WasdController::new(WasdConfig::default());
    /// wasd.attach(TargetSize::new(800.0, 600.0)).unwrap();
    /// wasd.handle_event(&InputEvent::KeyDown(Key::D));
    /// wasd.handle_event(&InputEvent::KeyDown(Key::W));
    /// assert_eq!(wasd.moves(), &[WasdCommand::Right, WasdCommand::Forward]);
    /// ```
    pub fn moves(&self) -> &[WasdCommand] {
        &self.moves
    }

    /// Pending translation, in the camera's local frame when relative.
    pub fn position_delta(&self) -> DVec3 {
        self.position
    }

    /// Pending Euler rotation, in radians.
    pub fn rotation_delta(&self) -> DVec3 {
        self.rotation
    }

    /// Hands the pending deltas to the camera and clears them.
    pub fn take_deltas(&mut self) -> (DVec3, DVec3) {
        let deltas = (self.position, self.rotation);
        self.position = DVec3::ZERO;
        self.rotation = DVec3::ZERO;
        self.dirty = false;
        deltas
    }

    fn press(&mut self, command: WasdCommand) {
        if command == WasdCommand::Cancel {
            self.cancel();
            return;
        }
        if !self.pressed.insert(command) {
            return;
        }
        self.moves.push(command);

        match command {
            WasdCommand::Fast => self.speed_multiplier = FAST_MULTIPLIER,
            WasdCommand::Slow => self.speed_multiplier = SLOW_MULTIPLIER,
            _ => {}
        }

        if self.pressed.len() == 1 {
            log::debug!("wasd controller active");
            self.capture.capture("WasdController");
        }
    }

    fn release(&mut self, command: WasdCommand) {
        if !self.pressed.remove(&command) {
            return;
        }
        self.moves.retain(|held| *held != command);

        match command {
            WasdCommand::Fast if self.is_pressed(WasdCommand::Slow) => {
                self.speed_multiplier = SLOW_MULTIPLIER
            }
            WasdCommand::Slow if self.is_pressed(WasdCommand::Fast) => {
                self.speed_multiplier = FAST_MULTIPLIER
            }
            WasdCommand::Fast | WasdCommand::Slow => self.speed_multiplier = 1.0,
            _ => {}
        }

        if self.pressed.is_empty() {
            self.cancel();
        }
    }
}

impl CameraController for WasdController {
    fn attach(&mut self, target: TargetSize) -> Result<(), ControllerError> {
        target.resolve()?;
        self.attached = true;
        log::debug!("wasd controller attached");
        Ok(())
    }

    fn resize(&mut self, _target: TargetSize) {}

    fn handle_event(&mut self, event: &InputEvent) {
        if !self.attached || !self.enabled {
            return;
        }

        match *event {
            InputEvent::KeyDown(key) => match WasdCommand::from_key(key, self.arrow_keys) {
                Some(command) => self.press(command),
                None => log::debug!("wasd controller ignoring {:?}", key),
            },
            InputEvent::KeyUp(key) => {
                if let Some(command) = WasdCommand::from_key(key, self.arrow_keys) {
                    self.release(command);
                }
            }
            InputEvent::Blur => self.cancel(),
            _ => {}
        }
    }

    /// Replays every held command once, in press order.
    fn update(&mut self) -> bool {
        trace_call!("WasdController::update");
        if !self.enabled {
            return false;
        }
        if !self.is_active() && !self.dirty {
            return false;
        }

        let step = self.speed * self.speed_multiplier;
        for command in &self.moves {
            self.position += command.translation() * step;
            self.rotation += command.rotation() * self.rotation_step;
        }

        self.dirty = true;
        true
    }

    fn cancel(&mut self) {
        trace_call!("WasdController::cancel");
        if !self.pressed.is_empty() {
            log::debug!("wasd controller cancelled with {} keys held", self.pressed.len());
        }
        self.pressed.clear();
        self.moves.clear();
        self.speed_multiplier = 1.0;
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
        !self.pressed.is_empty()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}
