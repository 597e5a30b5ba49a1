//! Platform-neutral input events consumed by camera controllers.
//!
//! Controllers never see winit types directly. [`EventTranslator`] turns
//! `winit::event::WindowEvent`s into [`InputEvent`]s, and tests can build
//! events by hand.

use glam::DVec2;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels per scroll "line" when a platform reports pixel deltas.
const PIXELS_PER_LINE: f64 = 120.0;

/// Keys the controllers understand. Everything else maps to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Shift,
    Control,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
    Other,
}

/// A single input occurrence, shaped after DOM pointer/keyboard events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { position: DVec2, button: PointerButton },
    PointerMove { position: DVec2 },
    /// Raw relative pointer motion in unaccelerated device units. Keeps
    /// arriving while the cursor is locked in place.
    PointerMotion { delta: DVec2 },
    PointerUp { position: DVec2, button: PointerButton },
    /// Positive `delta_y` scrolls down / away from the user.
    Wheel { delta_y: f64 },
    KeyDown(Key),
    KeyUp(Key),
    /// The event target lost focus.
    Blur,
}

impl Key {
    pub fn from_key_code(code: KeyCode) -> Self {
        match code {
            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyE => Key::E,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::Escape => Key::Escape,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Auxiliary,
            _ => PointerButton::Other,
        }
    }
}

/// Converts winit window events into [`InputEvent`]s.
///
/// winit button events carry no cursor position, so the translator tracks
/// the last `CursorMoved` location and stamps it onto button events.
#[derive(Debug, Default)]
pub struct EventTranslator {
    pointer_position: DVec2,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels.
    pub fn pointer_position(&self) -> DVec2 {
        self.pointer_position
    }

    /// Returns `None` for events controllers don't care about, including
    /// key auto-repeat.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = Key::from_key_code(code);
                match event.state {
                    ElementState::Pressed if event.repeat => None,
                    ElementState::Pressed => Some(InputEvent::KeyDown(key)),
                    ElementState::Released => Some(InputEvent::KeyUp(key)),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = PointerButton::from(*button);
                let position = self.pointer_position;
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerDown { position, button },
                    ElementState::Released => InputEvent::PointerUp { position, button },
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_position = DVec2::new(position.x, position.y);
                Some(InputEvent::PointerMove {
                    position: self.pointer_position,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports "scroll up" as positive y; DOM deltaY is the opposite.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -(*y as f64),
                    MouseScrollDelta::PixelDelta(pos) => -pos.y / PIXELS_PER_LINE,
                };
                Some(InputEvent::Wheel { delta_y })
            }
            WindowEvent::Focused(false) => Some(InputEvent::Blur),
            _ => None,
        }
    }

    /// Converts raw mouse motion. Every other device event is `None`.
    pub fn translate_device(&self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta: (x, y) } => Some(InputEvent::PointerMotion {
                delta: DVec2::new(*x, *y),
            }),
            _ => None,
        }
    }
}
