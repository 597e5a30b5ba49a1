//! Pointer lock: hiding the cursor and grabbing the pointer while a
//! controller is engaged.
//!
//! Requests can fail (unsupported platform, window not focused). Failure is
//! never fatal: [`PointerCapture`] logs it and stops asking for the rest of
//! the controller's life.

use std::fmt;
use std::sync::Arc;

use winit::window::{CursorGrabMode, Window};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerLockError(pub String);

impl fmt::Display for PointerLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pointer lock rejected: {}", self.0)
    }
}

impl std::error::Error for PointerLockError {}

/// Something that can grab and release the pointer.
pub trait PointerLock {
    fn request(&mut self) -> Result<(), PointerLockError>;
    fn exit(&mut self);
}

/// Pointer lock backed by a winit window.
///
/// Tries [`CursorGrabMode::Locked`] first and falls back to `Confined` on
/// platforms that only support one of them.
#[derive(Clone)]
pub struct WindowPointerLock {
    window: Arc<Window>,
}

impl WindowPointerLock {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl PointerLock for WindowPointerLock {
    fn request(&mut self) -> Result<(), PointerLockError> {
        self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
            .map_err(|e| PointerLockError(e.to_string()))?;
        self.window.set_cursor_visible(false);
        Ok(())
    }

    fn exit(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::debug!("releasing cursor grab failed: {}", e);
        }
        self.window.set_cursor_visible(true);
    }
}

/// Best-effort pointer capture owned by a controller.
#[derive(Default)]
pub(crate) struct PointerCapture {
    lock: Option<Box<dyn PointerLock>>,
    enabled: bool,
    held: bool,
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCapture")
            .field("has_lock", &self.lock.is_some())
            .field("enabled", &self.enabled)
            .field("held", &self.held)
            .finish()
    }
}

impl PointerCapture {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            lock: None,
            enabled,
            held: false,
        }
    }

    pub(crate) fn set_lock(&mut self, lock: Box<dyn PointerLock>) {
        self.lock = Some(lock);
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the pointer is currently locked by this owner.
    pub(crate) fn held(&self) -> bool {
        self.held
    }

    /// Grabs the pointer if capture is enabled. A rejected request disables
    /// capture permanently.
    pub(crate) fn capture(&mut self, owner: &str) {
        if !self.enabled || self.held {
            return;
        }
        let Some(lock) = self.lock.as_mut() else {
            return;
        };
        match lock.request() {
            Ok(()) => self.held = true,
            Err(e) => {
                log::error!("{}: error capturing pointer lock: {}", owner, e);
                self.enabled = false;
            }
        }
    }

    pub(crate) fn release(&mut self) {
        if !self.held {
            return;
        }
        if let Some(lock) = self.lock.as_mut() {
            lock.exit();
        }
        self.held = false;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records calls; optionally rejects every request.
    #[derive(Clone, Default)]
    pub(crate) struct FakeLock {
        pub requests: Rc<Cell<u32>>,
        pub exits: Rc<Cell<u32>>,
        pub reject: bool,
    }

    impl PointerLock for FakeLock {
        fn request(&mut self) -> Result<(), PointerLockError> {
            self.requests.set(self.requests.get() + 1);
            if self.reject {
                Err(PointerLockError("denied".into()))
            } else {
                Ok(())
            }
        }

        fn exit(&mut self) {
            self.exits.set(self.exits.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeLock;
    use super::*;

    #[test]
    fn capture_and_release_pair_up() {
        let lock = FakeLock::default();
        let mut capture = PointerCapture::new(true);
        capture.set_lock(Box::new(lock.clone()));

        capture.capture("test");
        capture.capture("test");
        assert!(capture.held);
        assert_eq!(lock.requests.get(), 1);

        capture.release();
        capture.release();
        assert_eq!(lock.exits.get(), 1);
    }

    #[test]
    fn rejection_disables_capture() {
        let lock = FakeLock {
            reject: true,
            ..Default::default()
        };
        let mut capture = PointerCapture::new(true);
        capture.set_lock(Box::new(lock.clone()));

        capture.capture("test");
        assert!(!capture.enabled());
        assert!(!capture.held);

        capture.capture("test");
        assert_eq!(lock.requests.get(), 1);
    }

    #[test]
    fn disabled_capture_never_asks() {
        let lock = FakeLock::default();
        let mut capture = PointerCapture::new(false);
        capture.set_lock(Box::new(lock.clone()));
        capture.capture("test");
        assert_eq!(lock.requests.get(), 0);
    }
}
