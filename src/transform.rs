//! Position, rotation, and scale composed into a single matrix.
//!
//! [`Transform::update`] rebuilds [`Transform::matrix`] from scratch in a
//! fixed order:
//!
//! ```text
//! matrix = seed * translate(position) * rotateX * rotateY * rotateZ * scale(scale)
//! ```
//!
//! Objects therefore rotate about their own local axes, X first, and scale
//! is applied innermost. There is no automatic dirty tracking here: whoever
//! mutates `position`, `rotation` or `scale` must call `update()` before
//! reading `matrix`.
//!
//! # Example
//!
//! ```
//! use stagehand::{Transform, DVec3};
//!
//! let mut transform = Transform::new()
//!     .position(DVec3::new(0.0, 2.0, -5.0))
//!     .uniform_scale(2.0);
//! transform.rotation.y = 0.5;
//! transform.update();
//! ```

use glam::{DMat3, DMat4, DQuat, DVec3};

use crate::matrix4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space translation.
    pub position: DVec3,
    /// Euler angles in radians, applied X then Y then Z in local space.
    pub rotation: DVec3,
    /// Per-axis scale factors.
    pub scale: DVec3,
    /// Composed matrix, valid after [`update`](Self::update).
    pub matrix: DMat4,
    seed: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
            matrix: DMat4::IDENTITY,
            seed: DMat4::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: DVec3) -> Self {
        self.position = position;
        self.update();
        self
    }

    pub fn rotation(mut self, rotation: DVec3) -> Self {
        self.rotation = rotation;
        self.update();
        self
    }

    pub fn scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self.update();
        self
    }

    pub fn uniform_scale(self, scale: f64) -> Self {
        self.scale(DVec3::splat(scale))
    }

    /// Replaces the identity the composition starts from, e.g. with a
    /// projection so `matrix` becomes a combined clip-space transform.
    pub fn with_seed(mut self, seed: DMat4) -> Self {
        self.seed = seed;
        self.update();
        self
    }

    /// Recomposes [`matrix`](Self::matrix) from position, rotation and scale.
    pub fn update(&mut self) {
        let m = matrix4::translate(&self.seed, self.position);
        let m = matrix4::rotate_x(&m, self.rotation.x);
        let m = matrix4::rotate_y(&m, self.rotation.y);
        let m = matrix4::rotate_z(&m, self.rotation.z);
        self.matrix = matrix4::scale(&m, self.scale);
    }

    /// Orientation as a quaternion, equivalent to `Rx * Ry * Rz`.
    pub fn quaternion(&self) -> DQuat {
        DQuat::from_rotation_x(self.rotation.x)
            * DQuat::from_rotation_y(self.rotation.y)
            * DQuat::from_rotation_z(self.rotation.z)
    }

    /// Direction the local -Z axis points in world space.
    pub fn forward(&self) -> DVec3 {
        self.quaternion() * DVec3::NEG_Z
    }

    pub fn right(&self) -> DVec3 {
        self.quaternion() * DVec3::X
    }

    pub fn up(&self) -> DVec3 {
        self.quaternion() * DVec3::Y
    }

    /// Rotates the transform so its -Z axis points at `target`, then
    /// recomposes the matrix.
    ///
    /// Returns `false` and leaves the rotation untouched when no basis
    /// exists: `target` equals `position`, or `up` is parallel to the
    /// viewing direction.
    pub fn look_at(&mut self, target: DVec3, up: DVec3) -> bool {
        let z_axis = (self.position - target).normalize_or_zero();
        let x_axis = up.cross(z_axis).normalize_or_zero();
        if z_axis == DVec3::ZERO || x_axis == DVec3::ZERO {
            log::warn!(
                "look_at ignored: no basis from {:?} toward {:?} with up {:?}",
                self.position,
                target,
                up
            );
            return false;
        }
        let y_axis = z_axis.cross(x_axis);

        self.rotation = euler_xyz(&DMat3::from_cols(x_axis, y_axis, z_axis));
        self.update();
        true
    }
}

/// Extracts angles `(a, b, c)` such that `m == Rx(a) * Ry(b) * Rz(c)`.
fn euler_xyz(m: &DMat3) -> DVec3 {
    // m.col(c)[r] is row r, column c.
    let m00 = m.x_axis.x;
    let m01 = m.y_axis.x;
    let m02 = m.z_axis.x;
    let m11 = m.y_axis.y;
    let m12 = m.z_axis.y;
    let m21 = m.y_axis.z;
    let m22 = m.z_axis.z;

    let b = m02.clamp(-1.0, 1.0).asin();
    if m02.abs() < 1.0 - 1e-9 {
        DVec3::new((-m12).atan2(m22), b, (-m01).atan2(m00))
    } else {
        // Gimbal lock: fold the whole remaining rotation into X.
        DVec3::new(m21.atan2(m11), b, 0.0)
    }
}
