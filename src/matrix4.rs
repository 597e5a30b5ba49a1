//! Stateless 4x4 matrix builders.
//!
//! Matrices are glam [`DMat4`] values, which store their 16 elements in
//! column-major order; [`to_array`] and [`from_array`] expose that flat
//! layout directly. Composition follows the column-vector convention:
//! `multiply(a, b)` applies `b` first, then `a`, and the `translate`/`rotate_*`/`scale`
//! helpers post-multiply, so chaining them from an identity yields
//! `T * Rx * Ry * Rz * S`.

use std::fmt;

use glam::{DMat4, DVec3};

/// Determinants at or below this magnitude are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Errors produced by matrix operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixError {
    /// The matrix has no inverse.
    Singular { determinant: f64 },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Singular { determinant } => {
                write!(f, "matrix is not invertible (determinant {})", determinant)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

pub fn identity() -> DMat4 {
    DMat4::IDENTITY
}

/// Right-handed perspective projection mapping `near` to -1 and `far` to +1
/// in clip space.
pub fn perspective(fov_radians: f64, aspect: f64, near: f64, far: f64) -> DMat4 {
    let f = (std::f64::consts::FRAC_PI_2 - 0.5 * fov_radians).tan();
    let range_inv = 1.0 / (near - far);

    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        f / aspect, 0.0, 0.0,                          0.0,
        0.0,        f,   0.0,                          0.0,
        0.0,        0.0, (near + far) * range_inv,    -1.0,
        0.0,        0.0, near * far * range_inv * 2.0, 0.0,
    ]);
    m
}

/// Pixel-space orthographic projection with y pointing down, so `(0, 0)`
/// is the top-left corner.
pub fn projection(width: f64, height: f64, depth: f64) -> DMat4 {
    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        2.0 / width, 0.0,           0.0,         0.0,
        0.0,         -2.0 / height, 0.0,         0.0,
        0.0,         0.0,           2.0 / depth, 0.0,
        -1.0,        1.0,           0.0,         1.0,
    ]);
    m
}

/// World matrix of an eye at `eye` looking toward `target`.
///
/// The eye looks down its local -Z axis. This is the camera's model matrix;
/// invert it for a view matrix.
pub fn look_at(eye: DVec3, target: DVec3, up: DVec3) -> DMat4 {
    let z_axis = (eye - target).normalize_or_zero();
    let x_axis = up.cross(z_axis).normalize_or_zero();
    let y_axis = z_axis.cross(x_axis).normalize_or_zero();

    DMat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        eye.extend(1.0),
    )
}

pub fn translation(t: DVec3) -> DMat4 {
    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        t.x, t.y, t.z, 1.0,
    ]);
    m
}

pub fn rotation_x(angle: f64) -> DMat4 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, c,   s,   0.0,
        0.0, -s,  c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

pub fn rotation_y(angle: f64) -> DMat4 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        c,   0.0, -s,  0.0,
        0.0, 1.0, 0.0, 0.0,
        s,   0.0, c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

pub fn rotation_z(angle: f64) -> DMat4 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        c,   s,   0.0, 0.0,
        -s,  c,   0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

pub fn scaling(s: DVec3) -> DMat4 {
    #[rustfmt::skip]
    let m = DMat4::from_cols_array(&[
        s.x, 0.0, 0.0, 0.0,
        0.0, s.y, 0.0, 0.0,
        0.0, 0.0, s.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    m
}

/// `a * b`: the result applies `b` first.
pub fn multiply(a: &DMat4, b: &DMat4) -> DMat4 {
    *a * *b
}

pub fn translate(m: &DMat4, t: DVec3) -> DMat4 {
    multiply(m, &translation(t))
}

pub fn rotate_x(m: &DMat4, angle: f64) -> DMat4 {
    multiply(m, &rotation_x(angle))
}

pub fn rotate_y(m: &DMat4, angle: f64) -> DMat4 {
    multiply(m, &rotation_y(angle))
}

pub fn rotate_z(m: &DMat4, angle: f64) -> DMat4 {
    multiply(m, &rotation_z(angle))
}

pub fn scale(m: &DMat4, s: DVec3) -> DMat4 {
    multiply(m, &scaling(s))
}

/// General 4x4 inverse.
///
/// Fails with [`MatrixError::Singular`] instead of returning garbage when the
/// determinant is zero, vanishingly small, or not finite.
pub fn inverse(m: &DMat4) -> Result<DMat4, MatrixError> {
    let determinant = m.determinant();
    if !determinant.is_finite() || determinant.abs() <= SINGULAR_EPSILON {
        return Err(MatrixError::Singular { determinant });
    }
    Ok(m.inverse())
}

/// Flat column-major element sequence.
pub fn to_array(m: &DMat4) -> [f64; 16] {
    m.to_cols_array()
}

pub fn from_array(elements: &[f64; 16]) -> DMat4 {
    DMat4::from_cols_array(elements)
}
