//! Spherical coordinates for orbiting around a target.
//!
//! Axis convention: `phi` is the polar angle measured from +Y, `theta` is
//! the azimuth measured from +Z toward +X. Callers converting to or from
//! Cartesian offsets must use the same convention or orbit direction flips.
//!
//! ```text
//! x = radius * sin(phi) * sin(theta)
//! y = radius * cos(phi)
//! z = radius * sin(phi) * cos(theta)
//! ```

use std::f64::consts::PI;

use glam::DVec3;

/// Smallest distance `phi` may sit from either pole.
pub const EPSILON: f64 = 1e-6;

/// A point relative to an origin, as radius / polar angle / azimuth.
///
/// `phi` is always stored clamped to `[EPSILON, PI - EPSILON]`, so the
/// look-at basis derived from it never degenerates at the poles.
/// `theta` is unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    phi: f64,
    pub theta: f64,
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl Spherical {
    pub fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self {
            radius,
            phi: clamp_phi(phi),
            theta,
        }
    }

    /// Polar angle in radians, measured from +Y.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Sets the polar angle, clamping it away from the poles.
    pub fn set_phi(&mut self, phi: f64) {
        self.phi = clamp_phi(phi);
    }

    pub fn set(&mut self, radius: f64, phi: f64, theta: f64) -> &mut Self {
        self.radius = radius;
        self.set_phi(phi);
        self.theta = theta;
        self
    }

    /// Derives the coordinates of `position` relative to `target`.
    pub fn set_from_vectors(&mut self, position: DVec3, target: DVec3) -> &mut Self {
        self.set_from_vec3(position - target)
    }

    /// Derives the coordinates of a Cartesian offset.
    ///
    /// A zero-length offset yields `theta = 0` and the smallest legal `phi`
    /// rather than NaN.
    pub fn set_from_vec3(&mut self, v: DVec3) -> &mut Self {
        self.radius = v.length();

        if self.radius == 0.0 {
            self.theta = 0.0;
            self.set_phi(0.0);
        } else {
            self.theta = v.x.atan2(v.z);
            self.set_phi((v.y / self.radius).clamp(-1.0, 1.0).acos());
        }

        self
    }

    /// Converts back to a Cartesian offset from the origin.
    pub fn to_vec3(&self) -> DVec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        DVec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

fn clamp_phi(phi: f64) -> f64 {
    phi.clamp(EPSILON, PI - EPSILON)
}

/// Pending angular change accumulated between orbit updates.
///
/// Unlike [`Spherical`] the components are plain signed deltas; nothing is
/// clamped here except by the controller that fills it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphericalDelta {
    pub phi: f64,
    pub theta: f64,
}

impl SphericalDelta {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_zero(&self) -> bool {
        self.phi == 0.0 && self.theta == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn phi_is_clamped_on_every_write() {
        let mut s = Spherical::new(1.0, -3.0, 0.0);
        assert_eq!(s.phi(), EPSILON);

        s.set_phi(10.0);
        assert_eq!(s.phi(), PI - EPSILON);

        s.set(2.0, 0.0, 1.0);
        assert_eq!(s.phi(), EPSILON);

        s.set_from_vec3(DVec3::new(0.0, 5.0, 0.0));
        assert!(s.phi() >= EPSILON && s.phi() <= PI - EPSILON);

        s.set_from_vec3(DVec3::new(0.0, -5.0, 0.0));
        assert_eq!(s.phi(), PI - EPSILON);
    }

    #[test]
    fn zero_offset_is_defined() {
        let mut s = Spherical::default();
        s.set_from_vectors(DVec3::splat(3.0), DVec3::splat(3.0));
        assert_eq!(s.radius, 0.0);
        assert_eq!(s.theta, 0.0);
        assert_eq!(s.phi(), EPSILON);
        assert!(!s.to_vec3().is_nan());
    }

    #[test]
    fn cartesian_round_trip() {
        let pairs = [
            (DVec3::new(3.0, 4.0, -2.0), DVec3::new(0.5, -1.0, 2.0)),
            (DVec3::new(-7.5, 0.25, 1.0), DVec3::ZERO),
            (DVec3::new(0.1, -9.0, 0.3), DVec3::new(1.0, 1.0, 1.0)),
            (DVec3::new(10.0, 0.0, 0.0), DVec3::new(-10.0, 0.0, 0.0)),
        ];

        for (position, target) in pairs {
            let mut s = Spherical::default();
            s.set_from_vectors(position, target);
            let offset = s.to_vec3();
            let expected = position - target;
            assert_abs_diff_eq!(offset.x, expected.x, epsilon = 1e-9);
            assert_abs_diff_eq!(offset.y, expected.y, epsilon = 1e-9);
            assert_abs_diff_eq!(offset.z, expected.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn axis_convention() {
        // phi = pi/2, theta = 0 lies on +Z
        let s = Spherical::new(10.0, std::f64::consts::FRAC_PI_2, 0.0);
        let v = s.to_vec3();
        assert_abs_diff_eq!(v.z, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-9);

        // theta = pi/2 swings to +X
        let s = Spherical::new(10.0, std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(s.to_vec3().x, 10.0, epsilon = 1e-9);
    }
}
