/// An angle that keeps its radian and degree values in sync.
///
/// Setting either representation updates the other, so readers never
/// pay for a conversion.
///
/// # Example
///
/// ```
/// use stagehand::Angle;
///
/// let mut angle = Angle::from_degrees(90.0);
/// assert!((angle.radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
///
/// angle.set_radians(std::f64::consts::PI);
/// assert!((angle.degrees() - 180.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angle {
    radians: f64,
    degrees: f64,
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Self {
        let mut angle = Self::default();
        angle.set_degrees(degrees);
        angle
    }

    pub fn from_radians(radians: f64) -> Self {
        let mut angle = Self::default();
        angle.set_radians(radians);
        angle
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn set_radians(&mut self, radians: f64) {
        self.radians = radians;
        self.degrees = radians.to_degrees();
    }

    pub fn set_degrees(&mut self, degrees: f64) {
        self.degrees = degrees;
        self.radians = degrees.to_radians();
    }
}
