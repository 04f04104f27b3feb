//! Polar (spherical) representation of a 3D vector
//!
//! Stores (magnitude, azimuthal, zenith). Converting to and from `NVec3` is
//! lossless except for the zero vector, whose angles are defined as 0.

use std::fmt;

use super::vector::{NVec3, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarVector {
    pub mag: f64, // magnitude
    pub az: f64,  // azimuthal angle (radians)
    pub zen: f64, // zenith angle (radians)
}

impl PolarVector {
    pub fn new(mag: f64, az: f64, zen: f64) -> Self {
        Self { mag, az, zen }
    }

    /// Rotate by changing both angles, preserving magnitude
    pub fn rotate(&mut self, daz: f64, dzen: f64) -> &mut Self {
        self.az += daz;
        self.zen += dzen;
        self
    }
}

impl From<&NVec3> for PolarVector {
    fn from(v: &NVec3) -> Self {
        if v.is_zero() {
            return Self::default();
        }
        Self {
            mag: v.norm(),
            az: v.azimuthal(),
            zen: v.zenith(),
        }
    }
}

impl From<NVec3> for PolarVector {
    fn from(v: NVec3) -> Self {
        Self::from(&v)
    }
}

impl From<PolarVector> for NVec3 {
    fn from(p: PolarVector) -> Self {
        p.cartesian()
    }
}

impl Vector for PolarVector {
    fn x(&self) -> f64 {
        self.mag * self.az.cos() * self.zen.sin()
    }

    fn y(&self) -> f64 {
        self.mag * self.az.sin() * self.zen.sin()
    }

    fn z(&self) -> f64 {
        self.mag * self.zen.cos()
    }

    fn magnitude_sq(&self) -> f64 {
        self.mag * self.mag
    }

    fn magnitude(&self) -> f64 {
        self.mag.abs()
    }

    fn azimuthal(&self) -> f64 {
        self.az
    }

    fn zenith(&self) -> f64 {
        self.zen
    }

    fn set_length(&mut self, mag: f64) -> &mut Self {
        self.mag = mag;
        self
    }

    fn scale_by(&mut self, factor: f64) -> &mut Self {
        self.mag *= factor;
        self
    }

    fn set_zero(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    fn is_zero(&self) -> bool {
        self.mag == 0.0
    }

    fn assign<V: Vector>(&mut self, v: &V) -> &mut Self {
        *self = Self::from(v.cartesian());
        self
    }
}

impl fmt::Display for PolarVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{:.2}, {:.2}π, {:.2}π>",
            self.mag,
            self.az / std::f64::consts::PI,
            self.zen / std::f64::consts::PI
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::vec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn cartesian_round_trip() {
        let v = vec3(1.5, -2.0, 0.75);
        let back: NVec3 = PolarVector::from(&v).into();
        assert!((back - v).norm() < 1e-12, "got {back:?}");
    }

    #[test]
    fn zero_vector_has_zero_angles() {
        let p = PolarVector::from(NVec3::zeros());
        assert_eq!(p, PolarVector::default());
        assert!(p.cartesian().is_zero());
    }

    #[test]
    fn rotate_keeps_magnitude() {
        let mut p = PolarVector::new(2.0, 0.0, FRAC_PI_2);
        p.rotate(FRAC_PI_2, 0.0);
        let v = p.cartesian();
        assert!((v - vec3(0.0, 2.0, 0.0)).norm() < 1e-12);
        assert_eq!(p.magnitude(), 2.0);
    }

    #[test]
    fn shared_interface_dot() {
        let p = PolarVector::new(1.0, 0.0, FRAC_PI_2); // unit x
        let v = vec3(3.0, 4.0, 5.0);
        assert!((p.dot_with(&v) - 3.0).abs() < 1e-12);

        let mut q = PolarVector::default();
        q.assign(&v).scale_by(2.0);
        assert!((q.cartesian() - v * 2.0).norm() < 1e-12);
    }
}
