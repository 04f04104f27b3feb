//! Vector algebra for the kernel
//!
//! All kinematic state is stored as `NVec3` (nalgebra `Vector3<f64>`, SI
//! units). Sums, differences, cross and dot products come straight from
//! nalgebra; this module adds:
//! - [`Vector`]: the interface shared by the Cartesian `NVec3` and
//!   [`PolarVector`](super::polar::PolarVector)
//! - [`Cartesian`]: chaining in-place operations (`translate`,
//!   `translate_scaled`, `set_basis`, ...) that always return the receiver
//! - [`distance`] / [`distance_sq`]

use nalgebra::Vector3;

use crate::shapes::orientation::Orientation;

pub type NVec3 = Vector3<f64>;

/// Shorthand for `NVec3::new(x, y, z)`
pub fn vec3(x: f64, y: f64, z: f64) -> NVec3 {
    NVec3::new(x, y, z)
}

/// Square of the distance between two position vectors
pub fn distance_sq(u: &NVec3, v: &NVec3) -> f64 {
    (u - v).norm_squared()
}

/// Distance between two position vectors
pub fn distance(u: &NVec3, v: &NVec3) -> f64 {
    distance_sq(u, v).sqrt()
}

/// Representation-independent 3D vector
///
/// Mutating methods return `&mut Self` so calls chain the same way for every
/// representation.
pub trait Vector {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;

    fn magnitude_sq(&self) -> f64;

    fn magnitude(&self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    /// Angle in the x-y plane measured from the x axis, in (-pi, pi]
    fn azimuthal(&self) -> f64;

    /// Angle from the z axis, in [0, pi]
    fn zenith(&self) -> f64;

    /// Rescale to `mag`, preserving direction. Undefined for a zero vector.
    fn set_length(&mut self, mag: f64) -> &mut Self;

    fn scale_by(&mut self, factor: f64) -> &mut Self;

    /// Set every component to zero. Not necessarily the same as `scale_by(0.0)`
    /// for polar vectors, whose angles are reset too.
    fn set_zero(&mut self) -> &mut Self;

    fn is_zero(&self) -> bool;

    /// Copy-assign from any representation
    fn assign<V: Vector>(&mut self, v: &V) -> &mut Self;

    /// Precondition: the vector is not zero. Not checked in release builds.
    fn normalize_in_place(&mut self) -> &mut Self {
        debug_assert!(!self.is_zero(), "normalizing a zero vector");
        self.set_length(1.0)
    }

    fn cartesian(&self) -> NVec3 {
        NVec3::new(self.x(), self.y(), self.z())
    }

    fn dot_with<V: Vector>(&self, v: &V) -> f64 {
        self.x() * v.x() + self.y() * v.y() + self.z() * v.z()
    }
}

impl Vector for NVec3 {
    fn x(&self) -> f64 {
        self[0]
    }

    fn y(&self) -> f64 {
        self[1]
    }

    fn z(&self) -> f64 {
        self[2]
    }

    fn magnitude_sq(&self) -> f64 {
        self.norm_squared()
    }

    fn azimuthal(&self) -> f64 {
        self[1].atan2(self[0])
    }

    fn zenith(&self) -> f64 {
        self[0].hypot(self[1]).atan2(self[2])
    }

    fn set_length(&mut self, mag: f64) -> &mut Self {
        let factor = mag / self.norm();
        self.scale_by(factor)
    }

    fn scale_by(&mut self, factor: f64) -> &mut Self {
        *self *= factor;
        self
    }

    fn set_zero(&mut self) -> &mut Self {
        self.fill(0.0);
        self
    }

    fn is_zero(&self) -> bool {
        self[0] == 0.0 && self[1] == 0.0 && self[2] == 0.0
    }

    fn assign<V: Vector>(&mut self, v: &V) -> &mut Self {
        *self = v.cartesian();
        self
    }
}

/// In-place operations only the Cartesian representation supports
pub trait Cartesian {
    /// `self += v`
    fn translate(&mut self, v: &NVec3) -> &mut Self;

    /// Fused multiply-add: `self += v * scale`
    fn translate_scaled(&mut self, v: &NVec3, scale: f64) -> &mut Self;

    /// Component-wise product with `dir`
    fn scale_along(&mut self, dir: &NVec3) -> &mut Self;

    /// Set `self` to the projection of `self` onto `v`
    fn project_onto(&mut self, v: &NVec3) -> &mut Self;

    /// Re-express `self` in the orthonormal basis of `o` (world space to
    /// body/camera space). Applying it twice does not undo anything: use
    /// [`Orientation::transformation_matrix`] to move between two bases.
    fn set_basis(&mut self, o: &Orientation) -> &mut Self;
}

impl Cartesian for NVec3 {
    fn translate(&mut self, v: &NVec3) -> &mut Self {
        *self += v;
        self
    }

    fn translate_scaled(&mut self, v: &NVec3, scale: f64) -> &mut Self {
        self.axpy(scale, v, 1.0);
        self
    }

    fn scale_along(&mut self, dir: &NVec3) -> &mut Self {
        self.component_mul_assign(dir);
        self
    }

    fn project_onto(&mut self, v: &NVec3) -> &mut Self {
        *self = v * (self.dot(v) / v.norm_squared());
        self
    }

    fn set_basis(&mut self, o: &Orientation) -> &mut Self {
        let local = NVec3::new(
            self.dot(o.x_axis()),
            self.dot(o.y_axis()),
            self.dot(o.z_axis()),
        );
        *self = local;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::quaternion::Quaternion;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn magnitude_matches_components() {
        let v = vec3(1.0, 2.0, 2.0);
        assert_eq!(Vector::magnitude(&v), 3.0);
        assert_eq!(v.magnitude_sq(), 9.0);
    }

    #[test]
    fn chained_mutations_return_receiver() {
        let mut v = vec3(1.0, 0.0, 0.0);
        v.translate(&vec3(0.0, 1.0, 0.0))
            .translate_scaled(&vec3(0.0, 0.0, 1.0), 2.0)
            .scale_by(2.0);
        assert_eq!(v, vec3(2.0, 2.0, 4.0));
    }

    #[test]
    fn scale_zero_is_fine_on_zero_vector() {
        let mut v = NVec3::zeros();
        v.scale_by(0.0);
        assert!(v.is_zero());
    }

    #[test]
    fn set_length_preserves_direction() {
        let mut v = vec3(3.0, 4.0, 0.0);
        v.set_length(10.0);
        assert!((v - vec3(6.0, 8.0, 0.0)).norm() < 1e-12);
        v.normalize_in_place();
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn distance_helpers_agree() {
        let u = vec3(1.0, 1.0, 1.0);
        let v = vec3(4.0, 5.0, 1.0);
        assert_eq!(distance_sq(&u, &v), 25.0);
        assert_eq!(distance(&u, &v), 5.0);
    }

    #[test]
    fn angles_of_axes() {
        assert!((vec3(0.0, 1.0, 0.0).azimuthal() - FRAC_PI_2).abs() < 1e-12);
        assert!((vec3(0.0, 0.0, 1.0).zenith()).abs() < 1e-12);
        assert!((vec3(0.0, 0.0, -1.0).zenith() - PI).abs() < 1e-12);
        assert_eq!(NVec3::zeros().azimuthal(), 0.0);
        assert_eq!(NVec3::zeros().zenith(), 0.0);
    }

    #[test]
    fn projection_onto_axis() {
        let mut u = vec3(2.0, 3.0, 4.0);
        u.project_onto(&vec3(0.0, 5.0, 0.0));
        assert!((u - vec3(0.0, 3.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn set_basis_expresses_vector_in_rotated_axes() {
        let mut o = Orientation::new();
        // quarter turn about z: local x now points along world y
        o.rotate(&Quaternion::rotation(FRAC_PI_2, &vec3(0.0, 0.0, 1.0)));

        let mut v = vec3(0.0, 1.0, 0.0);
        v.set_basis(&o);
        assert!((v - vec3(1.0, 0.0, 0.0)).norm() < 1e-12, "got {v:?}");
    }

    #[test]
    fn scale_along_is_componentwise() {
        let mut v = vec3(1.0, 2.0, 3.0);
        v.scale_along(&vec3(1.0, 1.0, 2.0));
        assert_eq!(v, vec3(1.0, 2.0, 6.0));
    }
}
