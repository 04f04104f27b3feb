//! Quaternions used as rotors
//!
//! A quaternion is stored as (re, im) with `im` an `NVec3`. Unit quaternions
//! represent rotations; composing many small rotations drifts the norm away
//! from 1, so callers normalize after composing (see
//! [`Quaternion::compose_axis_rotations`]).

use std::fmt;
use std::ops::Mul;

use super::vector::{Cartesian, NVec3, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub re: f64,  // real part
    pub im: NVec3, // imaginary (i, j, k) part
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub fn new(re: f64, i: f64, j: f64, k: f64) -> Self {
        Self { re, im: NVec3::new(i, j, k) }
    }

    pub fn from_parts(re: f64, im: NVec3) -> Self {
        Self { re, im }
    }

    /// The rotor that does nothing: (1, 0, 0, 0)
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation by `angle` radians about `axis`:
    /// q = (cos(angle/2), axis/|axis| * sin(angle/2)).
    /// The length of `axis` does not matter, but it must not be zero.
    pub fn rotation(angle: f64, axis: &NVec3) -> Self {
        let half = 0.5 * angle;
        let mut im = *axis;
        im.set_length(half.sin());
        Self { re: half.cos(), im }
    }

    /// Combine per-axis incremental rotations into one rotor.
    ///
    /// Each `(angle, axis)` pair is turned into a rotation quaternion and
    /// left-multiplied onto the running product in the order given (roll,
    /// pitch, yaw for the integrator). Pairs with a zero angle are skipped.
    /// The product is normalized once at the end. The order is significant and
    /// must stay fixed for replays to be deterministic.
    pub fn compose_axis_rotations(rotations: &[(f64, NVec3)]) -> Self {
        let mut combined = Self::identity();
        for (angle, axis) in rotations {
            if *angle != 0.0 {
                combined.multiply_by_left(&Self::rotation(*angle, axis));
            }
        }
        combined.normalize();
        combined
    }

    /// `self = self * q2`, using
    /// (r1, v1)(r2, v2) = (r1r2 - v1·v2, r1v2 + r2v1 + v1×v2)
    pub fn multiply_by_right(&mut self, q2: &Quaternion) -> &mut Self {
        *self = *self * *q2;
        self
    }

    /// `self = q1 * self`
    pub fn multiply_by_left(&mut self, q1: &Quaternion) -> &mut Self {
        *self = *q1 * *self;
        self
    }

    pub fn scale(&mut self, d: f64) -> &mut Self {
        self.re *= d;
        self.im *= d;
        self
    }

    /// Component-wise sum
    pub fn translate(&mut self, q: &Quaternion) -> &mut Self {
        self.re += q.re;
        self.im += q.im;
        self
    }

    pub fn sum(qs: &[Quaternion]) -> Self {
        qs.iter().fold(Self::new(0.0, 0.0, 0.0, 0.0), |mut acc, q| {
            acc.translate(q);
            acc
        })
    }

    /// (r, v)* = (r, -v)
    pub fn conjugate(&self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im.norm_squared()
    }

    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// q* / |q|^2
    pub fn reciprocal(&self) -> Self {
        let mut r = self.conjugate();
        r.scale(1.0 / self.norm_sq());
        r
    }

    /// Unit quaternion in the direction of `self`
    pub fn versor(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Set the norm to 1. Precondition: `self` is not the zero quaternion
    /// (only checked in debug builds).
    pub fn normalize(&mut self) -> &mut Self {
        let norm = self.norm();
        debug_assert!(norm != 0.0, "normalizing the zero quaternion");
        self.scale(1.0 / norm)
    }

    /// Rotate `v` by this (unit) quaternion with
    /// v' = v + 2 im × (im × v + re v). `self` is not mutated.
    pub fn rotate(&self, v: &NVec3) -> NVec3 {
        let mut inner = self.im.cross(v);
        inner.translate_scaled(v, self.re);
        let mut out = *v;
        out.translate_scaled(&self.im.cross(&inner), 2.0);
        out
    }

    /// In-place form of [`Quaternion::rotate`]
    pub fn rotate_in_place(&self, v: &mut NVec3) {
        *v = self.rotate(v);
    }

    /// Rotate `v` with the full sandwich product q v q⁻¹. Slower than
    /// [`Quaternion::rotate`]; both agree for unit quaternions.
    pub fn rotate_sandwich(&self, v: &NVec3) -> NVec3 {
        (*self * Quaternion::from_parts(0.0, *v) * self.reciprocal()).im
    }

    /// Rotate `v` around `axis` by `angle` without keeping the rotor around
    pub fn rotate_around_axis(v: &NVec3, angle: f64, axis: &NVec3) -> NVec3 {
        Self::rotation(angle, axis).rotate(v)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, q2: Quaternion) -> Quaternion {
        let re = self.re * q2.re - self.im.dot(&q2.im);
        let mut im = self.im.cross(&q2.im);
        im.translate_scaled(&self.im, q2.re)
            .translate_scaled(&q2.im, self.re);
        Quaternion { re, im }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{:.2}, {:.2}, {:.2}, {:.2}>",
            self.re,
            self.im.x(),
            self.im.y(),
            self.im.z()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::vec3;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotation_quaternion_is_unit() {
        let q = Quaternion::rotation(1.234, &vec3(3.0, -1.0, 2.0));
        assert!((q.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_about_z() {
        let q = Quaternion::rotation(FRAC_PI_2, &vec3(0.0, 0.0, 5.0));
        let v = q.rotate(&vec3(1.0, 0.0, 0.0));
        assert!((v - vec3(0.0, 1.0, 0.0)).norm() < 1e-12, "got {v:?}");
    }

    #[test]
    fn rotate_does_not_mutate_rotor() {
        let q = Quaternion::rotation(0.7, &vec3(1.0, 1.0, 0.0));
        let before = q;
        let _ = q.rotate(&vec3(0.3, 0.2, 0.1));
        assert_eq!(q, before);
    }

    #[test]
    fn conjugate_undoes_rotation() {
        let q = Quaternion::rotation(2.1, &vec3(0.3, -0.4, 0.8));
        let v = vec3(1.0, 2.0, 3.0);
        let back = q.conjugate().rotate(&q.rotate(&v));
        assert!((back - v).norm() < 1e-12, "got {back:?}");
    }

    #[test]
    fn double_cross_matches_sandwich() {
        let q = Quaternion::rotation(0.9, &vec3(1.0, 2.0, -0.5));
        let v = vec3(-1.0, 0.5, 4.0);
        let fast = q.rotate(&v);
        let slow = q.rotate_sandwich(&v);
        assert!((fast - slow).norm() < 1e-12);
    }

    #[test]
    fn left_and_right_multiplication_order() {
        let a = Quaternion::rotation(FRAC_PI_2, &vec3(1.0, 0.0, 0.0));
        let b = Quaternion::rotation(FRAC_PI_2, &vec3(0.0, 0.0, 1.0));

        let mut left = a;
        left.multiply_by_left(&b); // b * a
        let mut right = a;
        right.multiply_by_right(&b); // a * b

        assert_eq!(left, b * a);
        assert_eq!(right, a * b);
        assert!((left.re - right.re).abs() < 1e-12);
        assert!((left.im - right.im).norm() > 1e-6, "rotations should not commute");
    }

    #[test]
    fn composed_axis_rotations_apply_roll_first() {
        // roll about x then yaw about z: x axis ends on y, z axis ends on x
        let q = Quaternion::compose_axis_rotations(&[
            (FRAC_PI_2, vec3(1.0, 0.0, 0.0)),
            (0.0, vec3(0.0, 1.0, 0.0)),
            (FRAC_PI_2, vec3(0.0, 0.0, 1.0)),
        ]);
        let z = q.rotate(&vec3(0.0, 0.0, 1.0));
        assert!((z - vec3(1.0, 0.0, 0.0)).norm() < 1e-12, "got {z:?}");
        assert!((q.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reciprocal_times_self_is_identity() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let p = q * q.reciprocal();
        assert!((p.re - 1.0).abs() < 1e-12);
        assert!(p.im.norm() < 1e-12);
    }

    #[test]
    fn half_turn_flips_vector() {
        let v = Quaternion::rotate_around_axis(&vec3(1.0, 0.0, 0.0), PI, &vec3(0.0, 1.0, 0.0));
        assert!((v - vec3(-1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn sum_adds_components() {
        let s = Quaternion::sum(&[Quaternion::new(1.0, 0.0, 1.0, 0.0), Quaternion::new(0.5, 1.0, 0.0, 0.0)]);
        assert_eq!(s, Quaternion::new(1.5, 1.0, 1.0, 0.0));
        assert!((s.versor().norm() - 1.0).abs() < 1e-12);
    }
}
