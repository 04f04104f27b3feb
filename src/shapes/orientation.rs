//! Orientation of a body: three local axes plus the cumulative rotation
//!
//! The axes are never rotated independently. Every [`Orientation::rotate`]
//! composes the incoming rotor onto `total_rotation` and re-derives the axes
//! from it, so they stay orthonormal as long as the rotors fed in are unit
//! quaternions.

use std::fmt;

use nalgebra::Matrix3;

use crate::math::quaternion::Quaternion;
use crate::math::vector::NVec3;

/// Index of a local axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    axes: [NVec3; 3],
    total_rotation: Quaternion,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new()
    }
}

impl Orientation {
    /// x = (1,0,0), y = (0,1,0), z = (0,0,1), no rotation
    pub fn new() -> Self {
        Self {
            axes: [NVec3::x(), NVec3::y(), NVec3::z()],
            total_rotation: Quaternion::identity(),
        }
    }

    /// Matrix taking a vector expressed in basis `from` to basis `to`
    pub fn transformation_matrix(from: &Orientation, to: &Orientation) -> Matrix3<f64> {
        Matrix3::from_fn(|i, j| to.axes[i].dot(&from.axes[j]))
    }

    /// Apply `rotation` on top of the current orientation
    pub fn rotate(&mut self, rotation: &Quaternion) {
        self.total_rotation.multiply_by_left(rotation);
        self.derive_axes();
    }

    /// Rotate about one of this orientation's own axes
    pub fn rotate_around_axis(&mut self, axis: Axis, angle: f64) {
        let q = Quaternion::rotation(angle, &self.axes[axis as usize]);
        self.rotate(&q);
    }

    fn derive_axes(&mut self) {
        let q = self.total_rotation;
        self.axes = [
            q.rotate(&NVec3::x()),
            q.rotate(&NVec3::y()),
            q.rotate(&NVec3::z()),
        ];
    }

    pub fn axis(&self, axis: Axis) -> &NVec3 {
        &self.axes[axis as usize]
    }

    pub fn axes(&self) -> &[NVec3; 3] {
        &self.axes
    }

    pub fn x_axis(&self) -> &NVec3 {
        &self.axes[0]
    }

    pub fn y_axis(&self) -> &NVec3 {
        &self.axes[1]
    }

    pub fn z_axis(&self) -> &NVec3 {
        &self.axes[2]
    }

    /// Rotation accumulated since creation
    pub fn total_rotation(&self) -> &Quaternion {
        &self.total_rotation
    }

    /// World-space vector expressed in the local axes
    pub fn to_local(&self, v: &NVec3) -> NVec3 {
        NVec3::new(v.dot(&self.axes[0]), v.dot(&self.axes[1]), v.dot(&self.axes[2]))
    }

    /// Local vector expressed in world space
    pub fn to_world(&self, v: &NVec3) -> NVec3 {
        self.total_rotation.rotate(v)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "x = {:?}", self.axes[0].as_slice())?;
        writeln!(f, "y = {:?}", self.axes[1].as_slice())?;
        write!(f, "z = {:?}", self.axes[2].as_slice())
    }
}
