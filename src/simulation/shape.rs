//! Shape variants and their inertia/volume strategy
//!
//! A body is a point, a sphere or a polyhedron. Points are not rigid: they
//! have no volume, no cross-section and no rotational state. Spheres and
//! polyhedra are rigid and carry an inertia tensor in the body-local frame.

use nalgebra::Matrix3;
use std::f64::consts::PI;
use tracing::debug;

use crate::math::vector::NVec3;
use crate::shapes::polyhedron::Polyhedron;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point,
    Sphere { radius: f64 },
    Polyhedron(Polyhedron),
}

impl Shape {
    pub fn is_rigid(&self) -> bool {
        !matches!(self, Shape::Point)
    }

    /// Bounding radius
    pub fn radius(&self) -> f64 {
        match self {
            Shape::Point => 0.0,
            Shape::Sphere { radius } => *radius,
            Shape::Polyhedron(p) => p.bounding_radius(),
        }
    }

    pub fn volume(&self) -> f64 {
        match self {
            Shape::Point => 0.0,
            Shape::Sphere { radius } => sphere_volume(*radius),
            Shape::Polyhedron(p) => p.volume(),
        }
    }

    /// Projected area along `local_axis` (body frame). A sphere looks the
    /// same from everywhere, so the axis is ignored there.
    pub fn cross_section(&self, local_axis: &NVec3) -> f64 {
        match self {
            Shape::Point => 0.0,
            Shape::Sphere { radius } => PI * radius * radius,
            Shape::Polyhedron(p) => p.cross_section(local_axis),
        }
    }

    /// Inertia tensor for a body of `mass` with this shape.
    ///
    /// - sphere: the closed form (2/5)·m·r²·I
    /// - polyhedron: Σ m·(y²+z², x²+z², x²+y²) on the diagonal and Σ -m·xy,
    ///   -m·xz, -m·yz off it, summed over the distinct vertices. This treats
    ///   every vertex as carrying the full mass, an approximation whose error
    ///   grows with uneven vertex density, not a volume integral.
    /// - point: zero
    pub fn inertia_tensor(&self, mass: f64) -> Matrix3<f64> {
        match self {
            Shape::Point => Matrix3::zeros(),
            Shape::Sphere { radius } => Matrix3::from_diagonal_element(0.4 * mass * radius * radius),
            Shape::Polyhedron(p) => {
                let mut tensor = Matrix3::zeros();
                for v in p.vertices() {
                    let (x, y, z) = (v.x, v.y, v.z);
                    tensor[(0, 0)] += y * y + z * z;
                    tensor[(1, 1)] += x * x + z * z;
                    tensor[(2, 2)] += x * x + y * y;
                    tensor[(0, 1)] -= x * y;
                    tensor[(0, 2)] -= x * z;
                    tensor[(1, 2)] -= y * z;
                }
                tensor[(1, 0)] = tensor[(0, 1)];
                tensor[(2, 0)] = tensor[(0, 2)];
                tensor[(2, 1)] = tensor[(1, 2)];
                tensor * mass
            }
        }
    }
}

pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius * radius * radius
}

/// Inverse of an inertia tensor. A singular tensor (zero radius, flat
/// polyhedron) maps to the zero matrix, so torque cannot spin the body.
pub fn invert_inertia(tensor: &Matrix3<f64>) -> Matrix3<f64> {
    tensor.try_inverse().unwrap_or_else(|| {
        debug!("singular inertia tensor, body will not respond to torque");
        Matrix3::zeros()
    })
}
