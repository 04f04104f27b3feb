//! Background vector fields
//!
//! A [`VectorField`] maps a position to a vector. Forces use them for
//! background terms: gravitational acceleration, electric field, magnetic
//! field, wind velocity. Any `Fn(&NVec3) -> NVec3` closure is a field.

use super::vector::{distance, NVec3};

pub trait VectorField: Send + Sync {
    fn vector_at(&self, position: &NVec3) -> NVec3;
}

impl<F> VectorField for F
where
    F: Fn(&NVec3) -> NVec3 + Send + Sync,
{
    fn vector_at(&self, position: &NVec3) -> NVec3 {
        self(position)
    }
}

/// The same vector everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField(pub NVec3);

impl VectorField for UniformField {
    fn vector_at(&self, _position: &NVec3) -> NVec3 {
        self.0
    }
}

impl UniformField {
    /// Acceleration due to gravity at the Earth's surface (m/s^2), along -y
    pub fn earth_gravity() -> Self {
        Self(NVec3::new(0.0, -9.8, 0.0))
    }
}

/// Horizontal swirl around a vertical axis through `center` (a tornado).
///
/// The field has constant magnitude `speed` and circulates counter-clockwise
/// seen from +z. It is undefined on the axis itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vortex {
    pub center: NVec3, // a point on the axis
    pub speed: f64,    // wind speed (m/s)
}

impl VectorField for Vortex {
    fn vector_at(&self, position: &NVec3) -> NVec3 {
        NVec3::new(
            self.speed * (self.center.y - position.y),
            self.speed * (position.x - self.center.x),
            0.0,
        ) / distance(position, &self.center)
    }
}
