//! Fluid forces: quadratic air drag ([`Wind`]) and buoyancy in a liquid
//! ([`Buoyancy`])

use std::f64::consts::PI;

use crate::math::field::VectorField;
use crate::math::vector::NVec3;
use crate::simulation::forces::{BodyId, Force, ForceContext};
use crate::simulation::shape::Shape;

/// Quadratic drag relative to a (possibly moving) air mass
///
/// `F = -½·ρ·Cd·A·|v_rel|·v_rel`, `v_rel = v - wind(x)`, with `A` the body's
/// cross-section seen along `v_rel`. Point particles have no cross-section
/// and feel nothing.
pub struct Wind {
    air_density: f64,      // kg/m³
    drag_coefficient: f64, // dimensionless
    strength: f64,         // -½·ρ·Cd, the consolidated coefficient
    pub field: Option<Box<dyn VectorField>>, // wind velocity (m/s), still air if None
}

impl Wind {
    /// Density of air at the Earth's surface (kg/m³)
    pub const EARTH_ATMOSPHERIC_DENSITY: f64 = 1.225;
    /// Drag coefficient of a large rough sphere
    pub const DRAG_COEFFICIENT_SPHERE: f64 = 0.47;

    pub fn new(air_density: f64, drag_coefficient: f64, field: Option<Box<dyn VectorField>>) -> Self {
        let mut wind = Self { air_density: 0.0, drag_coefficient: 0.0, strength: 0.0, field };
        wind.set_coefficients(air_density, drag_coefficient);
        wind
    }

    /// Earth's air and a sphere drag coefficient
    pub fn earth(field: Option<Box<dyn VectorField>>) -> Self {
        Self::new(Self::EARTH_ATMOSPHERIC_DENSITY, Self::DRAG_COEFFICIENT_SPHERE, field)
    }

    /// From the consolidated coefficient `strength = ½·ρ·Cd` (positive).
    /// The drag coefficient stays the sphere value and the air density is
    /// derived from it.
    pub fn with_strength(strength: f64, field: Option<Box<dyn VectorField>>) -> Self {
        let mut wind = Self::earth(field);
        wind.set_strength(strength);
        wind
    }

    pub fn set_coefficients(&mut self, air_density: f64, drag_coefficient: f64) {
        self.air_density = air_density;
        self.drag_coefficient = drag_coefficient;
        self.strength = -0.5 * air_density * drag_coefficient;
    }

    pub fn set_strength(&mut self, strength: f64) {
        self.strength = -strength;
        self.drag_coefficient = Self::DRAG_COEFFICIENT_SPHERE;
        self.air_density = 2.0 * strength / self.drag_coefficient;
    }

    pub fn set_air_density(&mut self, air_density: f64) {
        self.set_coefficients(air_density, self.drag_coefficient);
    }

    pub fn set_drag_coefficient(&mut self, drag_coefficient: f64) {
        self.set_coefficients(self.air_density, drag_coefficient);
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    /// The signed coefficient -½·ρ·Cd
    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl Default for Wind {
    fn default() -> Self {
        Self::earth(None)
    }
}

impl Force for Wind {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        for i in 0..ctx.len() {
            let b = &ctx.bodies()[i];
            let v_rel = match &self.field {
                Some(field) => b.velocity - field.vector_at(&b.position),
                None => b.velocity,
            };
            let area = b.cross_section(&v_rel);
            let f = v_rel * (self.strength * area * v_rel.norm());
            ctx.apply_force(BodyId(i), &f);
        }
    }

    fn name(&self) -> &str {
        "wind"
    }
}

/// Archimedes' force on spheres in a liquid filling everything below
/// `sea_level` (on the z axis). Other shapes are left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buoyancy {
    pub density: f64,   // kg/m³ of the liquid
    pub sea_level: f64, // m, z of the surface
}

impl Buoyancy {
    /// Density of fresh water (kg/m³)
    pub const WATER: f64 = 1000.0;

    pub fn new(density: f64) -> Self {
        Self { density, sea_level: 0.0 }
    }

    pub fn with_sea_level(mut self, sea_level: f64) -> Self {
        self.sea_level = sea_level;
        self
    }

    /// Upward force magnitude on a sphere of `radius` whose centre is at height `z`
    pub fn lift(&self, radius: f64, z: f64) -> f64 {
        // depth of the lowest point below the surface
        let h = self.sea_level - (z - radius);
        if h >= 2.0 * radius {
            4.0 / 3.0 * PI * radius.powi(3) * self.density
        } else if h > 0.0 {
            // spherical cap
            PI * h * h * (radius - h / 3.0) * self.density
        } else {
            0.0
        }
    }
}

impl Force for Buoyancy {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        for i in 0..ctx.len() {
            let b = &ctx.bodies()[i];
            let Shape::Sphere { radius } = b.shape() else {
                continue;
            };
            let f = NVec3::new(0.0, 0.0, self.lift(*radius, b.position.z));
            ctx.apply_force(BodyId(i), &f);
        }
    }

    fn name(&self) -> &str {
        "buoyancy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::field::UniformField;
    use crate::math::vector::vec3;
    use crate::simulation::states::Body;

    #[test]
    fn drag_opposes_motion() {
        let mut bodies = vec![Body::sphere(1.0, 1.0, None, Some(vec3(2.0, 0.0, 0.0))).unwrap()];
        Wind::default().apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        let f = *bodies[0].net_force();
        let expected = -0.5 * 1.225 * 0.47 * PI * 4.0;
        assert!((f.x - expected).abs() < 1e-12, "got {f:?}");
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn body_moving_with_the_wind_feels_nothing() {
        let mut bodies = vec![Body::sphere(1.0, 1.0, None, Some(vec3(3.0, 0.0, 0.0))).unwrap()];
        let mut wind = Wind::earth(Some(Box::new(UniformField(vec3(3.0, 0.0, 0.0)))));
        wind.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert_eq!(*bodies[0].net_force(), NVec3::zeros());
    }

    #[test]
    fn consolidated_strength_derives_density() {
        let w = Wind::with_strength(0.47, None);
        assert_eq!(w.strength(), -0.47);
        assert_eq!(w.drag_coefficient(), Wind::DRAG_COEFFICIENT_SPHERE);
        assert!((w.air_density() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn buoyancy_cases() {
        let water = Buoyancy::new(Buoyancy::WATER);
        let full = 4.0 / 3.0 * PI * 1000.0;
        assert!((water.lift(1.0, -5.0) - full).abs() < 1e-9);
        // centre on the surface: half submerged
        assert!((water.lift(1.0, 0.0) - full / 2.0).abs() < 1e-9);
        assert_eq!(water.lift(1.0, 1.5), 0.0);
    }

    #[test]
    fn buoyancy_skips_non_spheres() {
        let mut bodies = vec![
            Body::particle(1.0, 0.0, Some(vec3(0.0, 0.0, -1.0)), None),
            Body::sphere(1.0, 0.5, Some(vec3(0.0, 0.0, -1.0)), None).unwrap(),
        ];
        Buoyancy::new(Buoyancy::WATER).apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert_eq!(*bodies[0].net_force(), NVec3::zeros());
        assert!(bodies[1].net_force().z > 0.0);
    }
}
