//! Ready-made bodies with physical constants
//!
//! Particles (electron, proton, neutron, neutrino), celestial bodies (Earth,
//! Moon) and two spacecraft. A spacecraft is a polyhedron body plus the
//! thrusters of the [`Rocket`] force that flies it; [`Craft::add_to`] puts
//! both into a world.

use crate::math::vector::{vec3, Cartesian, NVec3};
use crate::shapes::polyhedron::{ring, Polyhedron};
use crate::simulation::forces::{BodyId, ForceId};
use crate::simulation::material::Color;
use crate::simulation::rocketry::{Rocket, Thruster};
use crate::simulation::states::Body;
use crate::simulation::world::World;

/// Elementary charge (C)
pub const E: f64 = 1.6022e-19;

// masses (kg)
pub const MASS_ELECTRON: f64 = 9.10938e-31;
pub const MASS_PROTON: f64 = 1.6726219e-27;
pub const MASS_NEUTRON: f64 = 1.674929e-27;
pub const MASS_NEUTRINO: f64 = MASS_ELECTRON / 1e6;
pub const MASS_EARTH: f64 = 5.972e24;
pub const MASS_MOON: f64 = 7.34767309e22;

// radii (m)
pub const RADIUS_PROTON: f64 = 8.55e-16;
pub const RADIUS_NEUTRON: f64 = 8e-16;
pub const RADIUS_EARTH: f64 = 6.371e6;
pub const RADIUS_MOON: f64 = 1_737_400.0;

pub fn electron(position: Option<NVec3>, velocity: Option<NVec3>) -> Body {
    Body::particle(MASS_ELECTRON, -E, position, velocity).with_name("Electron")
}

pub fn proton(position: Option<NVec3>, velocity: Option<NVec3>) -> Body {
    Body::sphere_unchecked(MASS_PROTON, RADIUS_PROTON, position, velocity)
        .with_charge(E)
        .with_name("Proton")
}

pub fn neutron(position: Option<NVec3>, velocity: Option<NVec3>) -> Body {
    Body::sphere_unchecked(MASS_NEUTRON, RADIUS_NEUTRON, position, velocity).with_name("Neutron")
}

pub fn neutrino(position: Option<NVec3>, velocity: Option<NVec3>) -> Body {
    Body::particle(MASS_NEUTRINO, 0.0, position, velocity).with_name("Neutrino")
}

pub fn earth(position: Option<NVec3>, velocity: Option<NVec3>) -> Body {
    Body::sphere_unchecked(MASS_EARTH, RADIUS_EARTH, position, velocity)
        .with_name("Earth")
        .with_color(Color::GREEN)
}

pub fn moon(position: Option<NVec3>, velocity: Option<NVec3>) -> Body {
    Body::sphere_unchecked(MASS_MOON, RADIUS_MOON, position, velocity)
        .with_name("Moon")
        .with_color(Color::LIGHT_GRAY)
}

/// A body and the thrusters that fly it
#[derive(Debug, Clone)]
pub struct Craft {
    pub body: Body,
    pub thrusters: Vec<Thruster>,
}

impl Craft {
    /// Add the body and its rocket force to `world`
    pub fn add_to(self, world: &mut World) -> (BodyId, ForceId) {
        let body = world.add_body(self.body);
        let rocket = world.add_force(Rocket::new(body, self.thrusters));
        (body, rocket)
    }
}

/// Triangular-based pyramid with the shuttle's height, diameter and mass,
/// thrusting along its long axis
pub fn space_shuttle(position: Option<NVec3>, velocity: Option<NVec3>) -> Craft {
    let (height, radius) = (56.14416, 8.7 / 2.0);
    let apex = vec3(0.0, height / 2.0, 0.0);
    let base = ring(3, -height / 2.0, radius);
    let hull = Polyhedron::pyramid(&apex, &base);
    let thruster = Thruster::new(997_903.214, 3054.4, 7857.50, vec3(0.0, 1.0, 0.0));
    Craft {
        body: Body::poly(242_671.918, hull, position, velocity).with_name("Space Shuttle"),
        thrusters: vec![thruster],
    }
}

/// Flattened hexagonal bipyramid with two bottomless thrusters
pub fn ufo(position: Option<NVec3>, velocity: Option<NVec3>) -> Craft {
    let (radius, height, mass) = (30.0, 10.0, 2e5);
    let mut sides = ring(6, 0.0, radius);
    for v in &mut sides {
        v.scale_along(&vec3(1.0, 1.0, 2.0));
    }
    let hull = Polyhedron::bipyramid(&vec3(0.0, height / 2.0, 0.0), &vec3(0.0, -height / 2.0, 0.0), &sides);
    Craft {
        body: Body::poly(mass, hull, position, velocity).with_name("UFO"),
        thrusters: vec![
            Thruster::infinite(mass * 1e3, vec3(0.0, 0.0, -1.0)),
            Thruster::infinite(mass * 1e6, vec3(0.0, 0.0, -1.0)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_constants() {
        let e = electron(None, None);
        assert_eq!(e.charge(), -E);
        assert!(!e.is_rigid());
        let p = proton(None, None);
        assert_eq!(p.charge(), E);
        assert_eq!(p.radius(), RADIUS_PROTON);
        assert_eq!(neutrino(None, None).mass(), MASS_ELECTRON / 1e6);
        assert_eq!(neutron(None, None).charge(), 0.0);
    }

    #[test]
    fn earth_surface_gravity() {
        let g = crate::simulation::forces::Gravity::G * MASS_EARTH / (RADIUS_EARTH * RADIUS_EARTH);
        assert!((g - 9.82).abs() < 0.01, "got {g}");
        assert_eq!(earth(None, None).color, Color::GREEN);
        assert_eq!(moon(None, None).name, "Moon");
    }

    #[test]
    fn shuttle_hull_is_closed() {
        let shuttle = space_shuttle(None, None);
        // a pyramid over an equilateral triangle: V = A·h/3
        let side = 8.7 / 2.0 * 3f64.sqrt();
        let expected = 3f64.sqrt() / 4.0 * side * side * 56.14416 / 3.0;
        assert!((shuttle.body.volume() - expected).abs() < 1e-6, "got {}", shuttle.body.volume());
        assert_eq!(shuttle.thrusters.len(), 1);
        assert!((shuttle.thrusters[0].thrust() - 3054.4 * 7857.50).abs() < 1e-6);
    }

    #[test]
    fn ufo_flies() {
        let mut world = World::new(0.01);
        let (ship, _) = ufo(None, None).add_to(&mut world);
        assert_eq!(world.body(ship).map(|b| b.name.as_str()), Some("UFO"));
        assert!(world.body(ship).unwrap().volume() > 0.0);
    }
}
