//! Build a ready-to-run world from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a [`Scenario`]:
//! - numerical parameters (`Parameters`)
//! - the world with its bodies at t = 0, meshes, and forces in the order
//!   listed
//! - the key bindings of every controllable force
//!
//! Everything is validated here, before the first tick: vector lengths, body
//! indices, radii and masses.

use tracing::{debug, info};

use crate::configuration::config::{
    BodyConfig, FieldConfig, ForceConfig, KinematicsConfig, LabelConfig, MeshConfig, ScenarioConfig, ThrusterConfig,
};
use crate::error::{PhysicsError, Result};
use crate::math::field::{UniformField, VectorField, Vortex};
use crate::math::vector::NVec3;
use crate::shapes::polyhedron::Polyhedron;
use crate::simulation::catalog;
use crate::simulation::controls::KeyBinder;
use crate::simulation::drag::{Buoyancy, Wind};
use crate::simulation::forces::{BodyId, BoxedForce, Electrostatic, Gravity};
use crate::simulation::magnetic::Magnetic;
use crate::simulation::mesh::RectangularMesh;
use crate::simulation::params::Parameters;
use crate::simulation::rocketry::{Rocket, Thruster};
use crate::simulation::states::Body;
use crate::simulation::tethers::{Tether, TetherKind};
use crate::simulation::world::World;

/// A fully-initialized simulation
pub struct Scenario {
    pub parameters: Parameters,
    pub world: World,
    pub controls: KeyBinder,
}

/// Three components, or an error naming `what`
fn vector(v: &[f64], what: &str) -> Result<NVec3> {
    match v {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(PhysicsError::InvalidScenario(format!(
            "{what} must have 3 components, got {}",
            v.len()
        ))),
    }
}

fn optional_vector(v: &Option<Vec<f64>>, what: &str) -> Result<Option<NVec3>> {
    v.as_deref().map(|v| vector(v, what)).transpose()
}

fn positive_mass(mass: f64) -> Result<f64> {
    if mass > 0.0 {
        Ok(mass)
    } else {
        Err(PhysicsError::NonPositiveMass(mass))
    }
}

fn labelled(mut body: Body, label: &LabelConfig) -> Body {
    if let Some(name) = &label.name {
        body.name = name.clone();
    }
    if let Some(color) = label.color {
        body.color = color;
    }
    body
}

fn field(cfg: &FieldConfig) -> Result<Box<dyn VectorField>> {
    Ok(match cfg {
        FieldConfig::Uniform(v) => Box::new(UniformField(vector(v, "uniform field")?)),
        FieldConfig::Vortex { center, speed } => Box::new(Vortex { center: vector(center, "vortex center")?, speed: *speed }),
    })
}

fn optional_field(cfg: &Option<FieldConfig>) -> Result<Option<Box<dyn VectorField>>> {
    cfg.as_ref().map(field).transpose()
}

fn thruster(cfg: &ThrusterConfig) -> Result<Thruster> {
    Ok(match cfg {
        ThrusterConfig::Finite { fuel_mass, exhaust_speed, consumption_rate, direction } => {
            Thruster::new(*fuel_mass, *exhaust_speed, *consumption_rate, vector(direction, "thruster direction")?)
        }
        ThrusterConfig::Infinite { thrust, direction } => Thruster::infinite(*thrust, vector(direction, "thruster direction")?),
        ThrusterConfig::Solar { fuel_mass, exhaust_speed, consumption_rate, recharge_rate, direction } => Thruster::solar(
            *fuel_mass,
            *exhaust_speed,
            *consumption_rate,
            *recharge_rate,
            vector(direction, "thruster direction")?,
        ),
    })
}

/// Add one configured body. Spacecraft also bring their rocket force.
fn add_body(world: &mut World, cfg: &BodyConfig) -> Result<BodyId> {
    let kin = |k: &KinematicsConfig| -> Result<(Option<NVec3>, Option<NVec3>)> {
        Ok((optional_vector(&k.position, "position")?, optional_vector(&k.velocity, "velocity")?))
    };

    let body = match cfg {
        BodyConfig::Particle { mass, charge, kinematics, label } => {
            let (x, v) = kin(kinematics)?;
            labelled(Body::particle(positive_mass(*mass)?, *charge, x, v), label)
        }
        BodyConfig::Sphere { mass, radius, charge, material, kinematics, label } => {
            let (x, v) = kin(kinematics)?;
            let mut body = Body::sphere(positive_mass(*mass)?, *radius, x, v)?.with_charge(*charge);
            body.set_material(*material);
            labelled(body, label)
        }
        BodyConfig::Cuboid { mass, width, height, depth, material, kinematics, label } => {
            let (x, v) = kin(kinematics)?;
            let hull = Polyhedron::cuboid(*width, *height, *depth);
            let mut body = Body::poly(positive_mass(*mass)?, hull, x, v);
            body.set_material(*material);
            labelled(body, label)
        }
        BodyConfig::Fixed { mass, kinematics, label } => {
            let (x, v) = kin(kinematics)?;
            labelled(Body::fixed_point(positive_mass(*mass)?, x, v), label)
        }
        BodyConfig::Restrained { mass, charge, dofs, kinematics, label } => {
            let (x, v) = kin(kinematics)?;
            let dofs = dofs.iter().map(|d| vector(d, "degree of freedom")).collect::<Result<Vec<_>>>()?;
            if let Some(zero) = dofs.iter().position(|d| *d == NVec3::zeros()) {
                return Err(PhysicsError::InvalidScenario(format!("degree of freedom {zero} is the zero vector")));
            }
            labelled(Body::restrained(positive_mass(*mass)?, *charge, x, v, &dofs), label)
        }
        BodyConfig::Electron(k) => {
            let (x, v) = kin(k)?;
            catalog::electron(x, v)
        }
        BodyConfig::Proton(k) => {
            let (x, v) = kin(k)?;
            catalog::proton(x, v)
        }
        BodyConfig::Neutron(k) => {
            let (x, v) = kin(k)?;
            catalog::neutron(x, v)
        }
        BodyConfig::Neutrino(k) => {
            let (x, v) = kin(k)?;
            catalog::neutrino(x, v)
        }
        BodyConfig::Earth(k) => {
            let (x, v) = kin(k)?;
            catalog::earth(x, v)
        }
        BodyConfig::Moon(k) => {
            let (x, v) = kin(k)?;
            catalog::moon(x, v)
        }
        BodyConfig::SpaceShuttle(k) => {
            let (x, v) = kin(k)?;
            return Ok(catalog::space_shuttle(x, v).add_to(world).0);
        }
        BodyConfig::Ufo(k) => {
            let (x, v) = kin(k)?;
            return Ok(catalog::ufo(x, v).add_to(world).0);
        }
    };
    Ok(world.add_body(body))
}

fn body_id(world: &World, index: usize) -> Result<BodyId> {
    world.body(BodyId(index)).map(|_| BodyId(index)).ok_or(PhysicsError::UnknownBody(index))
}

fn tether(world: &World, kind: TetherKind, stiffness: f64, a: usize, b: usize, length: Option<f64>) -> Result<Tether> {
    let (a, b) = (body_id(world, a)?, body_id(world, b)?);
    match length {
        Some(length) => Ok(Tether { kind, a, b, stiffness, length }),
        None => Tether::taut(kind, stiffness, a, b, world.bodies()),
    }
}

fn force(world: &World, cfg: &ForceConfig) -> Result<BoxedForce> {
    Ok(match cfg {
        ForceConfig::Gravity { strength, field } => {
            Box::new(Gravity::with_strength(strength.unwrap_or(Gravity::G), optional_field(field)?))
        }
        ForceConfig::Electrostatic { strength, field } => Box::new(Electrostatic::with_strength(
            strength.unwrap_or_else(Electrostatic::field_constant),
            optional_field(field)?,
        )),
        ForceConfig::Magnetic { field: f, use_correction } => {
            Box::new(Magnetic { field: Some(field(f)?), use_correction: *use_correction })
        }
        ForceConfig::Wind { air_density, drag_coefficient, strength, field } => {
            let field = optional_field(field)?;
            Box::new(match strength {
                Some(s) => Wind::with_strength(*s, field),
                None => Wind::new(
                    air_density.unwrap_or(Wind::EARTH_ATMOSPHERIC_DENSITY),
                    drag_coefficient.unwrap_or(Wind::DRAG_COEFFICIENT_SPHERE),
                    field,
                ),
            })
        }
        ForceConfig::Buoyancy { density, sea_level } => Box::new(Buoyancy::new(*density).with_sea_level(*sea_level)),
        ForceConfig::Spring { stiffness, a, b, length } => {
            Box::new(tether(world, TetherKind::Spring, *stiffness, *a, *b, *length)?)
        }
        ForceConfig::RubberBand { stiffness, a, b, length } => {
            Box::new(tether(world, TetherKind::RubberBand, *stiffness, *a, *b, *length)?)
        }
        ForceConfig::Rocket { body, thrusters, torque } => {
            let thrusters = thrusters.iter().map(thruster).collect::<Result<Vec<_>>>()?;
            let rocket = Rocket::new(body_id(world, *body)?, thrusters);
            Box::new(match torque {
                Some(t) => rocket.with_torque_strength(*t),
                None => rocket,
            })
        }
    })
}

fn mesh(cfg: &MeshConfig) -> Result<RectangularMesh> {
    Ok(RectangularMesh::new(
        cfg.width,
        cfg.height,
        vector(&cfg.origin, "mesh origin")?,
        vector(&cfg.dx, "mesh dx")?,
        vector(&cfg.dy, "mesh dy")?,
        cfg.mass,
        cfg.stiffness,
    )
    .with_stiffness(
        cfg.horizontal_stiffness.unwrap_or(cfg.stiffness),
        cfg.vertical_stiffness.unwrap_or(cfg.stiffness),
    )
    .supported(cfg.support))
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters::from(&cfg.parameters);
        if parameters.dt.is_nan() || parameters.dt <= 0.0 {
            return Err(PhysicsError::InvalidScenario(format!("dt must be positive, got {}", parameters.dt)));
        }

        let mut world = World::new(parameters.dt).with_trace_settings(cfg.trace);

        // Bodies, then mesh particles, so indices in `forces` are stable
        for bc in &cfg.bodies {
            add_body(&mut world, bc)?;
        }
        for mc in &cfg.meshes {
            mesh(mc)?.add_to(&mut world)?;
        }

        // Forces, in the order listed
        for fc in &cfg.forces {
            let f = force(&world, fc)?;
            world.add_boxed_force(f);
        }

        let mut controls = KeyBinder::new();
        world.bind_controls(&mut controls);

        debug!(bindings = controls.len(), "controls bound");
        info!(bodies = world.bodies().len(), forces = world.forces().len(), dt = parameters.dt, "scenario built");
        Ok(Self { parameters, world, controls })
    }
}
