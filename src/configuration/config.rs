//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – time step, end time and logging cadence
//! - [`TraceSettings`]    – how densely body paths are recorded (optional)
//! - [`BodyConfig`]       – initial state of each body, by kind
//! - [`ForceConfig`]      – force laws, run in the order listed
//! - [`MeshConfig`]       – rubber-band lattices added after the bodies
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   dt: 0.01                # fixed step (s)
//!   t_end: 10.0             # total simulated time (s)
//!   log_every: 100          # ticks between diagnostics
//!
//! trace:
//!   coarseness: standard    # coarse | standard | fine
//!   integrity: 2
//!
//! bodies:
//!   - kind: fixed
//!     mass: 1.0
//!     position: [0.0, 0.0, 0.0]
//!   - kind: sphere
//!     mass: 1.0
//!     radius: 0.1
//!     position: [1.0, 0.0, 0.0]
//!     material: iron
//!
//! forces:
//!   - kind: gravity
//!     strength: 0.0
//!     field: { uniform: [0.0, -9.8, 0.0] }
//!   - kind: spring
//!     stiffness: 900.0
//!     a: 0                  # body indices, in the order listed above
//!     b: 1
//! ```
//!
//! Vectors are plain lists so that a wrong length is reported by the
//! scenario builder with the field it belongs to.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::simulation::material::{Color, Material};
use crate::simulation::mesh::Support;
use crate::simulation::trace::TraceSettings;

/// Numerical parameters of a run
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,    // time step size (s)
    pub t_end: f64, // time end (s)
    #[serde(default = "default_log_every")]
    pub log_every: u64, // ticks between diagnostics lines, 0 = never
}

fn default_log_every() -> u64 {
    100
}

/// Initial position and velocity, shared by every body kind.
/// Missing vectors mean zero.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct KinematicsConfig {
    #[serde(default)]
    pub position: Option<Vec<f64>>,
    #[serde(default)]
    pub velocity: Option<Vec<f64>>,
}

/// Display and identity settings, shared by every body kind
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LabelConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<Color>,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyConfig {
    Particle {
        mass: f64,
        #[serde(default)]
        charge: f64,
        #[serde(flatten)]
        kinematics: KinematicsConfig,
        #[serde(flatten)]
        label: LabelConfig,
    },
    Sphere {
        mass: f64,
        radius: f64,
        #[serde(default)]
        charge: f64,
        #[serde(default)]
        material: Option<Material>,
        #[serde(flatten)]
        kinematics: KinematicsConfig,
        #[serde(flatten)]
        label: LabelConfig,
    },
    Cuboid {
        mass: f64,
        width: f64,
        height: f64,
        depth: f64,
        #[serde(default)]
        material: Option<Material>,
        #[serde(flatten)]
        kinematics: KinematicsConfig,
        #[serde(flatten)]
        label: LabelConfig,
    },
    /// Ignores every force; keeps its initial velocity
    Fixed {
        mass: f64,
        #[serde(flatten)]
        kinematics: KinematicsConfig,
        #[serde(flatten)]
        label: LabelConfig,
    },
    /// Moves only along `dofs`
    Restrained {
        mass: f64,
        #[serde(default)]
        charge: f64,
        dofs: Vec<Vec<f64>>,
        #[serde(flatten)]
        kinematics: KinematicsConfig,
        #[serde(flatten)]
        label: LabelConfig,
    },
    Electron(KinematicsConfig),
    Proton(KinematicsConfig),
    Neutron(KinematicsConfig),
    Neutrino(KinematicsConfig),
    Earth(KinematicsConfig),
    Moon(KinematicsConfig),
    /// Also registers the craft's rocket force
    SpaceShuttle(KinematicsConfig),
    /// Also registers the craft's rocket force
    Ufo(KinematicsConfig),
}

/// Background vector field
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FieldConfig {
    Uniform(Vec<f64>),
    Vortex { center: Vec<f64>, speed: f64 },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThrusterConfig {
    Finite {
        fuel_mass: f64,
        exhaust_speed: f64,
        consumption_rate: f64,
        direction: Vec<f64>,
    },
    Infinite {
        thrust: f64,
        direction: Vec<f64>,
    },
    Solar {
        fuel_mass: f64,
        exhaust_speed: f64,
        consumption_rate: f64,
        recharge_rate: f64,
        direction: Vec<f64>,
    },
}

/// A force law. Body references are indices into `bodies`, counting mesh
/// particles after the listed bodies.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceConfig {
    Gravity {
        #[serde(default)]
        strength: Option<f64>, // defaults to G
        #[serde(default)]
        field: Option<FieldConfig>,
    },
    Electrostatic {
        #[serde(default)]
        strength: Option<f64>, // defaults to 1/(4πε₀)
        #[serde(default)]
        field: Option<FieldConfig>,
    },
    Magnetic {
        field: FieldConfig,
        #[serde(default)]
        use_correction: bool,
    },
    Wind {
        #[serde(default)]
        air_density: Option<f64>,
        #[serde(default)]
        drag_coefficient: Option<f64>,
        #[serde(default)]
        strength: Option<f64>, // overrides the two above
        #[serde(default)]
        field: Option<FieldConfig>,
    },
    Buoyancy {
        density: f64,
        #[serde(default)]
        sea_level: f64,
    },
    Spring {
        stiffness: f64,
        a: usize,
        b: usize,
        #[serde(default)]
        length: Option<f64>, // taut when missing
    },
    RubberBand {
        stiffness: f64,
        a: usize,
        b: usize,
        #[serde(default)]
        length: Option<f64>, // taut when missing
    },
    Rocket {
        body: usize,
        thrusters: Vec<ThrusterConfig>,
        #[serde(default)]
        torque: Option<f64>,
    },
}

#[derive(Deserialize, Debug, Clone)]
pub struct MeshConfig {
    pub width: usize,
    pub height: usize,
    pub origin: Vec<f64>,
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
    pub mass: f64,
    pub stiffness: f64, // both directions unless overridden below
    #[serde(default)]
    pub horizontal_stiffness: Option<f64>,
    #[serde(default)]
    pub vertical_stiffness: Option<f64>,
    #[serde(default)]
    pub support: Support,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // step size, end time, logging
    #[serde(default)]
    pub trace: TraceSettings, // path recording
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // initial state of the system
    #[serde(default)]
    pub forces: Vec<ForceConfig>, // force laws, in registration order
    #[serde(default)]
    pub meshes: Vec<MeshConfig>, // lattices, added after the bodies
}

impl ScenarioConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Read and parse a scenario file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Failed to parse scenario file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::trace::Coarseness;

    #[test]
    fn parses_minimal_scenario() {
        let cfg = ScenarioConfig::from_yaml("parameters: { dt: 0.5, t_end: 2.0 }").unwrap();
        assert_eq!(cfg.parameters.log_every, 100);
        assert_eq!(cfg.trace, TraceSettings::default());
        assert!(cfg.bodies.is_empty() && cfg.forces.is_empty() && cfg.meshes.is_empty());
    }

    #[test]
    fn parses_kinds_and_fields() {
        let yaml = r#"
parameters: { dt: 0.01, t_end: 1.0, log_every: 0 }
trace: { coarseness: fine }
bodies:
  - { kind: sphere, mass: 2.0, radius: 0.5, position: [1, 2, 3], material: gold, name: ball }
  - { kind: earth }
  - { kind: restrained, mass: 1.0, dofs: [[0, 0, 1]] }
forces:
  - { kind: gravity, field: { uniform: [0, -9.8, 0] } }
  - { kind: wind, field: { vortex: { center: [0, 0, 0], speed: 3 } } }
  - { kind: rubber_band, stiffness: 5, a: 0, b: 2 }
  - kind: rocket
    body: 0
    thrusters:
      - { kind: infinite, thrust: 10, direction: [0, 1, 0] }
"#;
        let cfg = ScenarioConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.trace.coarseness, Coarseness::Fine);
        assert_eq!(cfg.trace.integrity, 2);
        assert_eq!(cfg.bodies.len(), 3);
        match &cfg.bodies[0] {
            BodyConfig::Sphere { material, kinematics, label, .. } => {
                assert_eq!(*material, Some(Material::Gold));
                assert_eq!(kinematics.position, Some(vec![1.0, 2.0, 3.0]));
                assert_eq!(label.name.as_deref(), Some("ball"));
            }
            other => panic!("expected a sphere, got {other:?}"),
        }
        assert!(matches!(cfg.bodies[1], BodyConfig::Earth(_)));
        match &cfg.forces[1] {
            ForceConfig::Wind { field: Some(FieldConfig::Vortex { speed, .. }), .. } => assert_eq!(*speed, 3.0),
            other => panic!("expected a vortex wind, got {other:?}"),
        }
        assert!(matches!(cfg.forces[3], ForceConfig::Rocket { body: 0, .. }));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let yaml = "parameters: { dt: 0.1, t_end: 1.0 }\nbodies:\n  - { kind: blob, mass: 1 }\n";
        assert!(ScenarioConfig::from_yaml(yaml).is_err());
    }
}
