pub mod error;
pub mod math;
pub mod shapes;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{PhysicsError, Result};
pub use math::vector::{vec3, NVec3};
pub use math::quaternion::Quaternion;
pub use simulation::states::{Body, Restraint};
pub use simulation::forces::{BodyId, ForceId, Force, ForceContext, ForceSet, Gravity, Electrostatic};
pub use simulation::drag::{Buoyancy, Wind};
pub use simulation::magnetic::Magnetic;
pub use simulation::tethers::{Tether, TetherKind};
pub use simulation::rocketry::{Rocket, Thruster};
pub use simulation::controls::{ControlAction, KeyBinder};
pub use simulation::world::World;
pub use simulation::engine::{Engine, RunSummary};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ParametersConfig, BodyConfig, ForceConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_pairwise, bench_tick};
