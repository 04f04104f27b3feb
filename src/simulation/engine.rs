//! Headless run loop
//!
//! Steps a `World` for the configured number of ticks and logs momentum,
//! kinetic energy and time every `log_every` ticks

use tracing::info;

use crate::math::vector::NVec3;
use crate::simulation::params::Parameters;
use crate::simulation::world::World;

#[derive(Debug, Clone)]
pub struct Engine {
    pub parameters: Parameters,
}

/// Diagnostics at the end of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub time: f64,           // s
    pub momentum: NVec3,     // kg·m/s
    pub kinetic_energy: f64, // J
}

impl RunSummary {
    fn of(world: &World) -> Self {
        Self {
            ticks: world.ticks(),
            time: world.time(),
            momentum: world.momentum(),
            kinetic_energy: world.kinetic_energy(),
        }
    }
}

impl Engine {
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters }
    }

    /// Run `world` from its current time for `t_end` seconds of steps
    pub fn run(&self, world: &mut World) -> RunSummary {
        world.set_dt(self.parameters.dt);
        let steps = self.parameters.steps();
        let every = self.parameters.log_every;
        info!(steps, dt = self.parameters.dt, bodies = world.bodies().len(), forces = world.forces().len(), "run start");

        for step in 1..=steps {
            world.update();
            if every > 0 && step % every == 0 {
                let p = world.momentum();
                info!(
                    tick = world.ticks(),
                    time = world.time(),
                    momentum = ?[p.x, p.y, p.z],
                    kinetic_energy = world.kinetic_energy(),
                    "diagnostics"
                );
            }
        }

        let summary = RunSummary::of(world);
        info!(ticks = summary.ticks, time = summary.time, kinetic_energy = summary.kinetic_energy, "run finished");
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::vec3;
    use crate::simulation::states::Body;

    #[test]
    fn runs_configured_number_of_steps() {
        let mut world = World::new(1.0);
        world.add_body(Body::particle(2.0, 0.0, None, Some(vec3(1.0, 0.0, 0.0))));
        let engine = Engine::new(Parameters { dt: 0.1, t_end: 2.0, log_every: 5 });
        let summary = engine.run(&mut world);

        assert_eq!(summary.ticks, 20);
        assert!((summary.time - 2.0).abs() < 1e-9);
        assert_eq!(summary.momentum, vec3(2.0, 0.0, 0.0));
        assert!((summary.kinetic_energy - 1.0).abs() < 1e-12);
        assert!((world.bodies()[0].position.x - 2.0).abs() < 1e-9);
    }
}
