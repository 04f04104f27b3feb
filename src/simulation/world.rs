//! The world: bodies, forces, the clock and the traces
//!
//! `World::update` runs one tick of [`semi_implicit_euler`], advances the
//! clock and grows the traces. A tick borrows the world exclusively, so `dt`
//! and the collections can only change between ticks. Bodies and forces are
//! only ever appended and are addressed by the [`BodyId`]/[`ForceId`] handed
//! out when they are added.

use tracing::{debug, trace};

use crate::math::vector::NVec3;
use crate::simulation::controls::{KeyBinder, ControlAction};
use crate::simulation::forces::{BodyId, BoxedForce, Force, ForceId, ForceSet};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::states::Body;
use crate::simulation::trace::{Trace, TraceSettings};

pub struct World {
    bodies: Vec<Body>,
    forces: ForceSet,
    traces: Vec<Trace>, // one per body, same index
    trace_settings: TraceSettings,
    dt: f64,    // s
    time: f64,  // s
    ticks: u64,
}

impl World {
    pub fn new(dt: f64) -> Self {
        Self {
            bodies: Vec::new(),
            forces: ForceSet::new(),
            traces: Vec::new(),
            trace_settings: TraceSettings::default(),
            dt,
            time: 0.0,
            ticks: 0,
        }
    }

    pub fn with_trace_settings(mut self, settings: TraceSettings) -> Self {
        self.trace_settings = settings;
        self
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len());
        debug!(id = id.0, name = %body.name, mass = body.mass(), "body added");
        self.bodies.push(body);
        self.traces.push(Trace::new(id));
        id
    }

    pub fn add_force(&mut self, force: impl Force + Send + Sync + 'static) -> ForceId {
        self.add_boxed_force(Box::new(force))
    }

    pub fn add_boxed_force(&mut self, force: BoxedForce) -> ForceId {
        debug!(force = force.name(), "force added");
        self.forces.push(force)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    /// Mutable access to a force between ticks (e.g. to switch a rocket's engine)
    pub fn force_mut(&mut self, id: ForceId) -> Option<&mut BoxedForce> {
        self.forces.get_mut(id)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.dt = dt;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time as seen at `position`. There is one global clock, so this is
    /// the same everywhere.
    pub fn time_at(&self, _position: &NVec3) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn trace(&self, id: BodyId) -> Option<&Trace> {
        self.traces.get(id.0)
    }

    pub fn trace_mut(&mut self, id: BodyId) -> Option<&mut Trace> {
        self.traces.get_mut(id.0)
    }

    pub fn trace_settings(&self) -> &TraceSettings {
        &self.trace_settings
    }

    pub fn set_trace_settings(&mut self, settings: TraceSettings) {
        self.trace_settings = settings;
    }

    /// Turn every trace on or off
    pub fn set_traces_active(&mut self, active: bool) {
        for t in &mut self.traces {
            t.set_active(active);
        }
    }

    /// Advance the world by one tick of `dt`
    pub fn update(&mut self) {
        semi_implicit_euler(&mut self.bodies, &mut self.forces, self.dt, self.time);
        self.time += self.dt;
        self.ticks += 1;

        for t in &mut self.traces {
            if let Some(body) = self.bodies.get(t.target().0) {
                t.grow(body, &self.trace_settings);
            }
        }
        trace!(tick = self.ticks, time = self.time, "tick");
    }

    /// Register the key bindings of every controllable force
    pub fn bind_controls(&mut self, binder: &mut KeyBinder) {
        for (i, force) in self.forces.iter_mut().enumerate() {
            if let Some(c) = force.as_controllable() {
                c.add_bindings_to(binder, ForceId(i));
            }
        }
    }

    /// Route a key press/release to the force it is bound to. Returns
    /// whether anything handled it.
    pub fn dispatch(&mut self, binder: &KeyBinder, key: &str, pressed: bool) -> bool {
        let Some(binding) = binder.binding(key) else {
            return false;
        };
        let Some(c) = self.forces.get_mut(binding.force).and_then(|f| f.as_controllable()) else {
            return false;
        };
        if matches!(binding.action, ControlAction::Trigger(_)) && !pressed {
            return false;
        }
        c.control(binding.action, pressed);
        true
    }

    /// Σ m·v
    pub fn momentum(&self) -> NVec3 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Translational plus rotational kinetic energy of every body
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::vec3;
    use crate::simulation::forces::Gravity;
    use crate::simulation::rocketry::{Rocket, Thruster};

    #[test]
    fn clock_advances_per_tick() {
        let mut w = World::new(0.25);
        w.add_body(Body::particle(1.0, 0.0, None, None));
        for _ in 0..4 {
            w.update();
        }
        assert_eq!(w.time(), 1.0);
        assert_eq!(w.ticks(), 4);
        assert_eq!(w.time_at(&vec3(1e9, 0.0, 0.0)), 1.0);

        w.set_dt(0.5);
        w.update();
        assert_eq!(w.time(), 1.5);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut w = World::new(0.1);
        let a = w.add_body(Body::particle(1.0, 0.0, None, None));
        let b = w.add_body(Body::particle(2.0, 0.0, None, None));
        assert_eq!((a, b), (BodyId(0), BodyId(1)));
        assert_eq!(w.body(b).map(Body::mass), Some(2.0));
        assert_eq!(w.add_force(Gravity::new()), ForceId(0));
        assert!(w.trace(b).is_some());
    }

    #[test]
    fn dispatch_reaches_rocket() {
        let mut w = World::new(0.1);
        let ship = w.add_body(Body::sphere(1.0, 1.0, None, None).unwrap());
        w.add_force(Gravity::new());
        w.add_force(Rocket::new(ship, vec![Thruster::infinite(10.0, vec3(0.0, 1.0, 0.0))]));

        let mut binder = KeyBinder::new();
        w.bind_controls(&mut binder);
        assert!(w.dispatch(&binder, "W", true));
        assert!(!w.dispatch(&binder, "Q", true));

        w.update();
        assert!((w.bodies()[0].velocity - vec3(0.0, 1.0, 0.0)).norm() < 1e-12);

        assert!(w.dispatch(&binder, "W", false));
        w.update();
        assert!((w.bodies()[0].velocity - vec3(0.0, 1.0, 0.0)).norm() < 1e-12);
    }
}
