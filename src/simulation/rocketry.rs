//! Thrusters and the keyboard-driven rocket force
//!
//! A [`Rocket`] acts on a single body. While the engine is on it pushes the
//! body along the active thruster's direction, rotated into world space by
//! the body's orientation, and it always applies the body-frame torque set by
//! its roll, pitch and yaw levers. A throttle scales thrust and fuel use
//! together; a trim lever raises or lowers the torque the attitude levers
//! give. Fuel is bookkeeping inside the thrusters; the body's mass does not
//! change as it burns.

use tracing::debug;

use crate::math::vector::{NVec3, Vector};
use crate::simulation::controls::{ControlAction, Controllable, KeyBinder, ScalingLever, ShiftingLever, SymmetricalLever};
use crate::simulation::forces::{BodyId, Force, ForceContext, ForceId};

/// How a thruster's tank behaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refuel {
    /// Burns down to empty
    Finite,
    /// Never runs out
    Infinite,
    /// Recharges `rate` kg/s, up to capacity
    Solar { rate: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thruster {
    fuel_capacity: f64,   // kg
    fuel_mass: f64,       // kg
    exhaust_speed: f64,   // m/s
    consumption_rate: f64, // kg/s
    thrust_vec: NVec3,    // N, body frame, |thrust_vec| = exhaust_speed * consumption_rate
    refuel: Refuel,
}

impl Thruster {
    /// Thrust is `exhaust_speed * consumption_rate` along `direction` (body
    /// frame, must not be zero)
    pub fn new(fuel_mass: f64, exhaust_speed: f64, consumption_rate: f64, direction: NVec3) -> Self {
        let mut thrust_vec = direction;
        thrust_vec.set_length(exhaust_speed * consumption_rate);
        Self {
            fuel_capacity: fuel_mass,
            fuel_mass,
            exhaust_speed,
            consumption_rate,
            thrust_vec,
            refuel: Refuel::Finite,
        }
    }

    /// Constant `thrust` newtons, no tank
    pub fn infinite(thrust: f64, direction: NVec3) -> Self {
        let mut t = Self::new(0.0, thrust, 1.0, direction);
        t.refuel = Refuel::Infinite;
        t
    }

    pub fn solar(fuel_mass: f64, exhaust_speed: f64, consumption_rate: f64, recharge_rate: f64, direction: NVec3) -> Self {
        let mut t = Self::new(fuel_mass, exhaust_speed, consumption_rate, direction);
        t.refuel = Refuel::Solar { rate: recharge_rate };
        t
    }

    /// Consume `consumption_rate * dt` of fuel and return the thrust it buys.
    /// A tank that cannot cover the whole step is emptied and the thrust is
    /// scaled by the fraction it could cover.
    pub fn burn(&mut self, dt: f64) -> NVec3 {
        if self.refuel == Refuel::Infinite {
            return self.thrust_vec;
        }
        let consumed = self.consumption_rate * dt;
        if self.fuel_mass == 0.0 {
            NVec3::zeros()
        } else if self.fuel_mass < consumed {
            let fraction = self.fuel_mass / consumed;
            self.fuel_mass = 0.0;
            self.thrust_vec * fraction
        } else {
            self.remove_fuel(consumed);
            self.thrust_vec
        }
    }

    /// Per-tick tank upkeep, run whether or not the engine is firing
    pub fn tick(&mut self, dt: f64) {
        if let Refuel::Solar { rate } = self.refuel {
            self.add_fuel(rate * dt);
        }
    }

    pub fn add_fuel(&mut self, amount: f64) {
        self.fuel_mass = (self.fuel_mass + amount).min(self.fuel_capacity);
    }

    pub fn remove_fuel(&mut self, amount: f64) {
        self.fuel_mass = (self.fuel_mass - amount).max(0.0);
    }

    pub fn fuel_mass(&self) -> f64 {
        self.fuel_mass
    }

    /// 1 for a full (or infinite) tank, 0 for an empty one
    pub fn fuel_fraction(&self) -> f64 {
        match self.refuel {
            Refuel::Infinite => 1.0,
            _ if self.fuel_capacity == 0.0 => 0.0,
            _ => self.fuel_mass / self.fuel_capacity,
        }
    }

    pub fn thrust(&self) -> f64 {
        self.exhaust_speed * self.consumption_rate
    }

    pub fn thrust_vec(&self) -> &NVec3 {
        &self.thrust_vec
    }

    pub fn exhaust_speed(&self) -> f64 {
        self.exhaust_speed
    }

    pub fn refuel(&self) -> Refuel {
        self.refuel
    }
}

/// Lever indices used in key bindings
pub const ROLL: usize = 0;
pub const PITCH: usize = 1;
pub const YAW: usize = 2;
pub const THROTTLE: usize = 3;
pub const TRIM: usize = 4;

/// Hold index of the engine switch, trigger index of thruster cycling
pub const ENGINE: usize = 0;
pub const CYCLE: usize = 0;

pub struct Rocket {
    body: BodyId,
    thrusters: Vec<Thruster>,
    active: usize,                   // index into thrusters
    engine_on: bool,
    levers: [SymmetricalLever; 3],   // roll, pitch, yaw torques (N·m)
    throttle: f64,                   // fraction of full thrust, in [MIN_THROTTLE, 1]
    throttle_lever: ScalingLever,
    trim: ShiftingLever,             // per tick change of the lever torque
}

impl Rocket {
    /// Default control torque (N·m)
    pub const TORQUE_STRENGTH: f64 = 1.0;
    /// Throttle change per tick while its lever is held
    pub const THROTTLE_FACTOR: f64 = 1.0 + 1.0 / 16.0;
    pub const MIN_THROTTLE: f64 = 0.01;
    /// Torque change per tick while the trim lever is held (N·m)
    pub const TRIM_STEP: f64 = 0.01;

    pub fn new(body: BodyId, thrusters: Vec<Thruster>) -> Self {
        Self {
            body,
            thrusters,
            active: 0,
            engine_on: false,
            levers: [SymmetricalLever::new(Self::TORQUE_STRENGTH); 3],
            throttle: 1.0,
            throttle_lever: ScalingLever::new(Self::THROTTLE_FACTOR),
            trim: ShiftingLever::new(Self::TRIM_STEP),
        }
    }

    pub fn with_torque_strength(mut self, torque: f64) -> Self {
        self.set_torque_strength(torque);
        self
    }

    /// Torque each attitude lever gives when pushed, clamped at zero
    pub fn set_torque_strength(&mut self, torque: f64) {
        for lever in &mut self.levers {
            lever.magnitude = torque.max(0.0);
        }
    }

    pub fn torque_strength(&self) -> f64 {
        self.levers[ROLL].magnitude
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(Self::MIN_THROTTLE, 1.0);
    }

    /// Let the throttle and trim levers act for one tick
    fn adjust(&mut self) {
        let mut throttle = self.throttle;
        self.throttle_lever.scale(&mut throttle);
        self.set_throttle(throttle);

        let mut torque = self.torque_strength();
        self.trim.shift_value(&mut torque);
        self.set_torque_strength(torque);
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn thrusters(&self) -> &[Thruster] {
        &self.thrusters
    }

    pub fn active_thruster(&self) -> Option<&Thruster> {
        self.thrusters.get(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Switch to the next thruster, wrapping around
    pub fn cycle(&mut self) {
        if !self.thrusters.is_empty() {
            self.active = (self.active + 1) % self.thrusters.len();
            debug!(active = self.active, "thruster cycled");
        }
    }

    pub fn set_engine(&mut self, on: bool) {
        self.engine_on = on;
    }

    pub fn engine_on(&self) -> bool {
        self.engine_on
    }

    /// Fuel left in the active thruster, as a fraction of its capacity
    pub fn fuel_fraction(&self) -> f64 {
        self.active_thruster().map_or(0.0, Thruster::fuel_fraction)
    }

    /// Fuel across all thrusters (kg)
    pub fn fuel_mass(&self) -> f64 {
        self.thrusters.iter().map(Thruster::fuel_mass).sum()
    }

    /// Body-frame control torque from the levers
    pub fn torque(&self) -> NVec3 {
        NVec3::new(self.levers[ROLL].value(), self.levers[PITCH].value(), self.levers[YAW].value())
    }
}

impl Force for Rocket {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        let dt = ctx.dt();
        self.adjust();
        for t in &mut self.thrusters {
            t.tick(dt);
        }

        if self.engine_on {
            if let Some(t) = self.thrusters.get_mut(self.active) {
                let local = t.burn(dt * self.throttle) * self.throttle;
                if let Some(body) = ctx.body(self.body) {
                    let thrust = body.orientation().total_rotation().rotate(&local);
                    ctx.apply_force(self.body, &thrust);
                }
            }
        }

        let torque = self.torque();
        ctx.apply_torque(self.body, &torque);
    }

    fn name(&self) -> &str {
        "rocket"
    }

    fn as_controllable(&mut self) -> Option<&mut dyn Controllable> {
        Some(self)
    }
}

impl Controllable for Rocket {
    fn add_bindings_to(&self, binder: &mut KeyBinder, id: ForceId) {
        binder.bind_keys_to_lever("L", "J", id, PITCH);
        binder.bind_keys_to_lever("O", "U", id, YAW);
        binder.bind_keys_to_lever("I", "K", id, ROLL);
        binder.bind("W", id, ControlAction::Hold(ENGINE));
        binder.bind("E", id, ControlAction::Trigger(CYCLE));
        binder.bind_keys_to_lever("CONTROL", "SHIFT", id, THROTTLE);
        binder.bind_keys_to_lever("H", "Y", id, TRIM);
    }

    fn remove_bindings_from(&self, binder: &mut KeyBinder) {
        binder.clear_letter_keys("JLUOIKWEYH");
        binder.clear_keys(&["SHIFT", "CONTROL"]);
    }

    fn control(&mut self, action: ControlAction, pressed: bool) {
        match action {
            ControlAction::LeverUp(THROTTLE) | ControlAction::LeverDown(THROTTLE) => {
                self.throttle_lever.handle(action, pressed)
            }
            ControlAction::LeverUp(TRIM) | ControlAction::LeverDown(TRIM) => self.trim.handle(action, pressed),
            ControlAction::LeverUp(i) | ControlAction::LeverDown(i) => {
                if let Some(lever) = self.levers.get_mut(i) {
                    lever.handle(action, pressed);
                }
            }
            ControlAction::Hold(ENGINE) => self.set_engine(pressed),
            ControlAction::Trigger(CYCLE) if pressed => self.cycle(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::quaternion::Quaternion;
    use crate::math::vector::vec3;
    use crate::simulation::states::Body;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn finite_thruster_runs_dry() {
        let mut t = Thruster::new(1.5, 100.0, 1.0, vec3(0.0, 2.0, 0.0));
        assert!((t.burn(1.0) - vec3(0.0, 100.0, 0.0)).norm() < 1e-12);
        // half a step's worth left
        assert!((t.burn(1.0) - vec3(0.0, 50.0, 0.0)).norm() < 1e-12);
        assert_eq!(t.fuel_mass(), 0.0);
        assert_eq!(t.burn(1.0), NVec3::zeros());
        assert_eq!(t.fuel_fraction(), 0.0);
    }

    #[test]
    fn solar_thruster_recharges_to_capacity() {
        let mut t = Thruster::solar(2.0, 10.0, 1.0, 0.5, vec3(1.0, 0.0, 0.0));
        t.burn(2.0);
        t.tick(1.0);
        assert!((t.fuel_mass() - 0.5).abs() < 1e-12);
        t.tick(100.0);
        assert_eq!(t.fuel_mass(), 2.0);
    }

    #[test]
    fn infinite_thruster_never_empties() {
        let mut t = Thruster::infinite(5.0, vec3(0.0, 0.0, -1.0));
        for _ in 0..10 {
            assert!((t.burn(10.0) - vec3(0.0, 0.0, -5.0)).norm() < 1e-12);
        }
        assert_eq!(t.fuel_fraction(), 1.0);
    }

    #[test]
    fn thrust_follows_orientation() {
        let mut body = Body::sphere(1.0, 1.0, None, None).unwrap();
        body.rotate(&Quaternion::rotation(FRAC_PI_2, &vec3(0.0, 0.0, 1.0)));
        let mut bodies = vec![body];

        let mut rocket = Rocket::new(BodyId(0), vec![Thruster::infinite(3.0, vec3(1.0, 0.0, 0.0))]);
        rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert_eq!(*bodies[0].net_force(), NVec3::zeros(), "engine is off");

        rocket.control(ControlAction::Hold(ENGINE), true);
        rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert!((bodies[0].net_force() - vec3(0.0, 3.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn levers_set_body_torque() {
        let mut bodies = vec![Body::sphere(1.0, 1.0, None, None).unwrap()];
        let mut rocket = Rocket::new(BodyId(0), Vec::new()).with_torque_strength(2.0);
        rocket.control(ControlAction::LeverUp(YAW), true);
        rocket.control(ControlAction::LeverDown(ROLL), true);
        rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert_eq!(bodies[0].net_torque(), vec3(-2.0, 0.0, 2.0));
    }

    #[test]
    fn throttle_scales_thrust_and_fuel_use() {
        let mut bodies = vec![Body::sphere(1.0, 1.0, None, None).unwrap()];
        let mut rocket = Rocket::new(BodyId(0), vec![Thruster::new(10.0, 100.0, 1.0, vec3(1.0, 0.0, 0.0))]);
        rocket.set_engine(true);

        rocket.control(ControlAction::LeverDown(THROTTLE), true);
        for _ in 0..200 {
            rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.001, 0.0));
        }
        assert_eq!(rocket.throttle(), Rocket::MIN_THROTTLE);

        rocket.control(ControlAction::LeverDown(THROTTLE), false);
        rocket.set_throttle(0.5);
        let before = rocket.fuel_mass();
        bodies[0].zero_force();
        rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert!((bodies[0].net_force() - vec3(50.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((before - rocket.fuel_mass() - 0.05).abs() < 1e-12);

        rocket.control(ControlAction::LeverUp(THROTTLE), true);
        for _ in 0..50 {
            rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.001, 0.0));
        }
        assert_eq!(rocket.throttle(), 1.0, "never above full");
    }

    #[test]
    fn trim_shifts_lever_torque() {
        let mut bodies = vec![Body::sphere(1.0, 1.0, None, None).unwrap()];
        let mut rocket = Rocket::new(BodyId(0), Vec::new());
        rocket.control(ControlAction::LeverUp(TRIM), true);
        for _ in 0..10 {
            rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        }
        rocket.control(ControlAction::LeverUp(TRIM), false);
        assert!((rocket.torque_strength() - 1.1).abs() < 1e-12);

        rocket.control(ControlAction::LeverUp(PITCH), true);
        bodies[0].zero_force();
        rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert!((bodies[0].net_torque() - vec3(0.0, 1.1, 0.0)).norm() < 1e-12);

        rocket.control(ControlAction::LeverDown(TRIM), true);
        for _ in 0..500 {
            rocket.apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        }
        assert_eq!(rocket.torque_strength(), 0.0);
    }

    #[test]
    fn cycling_wraps_around() {
        let mut rocket = Rocket::new(
            BodyId(0),
            vec![Thruster::infinite(1.0, vec3(1.0, 0.0, 0.0)), Thruster::infinite(2.0, vec3(1.0, 0.0, 0.0))],
        );
        rocket.control(ControlAction::Trigger(CYCLE), true);
        assert_eq!(rocket.active_index(), 1);
        rocket.control(ControlAction::Trigger(CYCLE), false);
        assert_eq!(rocket.active_index(), 1, "release does not cycle");
        rocket.cycle();
        assert_eq!(rocket.active_index(), 0);
    }

    #[test]
    fn bindings_cover_all_keys() {
        let rocket = Rocket::new(BodyId(0), Vec::new());
        let mut binder = KeyBinder::new();
        rocket.add_bindings_to(&mut binder, ForceId(3));
        assert_eq!(binder.len(), 12);
        assert_eq!(binder.binding("J").map(|b| b.action), Some(ControlAction::LeverUp(PITCH)));
        assert_eq!(binder.binding("SHIFT").map(|b| b.action), Some(ControlAction::LeverUp(THROTTLE)));
        assert_eq!(binder.binding("H").map(|b| b.action), Some(ControlAction::LeverDown(TRIM)));
        rocket.remove_bindings_from(&mut binder);
        assert!(binder.is_empty());
    }
}
