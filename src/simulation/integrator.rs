//! Fixed-step time integrator for the body/force pipeline
//!
//! One semi-implicit (symplectic) Euler step: velocities are advanced from
//! the fresh accelerations, then positions from the fresh velocities.

use super::forces::{ForceContext, ForceSet};
use super::states::Body;

/// Advance `bodies` by one step of `dt`, starting at time `t`
///
/// Fixed order:
/// 1. zero every accumulator
/// 2. run every force in registration order
/// 3. a = F/m (and α = I⁻¹τ)
/// 4. v += a·dt (and ω += α·dt)
/// 5. x += v·dt, orientation turned by ω·dt
///
/// All forces see the same pre-integration state. The caller advances the
/// clock.
pub fn semi_implicit_euler(bodies: &mut [Body], forces: &mut ForceSet, dt: f64, t: f64) {
    if bodies.is_empty() { // no bodies, return
        return;
    }

    // Zero accumulators
    for b in bodies.iter_mut() {
        b.zero_force();
    }

    // Accumulate forces and torques
    forces.apply_all(&mut ForceContext::new(bodies, dt, t));

    // F -> a
    for b in bodies.iter_mut() {
        b.update_accelerations();
    }

    // Kick: v_n+1 = v_n + dt * a_n
    for b in bodies.iter_mut() {
        b.update_velocity(dt);
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for b in bodies.iter_mut() {
        b.update_position(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::field::UniformField;
    use crate::math::vector::vec3;
    use crate::simulation::forces::Gravity;

    #[test]
    fn free_body_drifts() {
        let mut bodies = vec![Body::particle(1.0, 0.0, None, Some(vec3(1.0, 2.0, 0.0)))];
        let mut forces = ForceSet::new();
        for k in 0..10 {
            semi_implicit_euler(&mut bodies, &mut forces, 0.5, k as f64 * 0.5);
        }
        assert_eq!(bodies[0].velocity, vec3(1.0, 2.0, 0.0));
        assert!((bodies[0].position - vec3(5.0, 10.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn position_uses_updated_velocity() {
        let mut bodies = vec![Body::particle(2.0, 0.0, None, None)];
        let mut forces = ForceSet::new().with(Gravity::field_only(UniformField(vec3(0.0, -1.0, 0.0))));
        semi_implicit_euler(&mut bodies, &mut forces, 1.0, 0.0);
        // explicit Euler would leave the position at 0
        assert_eq!(bodies[0].velocity, vec3(0.0, -1.0, 0.0));
        assert_eq!(bodies[0].position, vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn accumulators_reset_each_step() {
        let mut bodies = vec![Body::particle(1.0, 0.0, None, None)];
        let mut forces = ForceSet::new().with(Gravity::field_only(UniformField(vec3(1.0, 0.0, 0.0))));
        semi_implicit_euler(&mut bodies, &mut forces, 0.1, 0.0);
        semi_implicit_euler(&mut bodies, &mut forces, 0.1, 0.1);
        assert_eq!(*bodies[0].net_force(), vec3(1.0, 0.0, 0.0));
    }
}
