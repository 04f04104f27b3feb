//! Lorentz force of a background magnetic field on moving charges

use crate::math::field::VectorField;
use crate::math::vector::{Cartesian, NVec3, Vector};
use crate::simulation::forces::{BodyId, Force, ForceContext};

/// `F = q·v × B(x)` on every body
///
/// With an explicit first-order integrator the plain law slowly pumps energy
/// into a gyrating charge. `use_correction` switches to a force that keeps
/// the speed constant over one step: the kicked velocity
/// `v₂ = v + F·Δt/m` is scaled back to `|v|`, giving
/// `F' = m/Δt·(v₂·|v|/|v₂| − v)`. The velocity turns through the same angle
/// per step as under the plain law, but `F'` is no longer perpendicular to
/// `v`. Off by default.
pub struct Magnetic {
    pub field: Option<Box<dyn VectorField>>, // T
    pub use_correction: bool,
}

impl Magnetic {
    pub fn new(field: impl VectorField + 'static) -> Self {
        Self { field: Some(Box::new(field)), use_correction: false }
    }

    /// No field at all: the force is inert
    pub fn empty() -> Self {
        Self { field: None, use_correction: false }
    }

    pub fn with_correction(mut self, use_correction: bool) -> Self {
        self.use_correction = use_correction;
        self
    }
}

impl Force for Magnetic {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        let Some(field) = &self.field else {
            return;
        };
        let dt = ctx.dt();
        for i in 0..ctx.len() {
            let b = &ctx.bodies()[i];
            let v = b.velocity;
            let f1 = v.cross(&field.vector_at(&b.position)) * b.charge();

            let f = if self.use_correction && !f1.is_zero() {
                let m = b.mass();
                let mut v2 = v;
                v2.translate_scaled(&f1, dt / m);
                (v2 * (v.norm() / v2.norm()) - v) * (m / dt)
            } else {
                f1
            };
            ctx.apply_force(BodyId(i), &f);
        }
    }

    fn name(&self) -> &str {
        "magnetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::field::UniformField;
    use crate::math::vector::vec3;
    use crate::simulation::states::Body;

    #[test]
    fn force_is_perpendicular_to_velocity_and_field() {
        let b_field = vec3(0.0, 0.0, 2.0);
        let v = vec3(1.0, 3.0, -0.5);
        let mut bodies = vec![Body::particle(1.0, 0.5, None, Some(v))];
        Magnetic::new(UniformField(b_field)).apply_to(&mut ForceContext::new(&mut bodies, 0.01, 0.0));

        let f = *bodies[0].net_force();
        assert!(f.dot(&v).abs() < 1e-12);
        assert!(f.dot(&b_field).abs() < 1e-12);
        assert!((f - v.cross(&b_field) * 0.5).norm() < 1e-12);
    }

    #[test]
    fn corrected_force_keeps_speed_over_one_step() {
        let v = vec3(1.0, 0.0, 0.0);
        let dt = 0.01;
        let mut bodies = vec![Body::particle(2.0, 1.0, None, Some(v))];
        let mut m = Magnetic::new(UniformField(vec3(0.0, 0.0, 1.0))).with_correction(true);
        m.apply_to(&mut ForceContext::new(&mut bodies, dt, 0.0));

        let f = *bodies[0].net_force();
        let v_next = v + f * (dt / 2.0);
        assert!((v_next.norm() - 1.0).abs() < 1e-12, "got {}", v_next.norm());

        // same heading as the plain kick, only shorter
        let mut plain = vec![Body::particle(2.0, 1.0, None, Some(v))];
        Magnetic::new(UniformField(vec3(0.0, 0.0, 1.0))).apply_to(&mut ForceContext::new(&mut plain, dt, 0.0));
        let v_plain = v + *plain[0].net_force() * (dt / 2.0);
        assert!(v_plain.norm() > 1.0);
        assert!((v_plain.normalize() - v_next.normalize()).norm() < 1e-12);
    }

    #[test]
    fn uncharged_or_empty_does_nothing() {
        let mut bodies = vec![Body::particle(1.0, 0.0, None, Some(vec3(1.0, 0.0, 0.0)))];
        Magnetic::new(UniformField(vec3(0.0, 0.0, 1.0))).apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        Magnetic::empty().apply_to(&mut ForceContext::new(&mut bodies, 0.1, 0.0));
        assert_eq!(*bodies[0].net_force(), NVec3::zeros());
    }
}
