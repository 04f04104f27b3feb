//! Force pipeline for the kernel
//!
//! Defines the [`Force`] trait, the [`ForceContext`] view a force gets of the
//! world during a tick, the [`ForceSet`] collection and the two
//! field-plus-pairwise laws ([`Gravity`], [`Electrostatic`]). Per-body laws
//! live in `drag`, `magnetic`, `tethers` and `rocketry`.

use tracing::trace;

use crate::math::field::VectorField;
use crate::math::vector::{distance_sq, NVec3};
use crate::simulation::controls::Controllable;
use crate::simulation::states::Body;

/// Index of a body in its world, handed out by `World::add_body`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Index of a force in its world, handed out by `World::add_force`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForceId(pub usize);

/// What a force sees while it runs
///
/// Bodies are read-only except for their force/torque accumulators, which
/// only grow through [`ForceContext::apply_force`] and
/// [`ForceContext::apply_torque`]. Unknown ids are ignored.
pub struct ForceContext<'a> {
    bodies: &'a mut [Body],
    dt: f64,   // s
    time: f64, // s, before this tick advances it
}

impl<'a> ForceContext<'a> {
    pub fn new(bodies: &'a mut [Body], dt: f64, time: f64) -> Self {
        Self { bodies, dt, time }
    }

    pub fn bodies(&self) -> &[Body] {
        self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Add `force` (N, world frame) to a body's accumulator
    pub fn apply_force(&mut self, id: BodyId, force: &NVec3) {
        if let Some(b) = self.bodies.get_mut(id.0) {
            b.apply_force(force);
        }
    }

    /// Add `torque` (N·m, body frame) to a body's accumulator
    pub fn apply_torque(&mut self, id: BodyId, torque: &NVec3) {
        if let Some(b) = self.bodies.get_mut(id.0) {
            b.apply_torque(torque);
        }
    }
}

/// A force law applied once per tick
///
/// Implementations accumulate into the bodies through the context. They may
/// keep configuration, and stateful ones (tethers, rockets) may keep body ids
/// and internal bookkeeping, but nothing else about the bodies.
pub trait Force {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>);

    /// Short label for logs
    fn name(&self) -> &str {
        "force"
    }

    /// Forces that respond to key input return themselves here
    fn as_controllable(&mut self) -> Option<&mut dyn Controllable> {
        None
    }
}

pub type BoxedForce = Box<dyn Force + Send + Sync>;

/// Ordered collection of forces, run in registration order
#[derive(Default)]
pub struct ForceSet {
    terms: Vec<BoxedForce>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with(mut self, term: impl Force + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Add a force term, returning its id
    pub fn push(&mut self, term: BoxedForce) -> ForceId {
        self.terms.push(term);
        ForceId(self.terms.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, id: ForceId) -> Option<&(dyn Force + Send + Sync)> {
        self.terms.get(id.0).map(|f| f.as_ref())
    }

    pub fn get_mut(&mut self, id: ForceId) -> Option<&mut BoxedForce> {
        self.terms.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxedForce> {
        self.terms.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BoxedForce> {
        self.terms.iter_mut()
    }

    /// Run every force on `ctx`, in order. Accumulators are expected to have
    /// been zeroed by the caller.
    pub fn apply_all(&mut self, ctx: &mut ForceContext<'_>) {
        for term in &mut self.terms {
            trace!(force = term.name(), "applying");
            term.apply_to(ctx);
        }
    }
}

/// Which scalar property a pairwise inverse-square law couples to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coupling {
    Mass,
    Charge,
}

impl Coupling {
    fn of(self, b: &Body) -> f64 {
        match self {
            Coupling::Mass => b.mass(),
            Coupling::Charge => b.charge(),
        }
    }
}

/// Shared loop of Gravity and Electrostatic.
///
/// For each unordered pair (i, j), i < j, computes
/// `f = (x_i - x_j) * sign * k * s_i * s_j / |x_i - x_j|^3`, applies `f` to i and
/// `-f` to j. `sign = -1` attracts like sources (gravity), `+1` repels them.
/// The background field, if any, contributes `field(x_i) * s_i` once per body.
fn apply_inverse_square(
    ctx: &mut ForceContext<'_>,
    strength: f64,
    sign: f64,
    coupling: Coupling,
    field: Option<&dyn VectorField>,
) {
    let n = ctx.len();
    for i in 0..n {
        let (xi, si) = {
            let bi = &ctx.bodies()[i];
            (bi.position, coupling.of(bi))
        };

        // background field, once per body
        if let Some(field) = field {
            let f = field.vector_at(&xi) * si;
            ctx.apply_force(BodyId(i), &f);
        }

        for j in (i + 1)..n {
            let (xj, sj) = {
                let bj = &ctx.bodies()[j];
                (bj.position, coupling.of(bj))
            };

            // r points from j to i
            let r = xi - xj;
            let r3 = distance_sq(&xi, &xj).powf(1.5);

            // the same vector, negated, goes to j
            let fi = r * (sign * strength * si * sj / r3);
            ctx.apply_force(BodyId(i), &fi);
            ctx.apply_force(BodyId(j), &-fi);
        }
    }
}

/// Newtonian gravity between every pair of bodies, plus an optional
/// background acceleration field (applied as `field * mass`)
pub struct Gravity {
    pub strength: f64,                       // N·m²/kg²
    pub field: Option<Box<dyn VectorField>>, // m/s²
}

impl Gravity {
    /// Gravitational constant (N·m²/kg²)
    pub const G: f64 = 6.674e-11;

    /// Pairwise only, strength `G`
    pub fn new() -> Self {
        Self::with_strength(Self::G, None)
    }

    pub fn with_strength(strength: f64, field: Option<Box<dyn VectorField>>) -> Self {
        Self { strength, field }
    }

    /// Only a background field (no pairwise attraction)
    pub fn field_only(field: impl VectorField + 'static) -> Self {
        Self::with_strength(0.0, Some(Box::new(field)))
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new()
    }
}

impl Force for Gravity {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        apply_inverse_square(ctx, self.strength, -1.0, Coupling::Mass, self.field.as_deref());
    }

    fn name(&self) -> &str {
        "gravity"
    }
}

/// Coulomb force between every pair of charged bodies, plus an optional
/// background electric field (applied as `field * charge`)
pub struct Electrostatic {
    pub strength: f64,                       // N·m²/C²
    pub field: Option<Box<dyn VectorField>>, // N/C
}

impl Electrostatic {
    /// Vacuum permittivity ε₀ (C²/N/m²)
    pub const ELECTRIC_CONSTANT: f64 = 8.854187817e-12;

    /// Coulomb constant 1/(4πε₀) (N·m²/C²)
    pub fn field_constant() -> f64 {
        1.0 / (4.0 * std::f64::consts::PI * Self::ELECTRIC_CONSTANT)
    }

    pub fn new() -> Self {
        Self::with_strength(Self::field_constant(), None)
    }

    pub fn with_strength(strength: f64, field: Option<Box<dyn VectorField>>) -> Self {
        Self { strength, field }
    }
}

impl Default for Electrostatic {
    fn default() -> Self {
        Self::new()
    }
}

impl Force for Electrostatic {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        apply_inverse_square(ctx, self.strength, 1.0, Coupling::Charge, self.field.as_deref());
    }

    fn name(&self) -> &str {
        "electrostatic"
    }
}
