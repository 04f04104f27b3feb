//! Ideal springs and rubber bands between two bodies
//!
//! A tether holds the ids of exactly two bodies plus a rest length. With
//! `x = |x₁ − x₂| − L` it pushes body 1 with `−k·x·(x₁ − x₂)̂` and body 2
//! with the negation. A rubber band goes slack (no force) while `x < 0`.

use tracing::debug;

use crate::error::{PhysicsError, Result};
use crate::math::vector::{distance, Vector};
use crate::simulation::forces::{BodyId, Force, ForceContext};
use crate::simulation::states::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetherKind {
    /// Pushes when compressed, pulls when stretched
    Spring,
    /// Only pulls
    RubberBand,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tether {
    pub kind: TetherKind,
    pub a: BodyId,
    pub b: BodyId,
    pub stiffness: f64, // k = F/x, N/m
    pub length: f64,    // rest length, m
}

impl Tether {
    pub fn spring(stiffness: f64, a: BodyId, b: BodyId, length: f64) -> Self {
        Self { kind: TetherKind::Spring, a, b, stiffness, length }
    }

    pub fn rubber_band(stiffness: f64, a: BodyId, b: BodyId, length: f64) -> Self {
        Self { kind: TetherKind::RubberBand, a, b, stiffness, length }
    }

    /// A tether of `kind` whose rest length is the current distance between
    /// its endpoints
    pub fn taut(kind: TetherKind, stiffness: f64, a: BodyId, b: BodyId, bodies: &[Body]) -> Result<Self> {
        let pa = bodies.get(a.0).ok_or(PhysicsError::UnknownBody(a.0))?;
        let pb = bodies.get(b.0).ok_or(PhysicsError::UnknownBody(b.0))?;
        let length = distance(&pa.position, &pb.position);
        debug!(a = a.0, b = b.0, length, "taut tether");
        Ok(Self { kind, a, b, stiffness, length })
    }

    pub fn set_length(&mut self, length: f64) -> &mut Self {
        self.length = length;
        self
    }
}

impl Force for Tether {
    fn apply_to(&mut self, ctx: &mut ForceContext<'_>) {
        let (Some(p1), Some(p2)) = (ctx.body(self.a), ctx.body(self.b)) else {
            return;
        };
        let (x1, x2) = (p1.position, p2.position);
        let x = distance(&x1, &x2) - self.length;
        if self.kind == TetherKind::RubberBand && x < 0.0 {
            return;
        }

        let mut force = x1 - x2;
        force.set_length(-self.stiffness * x);
        ctx.apply_force(self.a, &force);
        ctx.apply_force(self.b, &-force);
    }

    fn name(&self) -> &str {
        match self.kind {
            TetherKind::Spring => "spring",
            TetherKind::RubberBand => "rubber band",
        }
    }
}
