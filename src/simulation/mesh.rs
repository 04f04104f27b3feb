//! Rectangular lattices of particles joined by rubber bands
//!
//! Particle `(x, y)` starts at `origin + x·dx + y·dy`. Neighbours along x and
//! along y are joined by taut rubber bands, giving `(w−1)·h` horizontal and
//! `w·(h−1)` vertical bands. Band `(x, y)` of either direction starts at
//! particle `(x, y)`.
//!
//! A [`Support`] replaces some particles with fixed poles: the four corners
//! (a sheet stretched on poles) or the whole border (a drum skin). Particle
//! masses and band stiffnesses may vary over the lattice through a
//! [`Distribution`].

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{PhysicsError, Result};
use crate::math::vector::{Cartesian, NVec3};
use crate::shapes::frame::{link_bijectively, Edge};
use crate::simulation::forces::BodyId;
use crate::simulation::states::Body;
use crate::simulation::tethers::{Tether, TetherKind};
use crate::simulation::world::World;

/// Which lattice nodes are fixed poles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Support {
    #[default]
    None,
    Corners,
    /// Every node on the border
    Frame,
}

/// A per-node (or per-band) quantity over lattice coordinates
#[derive(Clone)]
pub enum Distribution {
    Uniform(f64),
    Varying(Arc<dyn Fn(usize, usize) -> f64 + Send + Sync>),
}

impl Distribution {
    pub fn varying(f: impl Fn(usize, usize) -> f64 + Send + Sync + 'static) -> Self {
        Distribution::Varying(Arc::new(f))
    }

    pub fn at(&self, x: usize, y: usize) -> f64 {
        match self {
            Distribution::Uniform(v) => *v,
            Distribution::Varying(f) => f(x, y),
        }
    }
}

impl From<f64> for Distribution {
    fn from(v: f64) -> Self {
        Distribution::Uniform(v)
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Uniform(v) => write!(f, "Uniform({v})"),
            Distribution::Varying(_) => write!(f, "Varying(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RectangularMesh {
    pub width: usize,  // particles along dx
    pub height: usize, // particles along dy
    pub origin: NVec3,
    pub dx: NVec3,                // offset to the next particle along x
    pub dy: NVec3,                // offset to the next particle along y
    pub mass: Distribution,       // per particle, kg
    pub horizontal: Distribution, // stiffness of the bands along dx, N/m
    pub vertical: Distribution,   // stiffness of the bands along dy, N/m
    pub support: Support,
}

/// Ids of what a mesh put into the world
#[derive(Debug, Clone, PartialEq)]
pub struct MeshHandle {
    pub particles: Vec<Vec<BodyId>>, // [x][y]
    pub horizontal: Vec<Edge<BodyId>>,
    pub vertical: Vec<Edge<BodyId>>,
}

impl MeshHandle {
    pub fn particle(&self, x: usize, y: usize) -> Option<BodyId> {
        self.particles.get(x).and_then(|col| col.get(y)).copied()
    }
}

impl RectangularMesh {
    /// Uniform mass and stiffness, nothing fixed
    pub fn new(width: usize, height: usize, origin: NVec3, dx: NVec3, dy: NVec3, mass: f64, stiffness: f64) -> Self {
        Self {
            width,
            height,
            origin,
            dx,
            dy,
            mass: mass.into(),
            horizontal: stiffness.into(),
            vertical: stiffness.into(),
            support: Support::None,
        }
    }

    pub fn supported(mut self, support: Support) -> Self {
        self.support = support;
        self
    }

    pub fn with_mass(mut self, mass: impl Into<Distribution>) -> Self {
        self.mass = mass.into();
        self
    }

    pub fn with_stiffness(mut self, horizontal: impl Into<Distribution>, vertical: impl Into<Distribution>) -> Self {
        self.horizontal = horizontal.into();
        self.vertical = vertical.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PhysicsError::InvalidMesh(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        for x in 0..self.width {
            for y in 0..self.height {
                let m = self.mass.at(x, y);
                if !(m > 0.0) {
                    return Err(PhysicsError::NonPositiveMass(m));
                }
            }
        }
        Ok(())
    }

    fn is_pole(&self, x: usize, y: usize) -> bool {
        let on_x_edge = x == 0 || x == self.width - 1;
        let on_y_edge = y == 0 || y == self.height - 1;
        match self.support {
            Support::None => false,
            Support::Corners => on_x_edge && on_y_edge,
            Support::Frame => on_x_edge || on_y_edge,
        }
    }

    /// Add the particles and bands to `world`
    pub fn add_to(&self, world: &mut World) -> Result<MeshHandle> {
        self.validate()?;

        let mut particles = Vec::with_capacity(self.width);
        let mut column_start = self.origin;
        for x in 0..self.width {
            let mut cursor = column_start;
            let mut column = Vec::with_capacity(self.height);
            for y in 0..self.height {
                let mass = self.mass.at(x, y);
                let body = if self.is_pole(x, y) {
                    Body::fixed_point(mass, Some(cursor), None).with_name(format!("pole ({x}, {y})"))
                } else {
                    Body::particle(mass, 0.0, Some(cursor), None).with_name(format!("mesh ({x}, {y})"))
                };
                column.push(world.add_body(body));
                cursor.translate(&self.dy);
            }
            particles.push(column);
            column_start.translate(&self.dx);
        }

        // neighbouring columns, row by row
        let mut horizontal = Vec::with_capacity((self.width - 1) * self.height);
        for pair in particles.windows(2) {
            horizontal.extend(link_bijectively(&pair[0], &pair[1])?);
        }
        // each column against itself shifted by one
        let mut vertical = Vec::with_capacity(self.width * (self.height - 1));
        for column in &particles {
            vertical.extend(link_bijectively(&column[..self.height - 1], &column[1..])?);
        }

        // band k starts at particle k of its direction's ordering
        for (k, edge) in horizontal.iter().enumerate() {
            let k_stiff = self.horizontal.at(k / self.height, k % self.height);
            self.band(world, edge, k_stiff)?;
        }
        for (k, edge) in vertical.iter().enumerate() {
            let k_stiff = self.vertical.at(k / (self.height - 1), k % (self.height - 1));
            self.band(world, edge, k_stiff)?;
        }

        debug!(
            width = self.width,
            height = self.height,
            bands = horizontal.len() + vertical.len(),
            support = ?self.support,
            "mesh added"
        );
        Ok(MeshHandle { particles, horizontal, vertical })
    }

    fn band(&self, world: &mut World, edge: &Edge<BodyId>, stiffness: f64) -> Result<()> {
        let band = Tether::taut(TetherKind::RubberBand, stiffness, edge.a, edge.b, world.bodies())?;
        world.add_force(band);
        Ok(())
    }
}
