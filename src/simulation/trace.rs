//! Position history of a body, for drawing its path
//!
//! Traces are read-only with respect to physics: the world grows them after
//! each tick. How often a point is recorded is governed by
//! [`TraceSettings`], shared by every trace in a world.

use serde::Deserialize;

use crate::math::vector::{distance, NVec3};
use crate::simulation::forces::BodyId;
use crate::simulation::states::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coarseness {
    /// Record only once the body has moved further than its radius from the
    /// last point, and then only on the `integrity`-th such tick
    Coarse,
    /// Record every `integrity`-th tick
    #[default]
    Standard,
    /// Record every tick
    Fine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TraceSettings {
    #[serde(default)]
    pub coarseness: Coarseness,
    #[serde(default = "default_integrity")]
    pub integrity: u32, // ticks per recorded point in standard mode
}

fn default_integrity() -> u32 {
    2
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self { coarseness: Coarseness::Standard, integrity: default_integrity() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    target: BodyId,
    active: bool,
    counter: u32,
    points: Vec<Option<NVec3>>, // None marks a gap
}

impl Trace {
    pub fn new(target: BodyId) -> Self {
        Self { target, active: false, counter: 0, points: Vec::new() }
    }

    pub fn target(&self) -> BodyId {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivating leaves a gap so the path is not joined across the pause
    pub fn set_active(&mut self, active: bool) {
        if !active {
            self.points.push(None);
        }
        self.active = active;
    }

    pub fn toggle(&mut self) {
        self.set_active(!self.active);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Option<NVec3>] {
        &self.points
    }

    /// Recorded positions split at the gaps
    pub fn segments(&self) -> impl Iterator<Item = Vec<NVec3>> + '_ {
        self.points
            .split(Option::is_none)
            .filter(|s| !s.is_empty())
            .map(|s| s.iter().flatten().copied().collect())
    }

    /// Maybe record `body`'s current position
    pub fn grow(&mut self, body: &Body, settings: &TraceSettings) {
        if !self.active {
            return;
        }
        let record = match settings.coarseness {
            Coarseness::Fine => true,
            Coarseness::Standard => self.count(settings.integrity),
            Coarseness::Coarse => {
                let moved = match self.points.last() {
                    Some(Some(last)) => distance(last, &body.position) >= body.radius(),
                    _ => true,
                };
                moved && self.count(settings.integrity)
            }
        };
        if record {
            self.points.push(Some(body.position));
        }
    }

    /// True on every `integrity + 1`-th call
    fn count(&mut self, integrity: u32) -> bool {
        if self.counter == integrity {
            self.counter = 0;
            true
        } else {
            self.counter += 1;
            false
        }
    }
}
