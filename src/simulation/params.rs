//! Numerical parameters of a run
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size and end time,
//! - how often the engine logs diagnostics

use crate::configuration::config::ParametersConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64,        // step size (s)
    pub t_end: f64,     // time end (s)
    pub log_every: u64, // ticks between diagnostics, 0 = never
}

impl Parameters {
    /// Number of whole steps of `dt` that fit in `t_end`
    pub fn steps(&self) -> u64 {
        if self.dt <= 0.0 || self.t_end <= 0.0 {
            return 0;
        }
        (self.t_end / self.dt).round() as u64
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Self { dt: cfg.dt, t_end: cfg.t_end, log_every: cfg.log_every }
    }
}
