//! Error type shared by the kernel and the scenario builder
//!
//! Precondition violations and configuration mistakes are reported here, at
//! the call that makes them. Numerical edge cases (coincident bodies in an
//! inverse-square law and the like) are *not* errors: they propagate as
//! NaN/Infinity into the state.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("negative radius ({0}) is not allowed")]
    NegativeRadius(f64),

    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),

    #[error("cannot link bijectively: {left} vertices vs {right} vertices")]
    MismatchedLink { left: usize, right: usize },

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("no body with index {0}")]
    UnknownBody(usize),

    #[error("unsupported for this shape: {0}")]
    UnsupportedShape(&'static str),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
