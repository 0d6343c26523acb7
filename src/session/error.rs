//! Session construction errors.

use crate::core::invariants::describe;
use crate::core::StateViolation;
use thiserror::Error;

/// Errors that can occur when building a session.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial calculator state is invalid: {}", describe(.violations))]
    InvalidInitialState { violations: Vec<StateViolation> },
}
