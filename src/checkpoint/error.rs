//! Checkpoint error types.

use crate::core::invariants::describe;
use crate::core::StateViolation;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The captured calculator breaks one or more invariants
    #[error("Checkpoint validation failed: {}", describe(.violations))]
    ValidationFailed { violations: Vec<StateViolation> },

    /// The key trace does not replay to the captured calculator
    #[error("Key trace is inconsistent at press {press}: {reason}")]
    InconsistentHistory { press: usize, reason: &'static str },
}
