//! Snapshot and resume for calculator sessions.
//!
//! A host that tears its calculator screen down (app suspended, window
//! closed) can capture a [`Checkpoint`] and resume the same calculator
//! later. Checkpoints are plain serde values; this module only converts them
//! to and from JSON or bincode and leaves storage to the caller.

use crate::core::invariants;
use crate::core::{Calculator, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a session.
///
/// # Example
///
/// ```rust
/// use keycalc::checkpoint::Checkpoint;
/// use keycalc::Session;
///
/// let mut session = Session::new();
/// session.press_all("6÷4").unwrap();
///
/// let json = session.checkpoint().to_json().unwrap();
/// let mut resumed = Session::restore(Checkpoint::from_json(&json).unwrap()).unwrap();
/// assert_eq!(resumed.press_all("=").unwrap(), "1.5");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Calculator at the time of capture
    pub state: Calculator,

    /// Key trace up to the time of capture
    pub history: StateHistory<Calculator>,

    /// Whether the resumed session keeps recording its key trace
    pub track_history: bool,
}

impl Checkpoint {
    /// Capture `state` and `history` under a fresh id.
    pub fn new(state: Calculator, history: StateHistory<Calculator>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            state,
            history,
            track_history: true,
        }
    }

    /// Set whether the resumed session records its key trace.
    pub fn tracking_history(mut self, enabled: bool) -> Self {
        self.track_history = enabled;
        self
    }

    /// Check the version, every calculator invariant, and that the key trace
    /// replays to the captured calculator.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let violations = invariants::violations(&self.state);
        if !violations.is_empty() {
            return Err(CheckpointError::ValidationFailed { violations });
        }

        self.check_history()
    }

    // Each recorded press must start where the previous one ended and be
    // what the reducer produces for its key; the last one must end at `state`.
    fn check_history(&self) -> Result<(), CheckpointError> {
        let mut previous: Option<&Calculator> = None;

        for (index, transition) in self.history.transitions().iter().enumerate() {
            let press = index + 1;
            if previous.is_some_and(|end| end != &transition.from) {
                return Err(CheckpointError::InconsistentHistory {
                    press,
                    reason: "does not start where the previous press ended",
                });
            }
            if transition.from.apply(transition.key) != transition.to {
                return Err(CheckpointError::InconsistentHistory {
                    press,
                    reason: "does not lead to its recorded state",
                });
            }
            previous = Some(&transition.to);
        }

        match previous {
            Some(end) if end != &self.state => Err(CheckpointError::InconsistentHistory {
                press: self.history.len(),
                reason: "does not end at the captured calculator",
            }),
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse and validate a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate a bincode checkpoint.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Key, Phase, StateViolation};
    use crate::Session;

    fn session_after(input: &str) -> Session {
        let mut session = Session::new();
        session.press_all(input).unwrap();
        session
    }

    #[test]
    fn new_checkpoint_has_current_version_and_unique_id() {
        let first = Checkpoint::new(Calculator::new(), StateHistory::new());
        let second = Checkpoint::new(Calculator::new(), StateHistory::new());

        assert_eq!(first.version, CHECKPOINT_VERSION);
        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let checkpoint = session_after("7-2.5").checkpoint();
        let restored = Checkpoint::from_json(&checkpoint.to_json().unwrap()).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.state, checkpoint.state);
        assert_eq!(restored.history.keys(), checkpoint.history.keys());
    }

    #[test]
    fn bincode_round_trip_preserves_state() {
        let checkpoint = session_after("5÷0=×").checkpoint();
        let restored = Checkpoint::from_bytes(&checkpoint.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.state, checkpoint.state);
        assert_eq!(restored.state.pending_operand(), Some(f64::INFINITY));
        assert_eq!(restored.timestamp, checkpoint.timestamp);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = Checkpoint::new(Calculator::new(), StateHistory::new());
        checkpoint.version = CHECKPOINT_VERSION + 1;

        let json = checkpoint.to_json().unwrap();
        match Checkpoint::from_json(&json) {
            Err(CheckpointError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, CHECKPOINT_VERSION + 1);
                assert_eq!(supported, CHECKPOINT_VERSION);
            }
            other => panic!("Expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn invalid_state_is_rejected_with_all_violations() {
        let checkpoint = Checkpoint::new(
            Calculator::from_parts("1..", Phase::Idle),
            StateHistory::new(),
        );

        match checkpoint.validate() {
            Err(CheckpointError::ValidationFailed { violations }) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.contains(&StateViolation::IdleNotCleared("1..".to_string())));
            }
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
        assert!(Session::restore(checkpoint).is_err());
    }

    #[test]
    fn history_from_another_session_is_rejected() {
        let mut checkpoint = session_after("7×6=").checkpoint();
        checkpoint.history = session_after("1+2=").checkpoint().history;

        let json = checkpoint.to_json().unwrap();
        match Checkpoint::from_json(&json) {
            Err(CheckpointError::InconsistentHistory { press, .. }) => assert_eq!(press, 4),
            other => panic!("Expected InconsistentHistory, got {other:?}"),
        }
    }

    #[test]
    fn history_with_gap_is_rejected() {
        let mut session = session_after("12");
        let first = session.checkpoint().history;
        session.press(Key::Clear);
        session.press_all("3").unwrap();
        let full = session.checkpoint().history;

        // Drop the clear so press 3 starts from "12" but claims to start at "0".
        let mut spliced = first;
        for transition in &full.transitions()[3..] {
            spliced = spliced.record(transition.clone());
        }
        let checkpoint = Checkpoint::new(session.current_state().clone(), spliced);

        match checkpoint.validate() {
            Err(CheckpointError::InconsistentHistory { press, reason }) => {
                assert_eq!(press, 3);
                assert_eq!(reason, "does not start where the previous press ended");
            }
            other => panic!("Expected InconsistentHistory, got {other:?}"),
        }
    }

    #[test]
    fn forged_transition_is_rejected() {
        let mut checkpoint = session_after("9").checkpoint();
        let mut forged = checkpoint.history.transitions()[0].clone();
        forged.to = Calculator::new().apply(Key::digit(8).unwrap());
        checkpoint.history = StateHistory::new().record(forged.clone());
        checkpoint.state = forged.to;

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::InconsistentHistory { press: 1, .. })
        ));
    }

    #[test]
    fn trace_ending_in_nan_operand_is_consistent() {
        let checkpoint = session_after("0÷0=+").checkpoint();
        let restored = Checkpoint::from_bytes(&checkpoint.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.history.len(), 5);
    }

    #[test]
    fn malformed_input_is_a_deserialization_error() {
        assert!(matches!(
            Checkpoint::from_json("{\"version\": 1"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}
