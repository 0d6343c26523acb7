//! Calculator sessions: the imperative shell around the pure core.
//!
//! A [`Session`] owns one calculator for as long as a front end shows it.
//! Each key press runs through [`Calculator::apply`]; the session keeps the
//! resulting state, appends to the key trace and logs the transition.

mod builder;
mod error;

pub use builder::SessionBuilder;
pub use error::BuildError;

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{Calculator, Key, KeyError, Phase, State, StateHistory, StateTransition};
use crate::keypad;
use chrono::Utc;
use tracing::{debug, trace, warn};

/// A running calculator.
///
/// # Example
///
/// ```rust
/// use keycalc::Session;
///
/// let mut session = Session::new();
/// session.press_all("12 × 3 =").unwrap();
/// assert_eq!(session.display(), "36");
/// assert_eq!(session.history().len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    current: Calculator,
    history: StateHistory<Calculator>,
    track_history: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session showing `"0"`, recording its key trace.
    pub fn new() -> Self {
        Self::from_parts(Calculator::new(), StateHistory::new(), true)
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub(crate) fn from_parts(
        current: Calculator,
        history: StateHistory<Calculator>,
        track_history: bool,
    ) -> Self {
        Self {
            current,
            history,
            track_history,
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &Calculator {
        &self.current
    }

    pub fn display(&self) -> &str {
        self.current.display()
    }

    /// Whether the display shows a non-finite result.
    pub fn is_error(&self) -> bool {
        self.current.is_error()
    }

    /// Get the key trace (pure)
    pub fn history(&self) -> &StateHistory<Calculator> {
        &self.history
    }

    pub fn is_tracking_history(&self) -> bool {
        self.track_history
    }

    /// Apply one key press and return the new display.
    pub fn press(&mut self, key: Key) -> &str {
        let next = self.current.apply(key);

        if next == self.current {
            trace!(key = %key, phase = next.name(), "key press left calculator unchanged");
        } else {
            debug!(
                key = %key,
                from = self.current.name(),
                to = next.name(),
                display = next.display(),
                "key applied"
            );
        }

        if key == Key::Equals
            && matches!(self.current.phase(), Phase::OperatorPending { .. })
            && next.is_error()
        {
            warn!(display = next.display(), "operation produced a non-finite result");
        }

        if self.track_history {
            self.history.push(StateTransition {
                from: self.current.clone(),
                to: next.clone(),
                key,
                timestamp: Utc::now(),
            });
        }

        self.current = next;
        self.current.display()
    }

    /// Map a button label to its key and press it.
    pub fn press_label(&mut self, label: &str) -> Result<&str, KeyError> {
        let key: Key = label.parse()?;
        Ok(self.press(key))
    }

    /// Press every key typed in `input`, ignoring whitespace.
    ///
    /// The whole input is mapped before any key is pressed, so an unknown
    /// character leaves the session untouched.
    pub fn press_all(&mut self, input: &str) -> Result<&str, KeyError> {
        let keys = keypad::keys_for(input)?;
        for key in keys {
            self.press(key);
        }
        Ok(self.display())
    }

    /// Capture the calculator and its key trace.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current.clone(), self.history.clone())
            .tracking_history(self.track_history)
    }

    /// Resume a session from a checkpoint.
    ///
    /// The checkpoint is validated first; an invalid calculator or a key trace
    /// that does not lead to it is never adopted. Trace recording resumes as
    /// it was when the checkpoint was taken.
    pub fn restore(checkpoint: Checkpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        debug!(
            id = %checkpoint.id,
            phase = checkpoint.state.name(),
            presses = checkpoint.history.len(),
            track_history = checkpoint.track_history,
            "session restored"
        );
        Ok(Self::from_parts(
            checkpoint.state,
            checkpoint.history,
            checkpoint.track_history,
        ))
    }
}
