//! Builder for configuring sessions.

use crate::core::invariants;
use crate::core::{Calculator, StateHistory};
use crate::session::error::BuildError;
use crate::session::Session;

/// Builder for constructing sessions with a fluent API.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculator, Key};
/// use keycalc::session::SessionBuilder;
///
/// let start = Calculator::new().apply(Key::digit(9).unwrap());
/// let session = SessionBuilder::new()
///     .initial(start)
///     .track_history(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(session.display(), "9");
/// ```
pub struct SessionBuilder {
    initial: Option<Calculator>,
    track_history: bool,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            initial: None,
            track_history: true,
        }
    }

    /// Start from `state` instead of a cleared calculator.
    pub fn initial(mut self, state: Calculator) -> Self {
        self.initial = Some(state);
        self
    }

    /// Record every key press in the session's trace (on by default).
    pub fn track_history(mut self, enabled: bool) -> Self {
        self.track_history = enabled;
        self
    }

    /// Build the session.
    /// Returns an error listing every broken invariant of the initial state.
    pub fn build(self) -> Result<Session, BuildError> {
        let initial = self.initial.unwrap_or_default();

        let violations = invariants::violations(&initial);
        if !violations.is_empty() {
            return Err(BuildError::InvalidInitialState { violations });
        }

        Ok(Session::from_parts(
            initial,
            StateHistory::new(),
            self.track_history,
        ))
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
