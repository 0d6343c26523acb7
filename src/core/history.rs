//! Key trace: the ordered record of transitions applied in one session.
//!
//! The trace lives in memory only. It backs diagnostics and replay; it is
//! not a calculation history and is never written anywhere by this crate.

use super::key::Key;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single key press and the states on either side of it.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculator, Key, StateTransition};
/// use chrono::Utc;
///
/// let from = Calculator::new();
/// let key = Key::digit(8).unwrap();
/// let transition = StateTransition {
///     to: from.apply(key),
///     from,
///     key,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to.display(), "8");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// State before the key press
    pub from: S,
    /// State after the key press
    pub to: S,
    /// The key that was pressed
    pub key: Key,
    /// When the key was pressed
    pub timestamp: DateTime<Utc>,
}

/// Ordered trace of transitions.
///
/// The trace is immutable - [`StateHistory::record`] returns a new trace
/// with the transition appended.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculator, Key, State, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// let mut current = Calculator::new();
///
/// for label in ['7', '×', '6', '='] {
///     let key = Key::try_from(label).unwrap();
///     let next = current.apply(key);
///     history = history.record(StateTransition {
///         from: current,
///         to: next.clone(),
///         key,
///         timestamp: Utc::now(),
///     });
///     current = next;
/// }
///
/// let names: Vec<&str> = history.get_path().iter().map(|s| s.name()).collect();
/// assert_eq!(
///     names,
///     ["Idle", "OperandEntered", "OperatorPending", "OperatorPending", "ResultShown"]
/// );
/// assert_eq!(current.display(), "42");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - the existing history is left as it was.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place.
    pub(crate) fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first recorded `from` state followed by the `to` state of
    /// each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Keys pressed, in order.
    ///
    /// Applying these keys to the first recorded state reproduces the last
    /// recorded state.
    pub fn keys(&self) -> Vec<Key> {
        self.transitions.iter().map(|t| t.key).collect()
    }

    /// Time between the first and last key press.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
