//! Core State trait for calculator states.
//!
//! States are plain values: every key press produces a new one, and the
//! trait only exposes pure inspection methods used for logging and traces.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the key trace
/// - `PartialEq`: the session compares states to detect no-op presses
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are captured in snapshots
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculator, Key, State};
///
/// let calculator = Calculator::new();
/// assert_eq!(calculator.name(), "Idle");
///
/// let calculator = calculator.apply(Key::digit(4).unwrap());
/// assert_eq!(calculator.name(), "OperandEntered");
/// assert!(!calculator.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this state shows an error condition.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
