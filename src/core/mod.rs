//! Core calculator types and logic.
//!
//! This module contains the pure functional core:
//! - The key alphabet and operators
//! - The calculator state and its reducer
//! - Number reading and rendering for the display
//! - Immutable key traces and invariant checks
//!
//! Nothing in this module performs I/O or logs.

mod calculator;
mod history;
pub mod invariants;
mod key;
pub mod number;
mod state;

pub use calculator::{Calculator, Phase};
pub use history::{StateHistory, StateTransition};
pub use invariants::StateViolation;
pub use key::{Digit, Key, KeyError, Operator};
pub use state::State;
