//! Keycalc: a keypad calculator engine
//!
//! Keycalc follows the "pure core, imperative shell" split. The core is a
//! pure reducer over an explicit calculator state; the shell owns a running
//! calculator, records its key trace and logs transitions.
//!
//! # Core Concepts
//!
//! - **Keys**: the closed alphabet of keypad buttons
//! - **Calculator**: display text plus a tagged [`core::Phase`]; one key in,
//!   one new state out
//! - **Session**: the owner of a calculator's lifetime
//! - **Checkpoints**: validated snapshots for suspend and resume
//!
//! # Example
//!
//! ```rust
//! use keycalc::core::{Calculator, Key, Operator, State};
//!
//! let calculator = Calculator::new()
//!     .apply(Key::digit(5).unwrap())
//!     .apply(Key::Operator(Operator::Divide))
//!     .apply(Key::digit(0).unwrap())
//!     .apply(Key::Equals);
//!
//! // Division by zero is shown, not raised.
//! assert_eq!(calculator.display(), "Infinity");
//! assert!(calculator.is_error());
//! ```

pub mod checkpoint;
pub mod core;
pub mod keypad;
pub mod session;

// Re-export commonly used types
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{
    Calculator, Key, KeyError, Operator, Phase, State, StateHistory, StateTransition,
};
pub use crate::session::{BuildError, Session, SessionBuilder};
