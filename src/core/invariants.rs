//! Invariant checks for calculator states built outside the reducer.
//!
//! States produced by [`Calculator::apply`] always hold these invariants.
//! States assembled by hand or read back from a snapshot may not, so they are
//! checked here before a session adopts them. Every check runs and all
//! violations are reported together.

use super::calculator::{Calculator, Phase};
use super::number::is_numeral;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A broken calculator invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateViolation {
    #[error("Display is empty")]
    EmptyDisplay,

    #[error("Display '{display}' contains {count} decimal points")]
    MultipleDecimalPoints { display: String, count: usize },

    #[error("Display '{0}' is not a number")]
    NotANumber(String),

    #[error("Idle calculator must show '0', found '{0}'")]
    IdleNotCleared(String),
}

/// Check every invariant of `calculator`, accumulating ALL violations.
///
/// # Example
///
/// ```rust
/// use keycalc::core::invariants::validate;
/// use keycalc::core::{Calculator, Phase};
///
/// assert!(validate(&Calculator::new()).is_success());
///
/// let broken = Calculator::from_parts("1.2.3", Phase::Idle);
/// assert!(validate(&broken).is_failure());
/// ```
pub fn validate(calculator: &Calculator) -> Validation<(), NonEmptyVec<StateViolation>> {
    let display = calculator.display();

    let checks = vec![
        check_not_empty(display),
        check_decimal_points(display),
        check_readable(display),
        check_idle_display(calculator),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Violations of `calculator`, empty when it is valid.
pub fn violations(calculator: &Calculator) -> Vec<StateViolation> {
    match validate(calculator) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

/// Join violations into a single message.
pub fn describe(violations: &[StateViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_not_empty(display: &str) -> Validation<(), NonEmptyVec<StateViolation>> {
    if display.is_empty() {
        Validation::fail(StateViolation::EmptyDisplay)
    } else {
        Validation::success(())
    }
}

fn check_decimal_points(display: &str) -> Validation<(), NonEmptyVec<StateViolation>> {
    let count = display.matches('.').count();
    if count > 1 {
        Validation::fail(StateViolation::MultipleDecimalPoints {
            display: display.to_string(),
            count,
        })
    } else {
        Validation::success(())
    }
}

// The whole display must be a numeral; `Infinity` and `NaN` are legitimate
// after a division by zero.
fn check_readable(display: &str) -> Validation<(), NonEmptyVec<StateViolation>> {
    if !is_numeral(display) {
        Validation::fail(StateViolation::NotANumber(display.to_string()))
    } else {
        Validation::success(())
    }
}

fn check_idle_display(calculator: &Calculator) -> Validation<(), NonEmptyVec<StateViolation>> {
    if matches!(calculator.phase(), Phase::Idle) && calculator.display() != "0" {
        Validation::fail(StateViolation::IdleNotCleared(
            calculator.display().to_string(),
        ))
    } else {
        Validation::success(())
    }
}
