//! Keypad tokens.
//!
//! The key alphabet is closed: every button on the keypad maps to exactly
//! one [`Key`], and every [`Key`] renders back to exactly one button label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when mapping button labels to keys.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KeyError {
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
}

/// A single decimal digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, returning `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = KeyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or_else(|| KeyError::UnknownKey(value.to_string()))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// Binary arithmetic operators available on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Button label for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Evaluate `left <op> right` with plain floating-point arithmetic.
    ///
    /// Division is unguarded: dividing by zero yields an infinite or NaN
    /// value.
    ///
    /// ```rust
    /// use keycalc::core::Operator;
    ///
    /// assert_eq!(Operator::Subtract.apply(7.0, 2.0), 5.0);
    /// assert!(Operator::Divide.apply(5.0, 0.0).is_infinite());
    /// ```
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

/// A single button press.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Key, Operator};
///
/// let key: Key = "×".parse().unwrap();
/// assert_eq!(key, Key::Operator(Operator::Multiply));
/// assert_eq!(Key::digit(7).unwrap().label(), '7');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Digit(Digit),
    Decimal,
    Clear,
    ToggleSign,
    Percent,
    Operator(Operator),
    Equals,
}

impl Key {
    /// Digit key for `value`, or `None` when `value` is not a single digit.
    pub fn digit(value: u8) -> Option<Self> {
        Digit::new(value).map(Self::Digit)
    }

    /// The label printed on the button.
    pub fn label(self) -> char {
        match self {
            Self::Digit(digit) => digit.as_char(),
            Self::Decimal => '.',
            Self::Clear => 'C',
            Self::ToggleSign => '±',
            Self::Percent => '%',
            Self::Operator(operator) => operator.symbol(),
            Self::Equals => '=',
        }
    }

    /// Map a button label to its key.
    ///
    /// The typographic minus sign `−` is accepted for subtraction alongside
    /// the keypad's `-`.
    pub fn from_label(label: char) -> Option<Self> {
        let key = match label {
            '0'..='9' => return label.to_digit(10).and_then(|d| Self::digit(d as u8)),
            '.' => Self::Decimal,
            'C' => Self::Clear,
            '±' => Self::ToggleSign,
            '%' => Self::Percent,
            '+' => Self::Operator(Operator::Add),
            '-' | '−' => Self::Operator(Operator::Subtract),
            '×' => Self::Operator(Operator::Multiply),
            '÷' => Self::Operator(Operator::Divide),
            '=' => Self::Equals,
            _ => return None,
        };
        Some(key)
    }

    pub fn is_digit(self) -> bool {
        matches!(self, Self::Digit(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<char> for Key {
    type Error = KeyError;

    fn try_from(label: char) -> Result<Self, Self::Error> {
        Key::from_label(label).ok_or_else(|| KeyError::UnknownKey(label.to_string()))
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::try_from(c),
            _ => Err(KeyError::UnknownKey(label.to_string())),
        }
    }
}
