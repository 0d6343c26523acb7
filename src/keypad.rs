//! The keypad: button grid and typed-input mapping.
//!
//! Front ends render [`ROWS`] as buttons and forward each press as a
//! [`Key`]. Text front ends use [`key_for`], which also accepts the ASCII
//! stand-ins for symbols that are awkward to type.

use crate::core::{Key, KeyError, Operator};

/// Button labels, top row first.
pub const ROWS: [&str; 5] = ["C±%÷", "789×", "456-", "123+", "0.="];

/// The keypad as keys, top row first.
///
/// ```rust
/// use keycalc::core::Key;
/// use keycalc::keypad;
///
/// let grid = keypad::layout();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(grid[0][0], Key::Clear);
/// assert_eq!(grid[4].last(), Some(&Key::Equals));
/// ```
pub fn layout() -> Vec<Vec<Key>> {
    ROWS.iter()
        .map(|row| row.chars().filter_map(Key::from_label).collect())
        .collect()
}

/// Map a typed character to a key.
///
/// Button labels map directly. Additionally `*` and `x` stand for `×`, `/`
/// for `÷`, `c` for `C`, and `~` or `_` for `±`.
pub fn key_for(c: char) -> Result<Key, KeyError> {
    let key = match c {
        '*' | 'x' => Some(Key::Operator(Operator::Multiply)),
        '/' => Some(Key::Operator(Operator::Divide)),
        'c' => Some(Key::Clear),
        '~' | '_' => Some(Key::ToggleSign),
        _ => Key::from_label(c),
    };
    key.ok_or_else(|| KeyError::UnknownKey(c.to_string()))
}

/// Map every non-whitespace character of `input` to a key.
///
/// Fails on the first character that is not a key; nothing is returned for
/// partially valid input.
pub fn keys_for(input: &str) -> Result<Vec<Key>, KeyError> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(key_for)
        .collect()
}

/// Render the grid as text, one row per line.
pub fn render() -> String {
    layout()
        .iter()
        .map(|row| {
            row.iter()
                .map(|key| format!("[{key}]"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
