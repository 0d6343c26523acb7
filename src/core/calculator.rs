//! The calculator state and its pure reducer.

use super::key::{Digit, Key, Operator};
use super::number::{self, format_number, parse_display};
use super::state::State;
use serde::{Deserialize, Serialize};

/// Where the calculator is in entering an operation.
///
/// The pending left operand and operator only exist inside
/// [`Phase::OperatorPending`], so one can never be set without the other.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Freshly created or cleared: display `"0"`, nothing pending.
    Idle,

    /// An operand is being typed and nothing is pending.
    OperandEntered,

    /// An operator was chosen and awaits the right operand.
    OperatorPending {
        #[serde(with = "number::as_text")]
        left: f64,
        operator: Operator,
        /// The next digit replaces the display instead of appending.
        overwrite: bool,
    },

    /// `=` resolved the pending operation into the display.
    ResultShown {
        /// Carried over from the resolved operation: set when `=` came
        /// straight after the operator, before any digit.
        overwrite: bool,
    },
}

// A NaN operand is pending after `0 ÷ 0 =` and an operator; two such phases
// are the same state.
impl PartialEq for Phase {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Idle, Self::Idle) | (Self::OperandEntered, Self::OperandEntered) => true,
            (
                Self::OperatorPending {
                    left,
                    operator,
                    overwrite,
                },
                Self::OperatorPending {
                    left: other_left,
                    operator: other_operator,
                    overwrite: other_overwrite,
                },
            ) => {
                (left == other_left || (left.is_nan() && other_left.is_nan()))
                    && operator == other_operator
                    && overwrite == other_overwrite
            }
            (Self::ResultShown { overwrite }, Self::ResultShown { overwrite: other }) => {
                overwrite == other
            }
            _ => false,
        }
    }
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::OperandEntered => "OperandEntered",
            Self::OperatorPending { .. } => "OperatorPending",
            Self::ResultShown { .. } => "ResultShown",
        }
    }

    /// Whether the next digit starts a fresh operand.
    pub fn overwrites_next_digit(&self) -> bool {
        match self {
            Self::OperatorPending { overwrite, .. } | Self::ResultShown { overwrite } => *overwrite,
            Self::Idle | Self::OperandEntered => false,
        }
    }
}

/// Calculator state: the display text plus the current [`Phase`].
///
/// Every key press goes through [`Calculator::apply`], which returns a new
/// state and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculator, Key, Operator};
///
/// let keys = [
///     Key::digit(1).unwrap(),
///     Key::Operator(Operator::Add),
///     Key::digit(2).unwrap(),
///     Key::Equals,
/// ];
///
/// let calculator = Calculator::new().apply_all(keys);
/// assert_eq!(calculator.display(), "3");
/// assert_eq!(calculator.pending_operator(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    display: String,
    phase: Phase,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator showing `"0"` with nothing pending.
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            phase: Phase::Idle,
        }
    }

    /// Assemble a calculator from raw parts.
    ///
    /// The parts are not checked; run [`crate::core::invariants::validate`]
    /// on states that come from outside the reducer.
    pub fn from_parts(display: impl Into<String>, phase: Phase) -> Self {
        Self {
            display: display.into(),
            phase,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Numeric value of the display.
    pub fn value(&self) -> f64 {
        parse_display(&self.display)
    }

    pub fn pending_operand(&self) -> Option<f64> {
        match self.phase {
            Phase::OperatorPending { left, .. } => Some(left),
            _ => None,
        }
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        match self.phase {
            Phase::OperatorPending { operator, .. } => Some(operator),
            _ => None,
        }
    }

    pub fn reset_on_next_digit(&self) -> bool {
        self.phase.overwrites_next_digit()
    }

    /// Apply one key press, returning the resulting state.
    ///
    /// Total over the key alphabet: there is no failing input. Choosing an
    /// operator while another is pending replaces the pending operation
    /// without resolving it.
    pub fn apply(&self, key: Key) -> Self {
        match key {
            Key::Digit(digit) => self.enter_digit(digit),
            Key::Decimal => self.enter_decimal_point(),
            Key::Clear => Self::new(),
            Key::ToggleSign => self.edit_display(format_number(-self.value())),
            Key::Percent => self.edit_display(format_number(self.value() / 100.0)),
            Key::Operator(operator) => Self {
                display: self.display.clone(),
                phase: Phase::OperatorPending {
                    left: self.value(),
                    operator,
                    overwrite: true,
                },
            },
            Key::Equals => self.resolve(),
        }
    }

    /// Apply a sequence of key presses in order.
    pub fn apply_all<I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter()
            .fold(self.clone(), |state, key| state.apply(key))
    }

    fn enter_digit(&self, digit: Digit) -> Self {
        let display = if self.phase.overwrites_next_digit() || self.display == "0" {
            digit.as_char().to_string()
        } else {
            format!("{}{}", self.display, digit.as_char())
        };

        let phase = match self.phase {
            Phase::OperatorPending { left, operator, .. } => Phase::OperatorPending {
                left,
                operator,
                overwrite: false,
            },
            _ => Phase::OperandEntered,
        };

        Self { display, phase }
    }

    // The decimal point edits whatever is shown and leaves a pending
    // overwrite in place.
    fn enter_decimal_point(&self) -> Self {
        if self.display.contains('.') {
            return self.clone();
        }
        self.edit_display(format!("{}.", self.display))
    }

    fn edit_display(&self, display: String) -> Self {
        let phase = match self.phase {
            Phase::Idle => Phase::OperandEntered,
            other => other,
        };
        Self { display, phase }
    }

    fn resolve(&self) -> Self {
        match self.phase {
            Phase::OperatorPending {
                left,
                operator,
                overwrite,
            } => Self {
                display: format_number(operator.apply(left, self.value())),
                phase: Phase::ResultShown { overwrite },
            },
            _ => self.clone(),
        }
    }
}

impl State for Calculator {
    fn name(&self) -> &str {
        self.phase.name()
    }

    fn is_error(&self) -> bool {
        !self.value().is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(labels: &str) -> Calculator {
        press_from(&Calculator::new(), labels)
    }

    fn press_from(calculator: &Calculator, labels: &str) -> Calculator {
        calculator.apply_all(labels.chars().map(|c| Key::try_from(c).unwrap()))
    }

    #[test]
    fn new_calculator_is_idle_at_zero() {
        let calculator = Calculator::new();
        assert_eq!(calculator.display(), "0");
        assert_eq!(calculator.phase(), &Phase::Idle);
        assert_eq!(calculator.pending_operand(), None);
        assert_eq!(calculator.pending_operator(), None);
        assert!(!calculator.reset_on_next_digit());
    }

    #[test]
    fn digits_concatenate() {
        assert_eq!(press("123").display(), "123");
        assert_eq!(press("9087").display(), "9087");
    }

    #[test]
    fn leading_zero_collapses() {
        assert_eq!(press("05").display(), "5");
        assert_eq!(press("000").display(), "0");
    }

    #[test]
    fn apply_leaves_receiver_unchanged() {
        let calculator = press("12");
        let next = calculator.apply(Key::digit(3).unwrap());
        assert_eq!(calculator.display(), "12");
        assert_eq!(next.display(), "123");
    }

    #[test]
    fn decimal_point_appends_once() {
        assert_eq!(press(".").display(), "0.");
        assert_eq!(press("1.5").display(), "1.5");
        assert_eq!(press("1.5.").display(), "1.5");
        assert_eq!(press("1..").display(), "1.");
        assert_eq!(press("1.5.2").display(), "1.52");
    }

    #[test]
    fn decimal_after_zero_keeps_zero() {
        assert_eq!(press("0.5").display(), "0.5");
    }

    #[test]
    fn decimal_after_operator_edits_shown_operand() {
        let calculator = press("5+.");
        assert_eq!(calculator.display(), "5.");
        assert!(calculator.reset_on_next_digit());
        assert_eq!(press_from(&calculator, "3").display(), "3");
    }

    #[test]
    fn clear_resets_everything() {
        for labels in ["", "12.5", "7×", "7×3", "7×3=", "5÷0=", "5+=", "±%"] {
            let cleared = press_from(&press(labels), "C");
            assert_eq!(cleared, Calculator::new(), "after {labels:?}");
        }
    }

    #[test]
    fn clear_drops_pending_overwrite() {
        assert_eq!(press("5+C.3").display(), "0.3");
    }

    #[test]
    fn toggle_sign_negates_display() {
        assert_eq!(press("12±").display(), "-12");
        assert_eq!(press("12±±").display(), "12");
        assert_eq!(press("2.5±").display(), "-2.5");
    }

    #[test]
    fn toggle_sign_on_zero_shows_zero() {
        assert_eq!(press("±").display(), "0");
        assert_eq!(press("0±").display(), "0");
    }

    #[test]
    fn toggle_sign_normalizes_trailing_decimal_point() {
        assert_eq!(press("5.±").display(), "-5");
    }

    #[test]
    fn percent_divides_by_hundred() {
        assert_eq!(press("50%").display(), "0.5");
        assert_eq!(press("5%").display(), "0.05");
    }

    #[test]
    fn sign_and_percent_keep_pending_operation() {
        let calculator = press("8×2±");
        assert_eq!(calculator.display(), "-2");
        assert_eq!(calculator.pending_operand(), Some(8.0));
        assert_eq!(calculator.pending_operator(), Some(Operator::Multiply));
        assert_eq!(press_from(&calculator, "=").display(), "-16");

        assert_eq!(press("200+50%=").display(), "200.5");
    }

    #[test]
    fn operator_captures_left_operand() {
        let calculator = press("42÷");
        assert_eq!(calculator.display(), "42");
        assert_eq!(calculator.pending_operand(), Some(42.0));
        assert_eq!(calculator.pending_operator(), Some(Operator::Divide));
        assert!(calculator.reset_on_next_digit());
    }

    #[test]
    fn digit_after_operator_starts_new_operand() {
        let calculator = press("42÷7");
        assert_eq!(calculator.display(), "7");
        assert!(!calculator.reset_on_next_digit());
        assert_eq!(press_from(&calculator, "0").display(), "70");
    }

    #[test]
    fn one_plus_two_is_three() {
        assert_eq!(press("1+2=").display(), "3");
    }

    #[test]
    fn each_operator_resolves() {
        assert_eq!(press("9-4=").display(), "5");
        assert_eq!(press("6×7=").display(), "42");
        assert_eq!(press("7÷2=").display(), "3.5");
        assert_eq!(press("2-9=").display(), "-7");
    }

    #[test]
    fn float_results_are_not_rounded() {
        assert_eq!(press("0.1+0.2=").display(), "0.30000000000000004");
    }

    // Pressing an operator while one is pending replaces the pending
    // operation with (shown value, new operator); the earlier operation is
    // never evaluated.
    #[test]
    fn chained_operator_discards_unresolved_operation() {
        let calculator = press("4+5+");
        assert_eq!(calculator.pending_operand(), Some(5.0));
        assert_eq!(calculator.display(), "5");

        assert_eq!(press("4+5+3=").display(), "8");
        assert_eq!(press("4×5-3=").display(), "2");
    }

    #[test]
    fn switching_operator_before_second_operand() {
        assert_eq!(press("6+×2=").display(), "12");
    }

    #[test]
    fn division_by_zero_shows_infinity() {
        let calculator = press("5÷0=");
        assert_eq!(calculator.display(), "Infinity");
        assert!(calculator.is_error());
        assert_eq!(press("5±÷0=").display(), "-Infinity");
        assert_eq!(press("0÷0=").display(), "NaN");
    }

    #[test]
    fn equals_without_pending_operation_is_noop() {
        assert_eq!(press("="), Calculator::new());
        let entered = press("12");
        assert_eq!(press_from(&entered, "="), entered);
    }

    #[test]
    fn equals_twice_does_not_repeat_operation() {
        assert_eq!(press("2+3==").display(), "5");
    }

    #[test]
    fn digit_after_result_appends() {
        let result = press("1+2=");
        assert_eq!(result.phase(), &Phase::ResultShown { overwrite: false });
        assert_eq!(press_from(&result, "4").display(), "34");
    }

    #[test]
    fn equals_straight_after_operator_keeps_overwrite() {
        let result = press("5+=");
        assert_eq!(result.display(), "10");
        assert!(result.reset_on_next_digit());

        let next = press_from(&result, "3");
        assert_eq!(next.display(), "3");
        assert_eq!(next.phase(), &Phase::OperandEntered);
    }

    #[test]
    fn result_feeds_next_operation() {
        assert_eq!(press("2+3=×4=").display(), "20");
    }

    #[test]
    fn digits_append_to_non_finite_display() {
        let calculator = press("5÷0=1");
        assert_eq!(calculator.display(), "Infinity1");
        assert_eq!(calculator.value(), f64::INFINITY);
    }

    #[test]
    fn from_parts_is_unchecked() {
        let calculator = Calculator::from_parts("1.2.3", Phase::Idle);
        assert_eq!(calculator.display(), "1.2.3");
    }

    #[test]
    fn nan_operands_compare_equal() {
        let pending = press("0÷0=+");
        assert!(pending.pending_operand().is_some_and(f64::is_nan));
        assert_eq!(pending, pending.clone());
        assert_ne!(pending, press("0÷0=-"));
    }
}
