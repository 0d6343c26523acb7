//! Conversions between display text and numbers.
//!
//! Reading is lenient: the longest numeric prefix of the text wins, so a
//! display such as `"5."` or `"Infinity5"` still has a value. Writing uses
//! the shortest decimal form that round-trips, switching to exponent
//! notation for very large and very small magnitudes.

/// Read the numeric value shown by `text`.
///
/// Accepts an optional sign, `Infinity`, and decimal digits with an optional
/// fraction and exponent. Anything after the numeric prefix is ignored. Text
/// without a numeric prefix reads as NaN.
///
/// ```rust
/// use keycalc::core::number::parse_display;
///
/// assert_eq!(parse_display("12.5"), 12.5);
/// assert_eq!(parse_display("5."), 5.0);
/// assert_eq!(parse_display("-Infinity"), f64::NEG_INFINITY);
/// assert!(parse_display("NaN").is_nan());
/// ```
pub fn parse_display(text: &str) -> f64 {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = if unsigned.starts_with("Infinity") {
        f64::INFINITY
    } else {
        let end = numeric_prefix_len(unsigned);
        if end == 0 {
            return f64::NAN;
        }
        unsigned[..end].parse().unwrap_or(f64::NAN)
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Length in bytes of the decimal literal at the start of `text`.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(0);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

/// Whether all of `text` is a numeral the display can show.
///
/// A numeral is an optional `-`, then either decimal digits with an optional
/// exponent or one of `Infinity` and `NaN`. Digits typed after a result are
/// appended as they are, so a run of digits and `.` may follow an exponent
/// or a non-finite word (`1e+21.5`, `Infinity1`). The number of decimal
/// points is not checked here.
///
/// ```rust
/// use keycalc::core::number::is_numeral;
///
/// assert!(is_numeral("-12.5"));
/// assert!(is_numeral("Infinity1"));
/// assert!(!is_numeral("12abc"));
/// ```
pub fn is_numeral(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let is_tail = |rest: &str| rest.bytes().all(|b| b.is_ascii_digit() || b == b'.');

    if let Some(rest) = unsigned
        .strip_prefix("Infinity")
        .or_else(|| unsigned.strip_prefix("NaN"))
    {
        return is_tail(rest);
    }
    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }

    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    if !is_tail(mantissa) {
        return false;
    }
    match exponent {
        None => true,
        Some(exponent) => {
            let unsigned_exponent = exponent
                .strip_prefix(|c: char| c == '+' || c == '-')
                .unwrap_or(exponent);
            unsigned_exponent.starts_with(|c: char| c.is_ascii_digit())
                && is_tail(unsigned_exponent)
        }
    }
}

/// Render `value` the way the display shows numbers.
///
/// ```rust
/// use keycalc::core::number::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(5.0 / 0.0), "Infinity");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_number(-value));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3".
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(n.unsigned_abs() as usize))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.unsigned_abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.unsigned_abs())
        }
    }
}

/// Serde adapter storing an `f64` as display text.
///
/// JSON has no literal for non-finite numbers, and a pending operand may be
/// `Infinity` after a division by zero.
pub(crate) mod as_text {
    use super::{format_number, parse_display};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_number(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(parse_display(&text))
    }
}
