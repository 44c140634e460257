//! Numeric coercion of value tokens.

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::value::{Number, Value};

/// Interpret `text` as a number if possible.
///
/// Integer text is read at full precision. Anything else that parses as a
/// float is narrowed to an integer when it is finite with no fractional
/// part, and kept as a float otherwise.
pub fn parse_number(text: &str) -> Option<Number> {
    if is_integer_text(text) {
        if let Ok(n) = text.parse::<BigInt>() {
            return Some(Number::Integer(n));
        }
    }
    let f = text.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 {
        if let Some(n) = BigInt::from_f64(f) {
            return Some(Number::Integer(n));
        }
    }
    Some(Number::Float(f))
}

/// Coerce a token to a number, or keep it as an opaque string.
pub fn coerce(text: &str) -> Value {
    match parse_number(text) {
        Some(n) => n.into(),
        None => Value::String(text.to_string()),
    }
}

/// Check the literal form allowed in a constant declaration: digits with at
/// most one decimal point, and at least one digit.
pub fn is_decimal_literal(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for b in text.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::from(n)
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce("10"), int(10));
        assert_eq!(coerce("-7"), int(-7));
        assert_eq!(coerce("+3"), int(3));
        assert_eq!(coerce("007"), int(7));
    }

    #[test]
    fn test_coerce_narrows_integral_floats() {
        assert_eq!(coerce("10.0"), int(10));
        assert_eq!(coerce("1e3"), int(1000));
        assert_eq!(coerce("5."), int(5));
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(coerce("10.5"), Value::Float(10.5));
        assert_eq!(coerce(".25"), Value::Float(0.25));
        assert_eq!(coerce("-0.5"), Value::Float(-0.5));
        assert!(matches!(coerce("inf"), Value::Float(f) if f.is_infinite()));
    }

    #[test]
    fn test_coerce_strings() {
        assert_eq!(coerce("non_numeric"), Value::from("non_numeric"));
        assert_eq!(coerce("hello world"), Value::from("hello world"));
        assert_eq!(coerce("1.2.3"), Value::from("1.2.3"));
    }

    #[test]
    fn test_big_integers_keep_precision() {
        let text = "123456789012345678901234567890";
        let expected: BigInt = text.parse().unwrap();
        assert_eq!(coerce(text), Value::Integer(expected));
    }

    #[test]
    fn test_canonical_form_round_trip() {
        // Reformatting a coerced literal yields its canonical numeric form.
        let cases = [
            ("42", "42"),
            ("42.0", "42"),
            ("0042", "42"),
            ("2.5", "2.5"),
            ("0.125", "0.125"),
            ("-3.75", "-3.75"),
            ("1e2", "100"),
        ];
        for (input, canonical) in cases {
            let n = parse_number(input).unwrap();
            assert_eq!(n.to_string(), canonical, "input {}", input);
            assert_eq!(parse_number(&n.to_string()), Some(n), "input {}", input);
        }
    }

    #[test]
    fn test_is_decimal_literal() {
        assert!(is_decimal_literal("10"));
        assert!(is_decimal_literal("10.5"));
        assert!(is_decimal_literal(".5"));
        assert!(is_decimal_literal("5."));
        assert!(!is_decimal_literal("."));
        assert!(!is_decimal_literal("1.2.3"));
        assert!(!is_decimal_literal(""));
        assert!(!is_decimal_literal("-1"));
    }
}
