//! Lenient money coercion with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount read from a store record goes through [`Money::to_number`]
//! before any arithmetic, so malformed or missing values degrade to zero
//! instead of failing.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Largest decimal exponent applied before a value is treated as out of range.
const MAX_EXPONENT: i64 = 28;

/// Numeric helpers shared by every reconciliation component.
pub struct Money;

impl Money {
    /// Coerces a loosely-typed JSON value into a decimal amount.
    ///
    /// Numbers keep their value, strings are parsed with [`Money::parse_number`],
    /// and everything else (`null`, booleans, arrays, objects) becomes zero.
    #[must_use]
    pub fn to_number(value: &Value) -> Decimal {
        match value {
            Value::Number(n) => Self::parse_number(&n.to_string()),
            Value::String(s) => Self::parse_number(s),
            _ => Decimal::ZERO,
        }
    }

    /// Parses the longest numeric prefix of `input`.
    ///
    /// Leading whitespace is ignored and trailing garbage is dropped, so
    /// `"12.5 lb"` is `12.5`. Input without a numeric prefix, or whose value
    /// does not fit a `Decimal`, is zero.
    #[must_use]
    pub fn parse_number(input: &str) -> Decimal {
        let Some(prefix) = NumericPrefix::scan(input.trim()) else {
            return Decimal::ZERO;
        };

        let Ok(mantissa) = Decimal::from_str(&prefix.mantissa) else {
            return Decimal::ZERO;
        };

        apply_exponent(mantissa, prefix.exponent).unwrap_or(Decimal::ZERO)
    }

    /// Converts a float coming from an untyped source; NaN and infinities are zero.
    #[must_use]
    pub fn from_f64(value: f64) -> Decimal {
        if value.is_finite() {
            Self::parse_number(&value.to_string())
        } else {
            Decimal::ZERO
        }
    }

    /// Sums amounts without any rounding. Empty input is zero.
    ///
    /// A running total past the `Decimal` range saturates, like [`Money::add`].
    #[must_use]
    pub fn sum<I>(values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        values.into_iter().fold(Decimal::ZERO, Self::add)
    }

    /// `a + b`, clamped to `Decimal::MIN..=Decimal::MAX` instead of panicking.
    #[must_use]
    pub fn add(a: Decimal, b: Decimal) -> Decimal {
        a.checked_add(b).unwrap_or_else(|| Self::clamp_towards(b))
    }

    /// `a - b`, clamped to `Decimal::MIN..=Decimal::MAX` instead of panicking.
    #[must_use]
    pub fn sub(a: Decimal, b: Decimal) -> Decimal {
        a.checked_sub(b).unwrap_or_else(|| Self::clamp_towards(-b))
    }

    /// `a * b`, clamped to `Decimal::MIN..=Decimal::MAX` instead of panicking.
    #[must_use]
    pub fn mul(a: Decimal, b: Decimal) -> Decimal {
        a.checked_mul(b).unwrap_or_else(|| {
            if a.is_sign_negative() == b.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
    }

    /// The range bound an overflowing step was heading for.
    fn clamp_towards(step: Decimal) -> Decimal {
        if step.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    }
}

/// The numeric part found at the start of a string.
struct NumericPrefix {
    mantissa: String,
    exponent: i64,
}

impl NumericPrefix {
    fn scan(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;
        let mut mantissa = String::new();

        if let Some(&sign) = bytes.first() {
            if sign == b'-' || sign == b'+' {
                if sign == b'-' {
                    mantissa.push('-');
                }
                pos += 1;
            }
        }

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_digits = &s[int_start..pos];

        let mut frac_digits = "";
        if pos < bytes.len() && bytes[pos] == b'.' {
            let frac_start = pos + 1;
            let mut end = frac_start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            frac_digits = &s[frac_start..end];
            pos = end;
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        mantissa.push_str(if int_digits.is_empty() { "0" } else { int_digits });
        if !frac_digits.is_empty() {
            mantissa.push('.');
            mantissa.push_str(frac_digits);
        }

        Some(Self {
            mantissa,
            exponent: scan_exponent(&bytes[pos..]),
        })
    }
}

/// Reads an `e`/`E` exponent suffix; anything malformed counts as no exponent.
fn scan_exponent(bytes: &[u8]) -> i64 {
    let Some((&marker, rest)) = bytes.split_first() else {
        return 0;
    };
    if marker != b'e' && marker != b'E' {
        return 0;
    }

    let (negative, digits) = match rest.split_first() {
        Some((b'-', tail)) => (true, tail),
        Some((b'+', tail)) => (false, tail),
        _ => (false, rest),
    };

    let mut exponent: i64 = 0;
    let mut seen = false;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        seen = true;
        exponent = exponent.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    match (seen, negative) {
        (false, _) => 0,
        (true, true) => -exponent,
        (true, false) => exponent,
    }
}

fn apply_exponent(value: Decimal, exponent: i64) -> Option<Decimal> {
    if exponent == 0 || value.is_zero() {
        return Some(value);
    }
    if exponent.abs() > MAX_EXPONENT * 2 {
        return None;
    }

    let mut result = value;
    for _ in 0..exponent.abs() {
        result = if exponent > 0 {
            result.checked_mul(Decimal::TEN)?
        } else {
            result.checked_div(Decimal::TEN)?
        };
    }
    Some(result)
}

/// Serde helpers that read store fields through [`Money::to_number`].
///
/// Use with `#[serde(default, deserialize_with = "...")]` so that a missing
/// field takes the type's default as well.
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Money;

    /// Deserializes any JSON value into a decimal amount.
    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Money::to_number(&value))
    }

    /// Deserializes a free-text field; numbers are stringified and `null` is empty.
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        })
    }

    /// Like [`string`], but blank text becomes `None`.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = string(deserializer)?;
        if s.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(s))
        }
    }
}
