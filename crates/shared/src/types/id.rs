//! Typed IDs for type-safe record references.
//!
//! The record store keys rows by integer ids. Using typed IDs prevents
//! accidentally passing a `LoanId` where a `WeekId` is expected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from the raw store key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw store key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                raw_id(deserializer).map(Self)
            }
        }
    };
}

/// Accepts an integer or a numeric string, since the store is not consistent.
fn raw_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("id is not an integer: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("id is not an integer: {s:?}"))),
        other => Err(D::Error::custom(format!("unexpected id value: {other}"))),
    }
}

/// Reads an optional id leniently: anything that is not an integer key is `None`.
///
/// Use with `#[serde(default, deserialize_with = "optional_id")]` on record fields
/// so a malformed foreign key never rejects the whole record.
pub fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    let id = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id.map(T::from))
}

typed_id!(WeekId, "Unique identifier for a reconciliation week.");
typed_id!(ClosingId, "Unique identifier for a cash-register closing.");
typed_id!(ProductId, "Unique identifier for a product line.");
typed_id!(LoanId, "Unique identifier for a loan or personal expense entry.");
typed_id!(ExpenseId, "Unique identifier for an other-expense entry.");
