//! Cash-register closing types.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tillbook_shared::types::{ClosingId, Money, WeekId, lenient, optional_id};

/// Trading day a closing belongs to.
///
/// Parsed case-insensitively from English or Spanish day names. Unrecognised
/// names are kept verbatim so a bad record never prevents loading a week.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Day {
    /// Saturday (one register).
    Saturday,
    /// Sunday (two registers).
    Sunday,
    /// Monday, only opened on holidays (one register).
    Monday,
    /// Any other day name found in the store.
    Other(String),
}

impl Day {
    /// Days that take part in the weekly reconciliation, in display order.
    pub const TRADING_DAYS: [Self; 3] = [Self::Saturday, Self::Sunday, Self::Monday];

    /// Number of physical registers opened on this day.
    #[must_use]
    pub const fn register_count(&self) -> u8 {
        match self {
            Self::Sunday => 2,
            Self::Saturday | Self::Monday => 1,
            Self::Other(_) => 0,
        }
    }

    /// Case-insensitive comparison, also for unrecognised day names.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Other(a), Self::Other(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
            _ => self == other,
        }
    }
}

impl Default for Day {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saturday => write!(f, "Saturday"),
            Self::Sunday => write!(f, "Sunday"),
            Self::Monday => write!(f, "Monday"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

impl std::str::FromStr for Day {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "saturday" | "sabado" | "sábado" => Self::Saturday,
            "sunday" | "domingo" => Self::Sunday,
            "monday" | "lunes" => Self::Monday,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient::string(deserializer)?;
        let Ok(day) = text.parse::<Day>();
        Ok(day)
    }
}

/// Cash lent out of the register during the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingLoan {
    /// What the cash was lent for.
    #[serde(default, alias = "concepto", deserialize_with = "lenient::string")]
    pub concept: String,
    /// Amount taken from the register.
    #[serde(default, alias = "monto", deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
}

/// One cash-register closing for one day (and, on Sunday, one register).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingRecord {
    /// Store key.
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<ClosingId>,
    /// Week the closing belongs to.
    #[serde(default, alias = "semana_id", deserialize_with = "optional_id")]
    pub week_id: Option<WeekId>,
    /// Trading day.
    #[serde(default, alias = "dia")]
    pub day: Day,
    /// Register number; `None` on legacy records, which match any register.
    #[serde(default, alias = "numero_caja", deserialize_with = "register_number")]
    pub register_number: Option<u8>,
    /// Cash counted in the drawer.
    #[serde(default, alias = "total_efectivo", deserialize_with = "lenient::decimal")]
    pub total_cash: Decimal,
    /// Starting float.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub base: Decimal,
    /// Sales.
    #[serde(default, alias = "ventas", deserialize_with = "lenient::decimal")]
    pub sales: Decimal,
    /// Voucher books (`talonarios`).
    #[serde(default, alias = "talonarios", deserialize_with = "lenient::decimal")]
    pub vouchers: Decimal,
    /// Amount carried over (`llevar`).
    #[serde(default, alias = "llevar", deserialize_with = "lenient::decimal")]
    pub carry_over: Decimal,
    /// Any other expected cash.
    #[serde(default, alias = "otro", deserialize_with = "lenient::decimal")]
    pub other: Decimal,
    /// Itemised loans taken from the register.
    #[serde(default, alias = "prestamos", deserialize_with = "closing_loans")]
    pub loans: Vec<ClosingLoan>,
    /// Flat loans total, used when no itemised list is present.
    #[serde(default, alias = "prestamos_total", deserialize_with = "lenient::decimal")]
    pub loans_total: Decimal,
    /// Free-text notes.
    #[serde(default, alias = "observaciones", deserialize_with = "lenient::opt_string")]
    pub observations: Option<String>,
}

impl ClosingRecord {
    /// Creates an empty closing for a day and register.
    #[must_use]
    pub fn new(day: Day, register_number: u8) -> Self {
        Self {
            day,
            register_number: Some(register_number),
            ..Self::default()
        }
    }
}

/// Zero or a value that does not fit a register number is treated as unset.
fn register_number<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = Money::to_number(&value).trunc();
    Ok(number.to_u8().filter(|n| *n != 0))
}

/// Loans arrive as a JSON array, a JSON-encoded string, or not at all.
fn closing_loans<'de, D>(deserializer: D) -> Result<Vec<ClosingLoan>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[rstest]
    #[case("Saturday", Day::Saturday)]
    #[case("sábado", Day::Saturday)]
    #[case("SABADO", Day::Saturday)]
    #[case("domingo", Day::Sunday)]
    #[case(" Sunday ", Day::Sunday)]
    #[case("Lunes", Day::Monday)]
    #[case("Friday", Day::Other("Friday".to_string()))]
    fn test_day_parsing(#[case] input: &str, #[case] expected: Day) {
        let day: Day = input.parse().unwrap();
        assert_eq!(day, expected);
    }

    #[test]
    fn test_other_days_match_case_insensitively() {
        let a = Day::Other("Viernes".to_string());
        let b = Day::Other("viernes".to_string());
        assert!(a.matches(&b));
        assert!(!a.matches(&Day::Saturday));
    }

    #[test]
    fn test_register_counts() {
        assert_eq!(Day::Saturday.register_count(), 1);
        assert_eq!(Day::Sunday.register_count(), 2);
        assert_eq!(Day::Monday.register_count(), 1);
    }

    #[test]
    fn test_deserialize_spanish_record() {
        let record: ClosingRecord = serde_json::from_value(json!({
            "id": 9,
            "semana_id": "3",
            "dia": "Domingo",
            "numero_caja": "2",
            "total_efectivo": "500000",
            "base": 100000,
            "ventas": 300000,
            "talonarios": "50000",
            "llevar": null,
            "prestamos": "[{\"concepto\": \"Luz\", \"monto\": \"20000\"}]",
            "prestamos_total": 20000,
            "observaciones": ""
        }))
        .unwrap();

        assert_eq!(record.id, Some(ClosingId::new(9)));
        assert_eq!(record.week_id, Some(WeekId::new(3)));
        assert_eq!(record.day, Day::Sunday);
        assert_eq!(record.register_number, Some(2));
        assert_eq!(record.total_cash, dec!(500000));
        assert_eq!(record.vouchers, dec!(50000));
        assert_eq!(record.carry_over, Decimal::ZERO);
        assert_eq!(record.loans.len(), 1);
        assert_eq!(record.loans[0].concept, "Luz");
        assert_eq!(record.loans[0].amount, dec!(20000));
        assert_eq!(record.observations, None);
    }

    #[test]
    fn test_deserialize_legacy_record_without_register() {
        let record: ClosingRecord = serde_json::from_value(json!({
            "day": "saturday",
            "total_cash": "abc",
            "register_number": 0
        }))
        .unwrap();

        assert_eq!(record.day, Day::Saturday);
        assert_eq!(record.register_number, None);
        assert_eq!(record.total_cash, Decimal::ZERO);
        assert!(record.loans.is_empty());
    }

    #[test]
    fn test_day_serializes_as_name() {
        assert_eq!(serde_json::to_value(Day::Monday).unwrap(), json!("Monday"));
    }
}
