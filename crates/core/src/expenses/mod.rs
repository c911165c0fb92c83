//! Miscellaneous expenses paid out of the week's cash.

pub mod types;

use tillbook_shared::types::Money;

pub use types::{OtherExpenseRecord, OtherExpenseTotals};

/// Totals for other expenses.
pub struct OtherExpenses;

impl OtherExpenses {
    /// Sum of every expense amount.
    #[must_use]
    pub fn total(records: &[OtherExpenseRecord]) -> rust_decimal::Decimal {
        Money::sum(records.iter().map(|record| record.amount))
    }

    /// Count and total.
    #[must_use]
    pub fn summarize(records: &[OtherExpenseRecord]) -> OtherExpenseTotals {
        OtherExpenseTotals {
            count: records.len(),
            total: Self::total(records),
        }
    }

    /// Expenses ordered by date, newest first; undated expenses go last.
    #[must_use]
    pub fn newest_first(records: &[OtherExpenseRecord]) -> Vec<&OtherExpenseRecord> {
        let mut sorted: Vec<&OtherExpenseRecord> = records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            OtherExpenseRecord::new("Luz", dec!(45000)),
            OtherExpenseRecord::new("Agua", dec!(12500.50)),
        ];
        let totals = OtherExpenses::summarize(&records);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total, dec!(57500.50));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(OtherExpenses::total(&[]), Decimal::ZERO);
        assert_eq!(OtherExpenses::summarize(&[]).count, 0);
    }

    #[test]
    fn test_newest_first_puts_undated_last() {
        let records = vec![
            OtherExpenseRecord::new("a", dec!(1)).on(date(4)),
            OtherExpenseRecord::new("b", dec!(1)),
            OtherExpenseRecord::new("c", dec!(1)).on(date(6)),
        ];
        let order: Vec<_> = OtherExpenses::newest_first(&records)
            .into_iter()
            .map(|record| record.concept.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_spanish_record_deserializes() {
        let record: OtherExpenseRecord = serde_json::from_value(json!({
            "id": 2,
            "semana_id": 7,
            "fecha": "2024-05-05",
            "concepto": "Gas",
            "monto": "18000"
        }))
        .unwrap();
        assert_eq!(record.date, Some(date(5)));
        assert_eq!(record.concept, "Gas");
        assert_eq!(record.amount, dec!(18000));
    }
}
