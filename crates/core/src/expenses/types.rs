//! Other expense types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::{ExpenseId, WeekId, lenient, optional_id};

use crate::week::lenient_date;

/// A miscellaneous business expense paid during the week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherExpenseRecord {
    /// Store key.
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<ExpenseId>,
    /// Week the expense belongs to.
    #[serde(default, alias = "semana_id", deserialize_with = "optional_id")]
    pub week_id: Option<WeekId>,
    /// Day the expense was paid.
    #[serde(default, alias = "fecha", deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// What was paid for.
    #[serde(default, alias = "concepto", deserialize_with = "lenient::string")]
    pub concept: String,
    /// Amount paid.
    #[serde(default, alias = "monto", deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
}

impl OtherExpenseRecord {
    /// Creates an undated expense.
    #[must_use]
    pub fn new(concept: impl Into<String>, amount: Decimal) -> Self {
        Self {
            concept: concept.into(),
            amount,
            ..Self::default()
        }
    }

    /// Sets the payment date.
    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Other expense totals for a week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherExpenseTotals {
    /// Number of expenses.
    pub count: usize,
    /// Sum of amounts.
    pub total: Decimal,
}
