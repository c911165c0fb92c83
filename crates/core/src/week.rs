//! Week header and the record context a reconciliation pass works on.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tillbook_shared::types::{WeekId, lenient};

use crate::closing::ClosingRecord;
use crate::expenses::OtherExpenseRecord;
use crate::loans::LoanRecord;
use crate::products::ProductRecord;

/// A reconciliation week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    /// Store key.
    pub id: WeekId,
    /// Display name.
    #[serde(default, alias = "nombre_semana", alias = "nombre", deserialize_with = "lenient::string")]
    pub name: String,
    /// Start date of the week.
    #[serde(default, alias = "fecha", deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// Month label.
    #[serde(default, alias = "mes", deserialize_with = "lenient::string")]
    pub month: String,
}

impl Week {
    /// A week known only by its id.
    #[must_use]
    pub fn with_id(id: WeekId) -> Self {
        Self {
            id,
            name: String::new(),
            date: None,
            month: String::new(),
        }
    }
}

/// Every record of one week, fetched once and shared by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecords {
    /// Week header.
    pub week: Week,
    /// Register closings.
    #[serde(default)]
    pub closings: Vec<ClosingRecord>,
    /// Product rows.
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    /// Other expenses.
    #[serde(default)]
    pub other_expenses: Vec<OtherExpenseRecord>,
    /// Personal loans and expenses.
    #[serde(default)]
    pub loans: Vec<LoanRecord>,
}

impl WeekRecords {
    /// An empty week.
    #[must_use]
    pub fn empty(week: Week) -> Self {
        Self {
            week,
            closings: Vec::new(),
            products: Vec::new(),
            other_expenses: Vec::new(),
            loans: Vec::new(),
        }
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.closings.len() + self.products.len() + self.other_expenses.len() + self.loans.len()
    }
}

/// Reads `YYYY-MM-DD`, ignoring any time part; anything else is `None`.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::String(text) = value else {
        return Ok(None);
    };
    let day = text.trim().split(['T', ' ']).next().unwrap_or_default();
    Ok(NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}
