//! Entry rules for store records.
//!
//! Checks mirror what the entry forms enforce. They are advisory: the
//! reconciliation pass accepts any record and never calls into this module.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::closing::{ClosingRecord, Day};
use crate::expenses::OtherExpenseRecord;
use crate::loans::{LoanRecord, LoanType};
use crate::products::ProductRecord;
use crate::week::WeekRecords;

/// Rule broken by a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is blank.
    #[error("{field} is required")]
    Required {
        /// Field name.
        field: &'static str,
    },

    /// An amount that may be zero is negative.
    #[error("{field} cannot be negative: {value}")]
    Negative {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// An amount that must be positive is zero or negative.
    #[error("{field} must be greater than zero: {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// The day is not a trading day.
    #[error("Unknown day: {0}")]
    UnknownDay(String),

    /// The register does not exist on that day.
    #[error("Register {register} is not valid on {day}")]
    InvalidRegister {
        /// Trading day.
        day: Day,
        /// Register number given, if any.
        register: u8,
    },

    /// The loan record is neither a loan nor an expense.
    #[error("Unknown loan type: {0}")]
    UnknownLoanType(String),
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Validates a register closing.
///
/// # Errors
///
/// Returns the first rule the closing breaks.
pub fn validate_closing(record: &ClosingRecord) -> Result<(), ValidationError> {
    if let Day::Other(name) = &record.day {
        return Err(ValidationError::UnknownDay(name.clone()));
    }

    // Legacy records without a register number count as register 1.
    let register = record.register_number.unwrap_or(1);
    if register == 0 || register > record.day.register_count() {
        return Err(ValidationError::InvalidRegister {
            day: record.day.clone(),
            register,
        });
    }

    non_negative("total_cash", record.total_cash)?;
    non_negative("base", record.base)?;
    non_negative("vouchers", record.vouchers)?;
    non_negative("sales", record.sales)?;
    Ok(())
}

/// Validates a personal loan or expense.
///
/// # Errors
///
/// Returns the first rule the record breaks.
pub fn validate_loan(record: &LoanRecord) -> Result<(), ValidationError> {
    required("person", &record.person)?;
    if let LoanType::Unknown(raw) = &record.kind {
        return Err(ValidationError::UnknownLoanType(raw.clone()));
    }
    required("concept", &record.concept)?;
    positive("amount", record.amount)
}

/// Validates an other expense.
///
/// # Errors
///
/// Returns the first rule the record breaks.
pub fn validate_other_expense(record: &OtherExpenseRecord) -> Result<(), ValidationError> {
    required("concept", &record.concept)?;
    positive("amount", record.amount)
}

/// Validates a product row.
///
/// # Errors
///
/// Returns the first rule the row breaks.
pub fn validate_product(record: &ProductRecord) -> Result<(), ValidationError> {
    required("name", &record.name)?;
    non_negative("unit_price", record.unit_price)?;
    non_negative("pounds", record.pounds)?;
    non_negative("expense", record.expense)
}

/// A rule broken by one record of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    /// Collection the record came from.
    pub collection: &'static str,
    /// Position in the collection.
    pub index: usize,
    /// Store key, when the record has one.
    pub id: Option<i64>,
    /// What is wrong.
    pub message: String,
}

/// Runs every rule over a week and lists the records that break one.
#[must_use]
pub fn validate_week(records: &WeekRecords) -> Vec<RecordIssue> {
    fn collect<T>(
        issues: &mut Vec<RecordIssue>,
        collection: &'static str,
        items: &[T],
        id: impl Fn(&T) -> Option<i64>,
        check: impl Fn(&T) -> Result<(), ValidationError>,
    ) {
        for (index, item) in items.iter().enumerate() {
            if let Err(err) = check(item) {
                issues.push(RecordIssue {
                    collection,
                    index,
                    id: id(item),
                    message: err.to_string(),
                });
            }
        }
    }

    let mut issues = Vec::new();
    collect(
        &mut issues,
        "closings",
        &records.closings,
        |r| r.id.map(|id| id.into_inner()),
        validate_closing,
    );
    collect(
        &mut issues,
        "products",
        &records.products,
        |r| r.id.map(|id| id.into_inner()),
        validate_product,
    );
    collect(
        &mut issues,
        "other_expenses",
        &records.other_expenses,
        |r| r.id.map(|id| id.into_inner()),
        validate_other_expense,
    );
    collect(
        &mut issues,
        "loans",
        &records.loans,
        |r| r.id.map(|id| id.into_inner()),
        validate_loan,
    );
    issues
}
