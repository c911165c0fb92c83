//! Reconciliation of a single register closing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::Money;

use super::types::{ClosingRecord, Day};

/// How counted cash compares with what the concepts say should be there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceStatus {
    /// Counted cash matches exactly.
    Balanced,
    /// Less cash than expected.
    Short,
    /// More cash than expected.
    Over,
}

impl DifferenceStatus {
    /// Classifies a difference value.
    #[must_use]
    pub fn of(difference: Decimal) -> Self {
        match difference.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => Self::Over,
            std::cmp::Ordering::Less => Self::Short,
            std::cmp::Ordering::Equal => Self::Balanced,
        }
    }
}

/// Derived figures for one closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingSummary {
    /// Cash counted in the drawer.
    pub total_cash: Decimal,
    /// Expected cash from concepts (loans excluded).
    pub concepts_total: Decimal,
    /// Cash lent out of the register.
    pub loans_total: Decimal,
    /// `(total_cash + loans_total) - concepts_total`.
    pub difference: Decimal,
    /// Classification of `difference`.
    pub status: DifferenceStatus,
}

impl ClosingSummary {
    /// Summary reported for a missing closing: every figure is zero.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_cash: Decimal::ZERO,
            concepts_total: Decimal::ZERO,
            loans_total: Decimal::ZERO,
            difference: Decimal::ZERO,
            status: DifferenceStatus::Balanced,
        }
    }
}

/// Computes totals and differences for register closings.
pub struct ClosingReconciler;

impl ClosingReconciler {
    /// Expected cash: `base + carry_over + sales + vouchers + other`.
    #[must_use]
    pub fn concepts_total(record: &ClosingRecord) -> Decimal {
        Money::sum([
            record.base,
            record.carry_over,
            record.sales,
            record.vouchers,
            record.other,
        ])
    }

    /// Cash lent out of the register.
    ///
    /// The itemised list wins when present; otherwise the flat total is used.
    #[must_use]
    pub fn loans_total(record: &ClosingRecord) -> Decimal {
        if record.loans.is_empty() {
            record.loans_total
        } else {
            Money::sum(record.loans.iter().map(|loan| loan.amount))
        }
    }

    /// Counted cash plus loans, minus concepts.
    ///
    /// Loans reduce the cash on hand without being a concept, so they are
    /// added back before comparing. Zero reconciles, negative is a shortage,
    /// positive an overage.
    #[must_use]
    pub fn difference(record: &ClosingRecord) -> Decimal {
        Money::sub(
            Money::add(record.total_cash, Self::loans_total(record)),
            Self::concepts_total(record),
        )
    }

    /// Finds the closing for a day and register.
    ///
    /// Days match case-insensitively. A record without a register number
    /// matches any requested register. The first match wins.
    #[must_use]
    pub fn lookup<'a>(
        records: &'a [ClosingRecord],
        day: &Day,
        register_number: u8,
    ) -> Option<&'a ClosingRecord> {
        records.iter().find(|record| {
            record.day.matches(day)
                && record
                    .register_number
                    .is_none_or(|number| number == register_number)
        })
    }

    /// Summarizes a closing; a missing closing reports zeros.
    #[must_use]
    pub fn reconcile(record: Option<&ClosingRecord>) -> ClosingSummary {
        let Some(record) = record else {
            return ClosingSummary::empty();
        };

        let difference = Self::difference(record);
        ClosingSummary {
            total_cash: record.total_cash,
            concepts_total: Self::concepts_total(record),
            loans_total: Self::loans_total(record),
            difference,
            status: DifferenceStatus::of(difference),
        }
    }

    /// Looks up and summarizes the closing for a day and register.
    #[must_use]
    pub fn reconcile_slot(
        records: &[ClosingRecord],
        day: &Day,
        register_number: u8,
    ) -> ClosingSummary {
        Self::reconcile(Self::lookup(records, day, register_number))
    }
}
