//! Weekly summary types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::closing::{Day, DifferenceStatus};
use crate::loans::PersonBalance;

/// Difference of one trading day, across all its registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDifference {
    /// Trading day.
    pub day: Day,
    /// Sum of register differences.
    pub difference: Decimal,
    /// Classification of `difference`.
    pub status: DifferenceStatus,
}

/// Cash counted on one trading day, across all its registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCash {
    /// Trading day.
    pub day: Day,
    /// Sum of counted cash.
    pub cash: Decimal,
    /// Number of register closings found.
    pub closings: usize,
}

/// A step of the running balance from cash down to the final balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownItem {
    /// Cash after the loan adjustment.
    AdjustedCash,
    /// Net product total.
    Products,
    /// Other expenses.
    OtherExpenses,
    /// Money held by people with a positive loan balance.
    PositiveLoans,
    /// What remains.
    FinalBalance,
}

/// One row of the running-balance breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Step.
    pub item: BreakdownItem,
    /// Amount added (first row) or subtracted (middle rows); the final row repeats the balance.
    pub amount: Decimal,
    /// Balance after this step.
    pub balance: Decimal,
}

/// Final weekly balance and the figures it is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// Sum of counted cash over every closing.
    pub total_cash: Decimal,
    /// Net product total.
    pub total_products_final: Decimal,
    /// Sum of other expenses.
    pub total_other_expenses: Decimal,
    /// Aggregate loan net (loans minus expenses).
    pub total_loans_final: Decimal,
    /// Sum of positive per-person nets.
    pub positive_loans_total: Decimal,
    /// Cash plus the magnitude of a negative loan net.
    pub adjusted_cash: Decimal,
    /// Cash left after products, other expenses and positive loans.
    pub final_balance: Decimal,
    /// Per-person balances, net descending.
    pub per_person_balances: Vec<PersonBalance>,
    /// Saturday, Sunday and (when open) Monday differences.
    pub per_day_differences: Vec<DayDifference>,
    /// Saturday, Sunday and (when open) Monday cash.
    pub day_cash: Vec<DayCash>,
    /// Sum of `day_cash`.
    pub daily_cash_total: Decimal,
    /// Sum of `per_day_differences`.
    pub daily_difference_total: Decimal,
    /// Running balance rows.
    pub breakdown: Vec<BreakdownRow>,
}
