//! JSON views printed by the command-line front end.

use rust_decimal::Decimal;
use serde::Serialize;
use tillbook_core::closing::{ClosingReconciler, ClosingSummary, Day};
use tillbook_core::loans::{ExpenseListing, LoanLedger, LoanTotals, PersonBalance, Standing};
use tillbook_core::summary::WeeklySummary;
use tillbook_core::validation::RecordIssue;
use tillbook_core::{Week, WeekRecords};

/// One register slot of the week.
#[derive(Debug, Serialize)]
pub struct ClosingSlot {
    /// Trading day.
    pub day: Day,
    /// Register number.
    pub register: u8,
    /// Whether a closing was found for the slot.
    pub recorded: bool,
    /// Reconciled figures; zeros when nothing was recorded.
    #[serde(flatten)]
    pub summary: ClosingSummary,
    /// Free-text notes.
    pub observations: Option<String>,
}

/// Every register slot of the week, Monday only when it was opened.
pub fn closing_slots(records: &WeekRecords) -> Vec<ClosingSlot> {
    let mut slots = Vec::new();
    for day in Day::TRADING_DAYS {
        for register in 1..=day.register_count() {
            let record = ClosingReconciler::lookup(&records.closings, &day, register);
            if day == Day::Monday && record.is_none() {
                continue;
            }
            slots.push(ClosingSlot {
                day: day.clone(),
                register,
                recorded: record.is_some(),
                summary: ClosingReconciler::reconcile(record),
                observations: record.and_then(|r| r.observations.clone()),
            });
        }
    }
    slots
}

/// A person's balance with its standing spelled out.
#[derive(Debug, Serialize)]
pub struct PersonLine {
    /// Totals and concept lines.
    #[serde(flatten)]
    pub balance: PersonBalance,
    /// Owes, settled or holds.
    pub standing: Standing,
}

/// Personal loans view.
#[derive(Debug, Serialize)]
pub struct PeopleReport {
    /// People, net descending.
    pub people: Vec<PersonLine>,
    /// Week-wide totals.
    pub totals: LoanTotals,
    /// Sum of positive nets.
    pub positive_net_sum: Decimal,
    /// Expenses grouped by person.
    pub expenses: ExpenseListing,
}

/// Builds the personal loans view.
pub fn people(ledger: LoanLedger, records: &WeekRecords) -> PeopleReport {
    let grouped = ledger.group_by_person(&records.loans);
    PeopleReport {
        people: grouped
            .sorted_by_net()
            .into_iter()
            .map(|balance| PersonLine {
                standing: balance.standing(),
                balance,
            })
            .collect(),
        totals: ledger.aggregate(&records.loans),
        positive_net_sum: LoanLedger::positive_net_sum(&grouped),
        expenses: ledger.expenses_by_person(&records.loans),
    }
}

/// A week header with its summary.
#[derive(Debug, Serialize)]
pub struct WeekReport<'a> {
    /// Week header.
    pub week: &'a Week,
    /// Weekly balance.
    pub summary: WeeklySummary,
}

/// Validation outcome for a week.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    /// Week header.
    pub week: &'a Week,
    /// Records checked.
    pub checked: usize,
    /// Records breaking a rule.
    pub issues: Vec<RecordIssue>,
}
