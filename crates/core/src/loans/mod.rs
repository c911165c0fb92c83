//! Personal loans and expenses.
//!
//! Each record moves money to a person (a loan) or records money the person
//! spent for the business (an expense). Totals are kept per person and for
//! the whole week.

pub mod ledger;
pub mod types;

#[cfg(test)]
mod tests;

pub use ledger::LoanLedger;
pub use types::{
    ConceptLine, ExpenseListing, LoanRecord, LoanTotals, LoanType, PersonBalance, PersonBalances,
    PersonExpenses, Standing, UNASSIGNED,
};
