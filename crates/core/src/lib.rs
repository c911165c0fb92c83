//! Core reconciliation logic for Tillbook.
//!
//! This crate turns a week's raw records into totals, differences and a
//! final balance. It has no web or database dependencies; the only I/O is
//! the `store` adapter that loads a week from an object store.
//!
//! # Modules
//!
//! - `closing` - Register closings and cash differences
//! - `products` - Product sales and standalone expenses
//! - `loans` - Personal loans and expenses per person
//! - `expenses` - Miscellaneous expenses
//! - `summary` - Weekly balance composition
//! - `validation` - Entry rules for records
//! - `store` - Week loading from local or S3 storage

pub mod closing;
pub mod expenses;
pub mod loans;
pub mod products;
pub mod store;
pub mod summary;
pub mod validation;
pub mod week;

pub use closing::{ClosingReconciler, ClosingRecord, Day};
pub use expenses::{OtherExpenseRecord, OtherExpenses};
pub use loans::{LoanLedger, LoanRecord, LoanType};
pub use products::{ProductLedger, ProductRecord};
pub use store::{StoreError, StoreProvider, WeekStore};
pub use summary::{WeeklySummary, WeeklySummaryEngine};
pub use week::{Week, WeekRecords};
