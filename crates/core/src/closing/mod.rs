//! Cash-register closings.
//!
//! This module covers one closing at a time:
//! - Closing record types (days, registers, loans taken from the drawer)
//! - Concepts, loans and difference calculations
//! - Lookup of the closing for a day and register

pub mod reconciler;
pub mod types;

#[cfg(test)]
mod reconciler_props;

pub use reconciler::{ClosingReconciler, ClosingSummary, DifferenceStatus};
pub use types::{ClosingLoan, ClosingRecord, Day};
