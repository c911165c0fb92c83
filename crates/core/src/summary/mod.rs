//! Weekly balance.
//!
//! Composes closings, products, other expenses and personal loans into one
//! final balance, with per-day and per-person detail.

pub mod engine;
pub mod types;


pub use engine::WeeklySummaryEngine;
pub use types::{BreakdownItem, BreakdownRow, DayCash, DayDifference, WeeklySummary};
