//! Product sales for the week.
//!
//! Product rows double as standalone expenses: a row with pounds is a sale,
//! a row without pounds carries an expense value in its unit price.

pub mod ledger;
pub mod types;


pub use ledger::ProductLedger;
pub use types::{
    ProductLine, ProductPartition, ProductRecord, ProductTotals, StandaloneExpenseLine,
};
