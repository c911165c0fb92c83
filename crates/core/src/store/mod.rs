//! Week record store backed by Apache OpenDAL.
//!
//! Stands in for the external persistence layer: reads the records of a
//! week from a local directory or an S3-compatible bucket and hands them to
//! the engine as a [`WeekRecords`](crate::week::WeekRecords) context.

mod config;
mod error;
mod service;

#[cfg(test)]
mod tests;

pub use config::StoreProvider;
pub use error::StoreError;
pub use service::WeekStore;
