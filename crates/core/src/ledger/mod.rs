//! Cash book and bank book logic.
//!
//! This module implements:
//! - Book transactions and their direction
//! - Running balance accumulation
//! - Period statements for cash and bank books
//! - Versioned account balance updates
//! - Error types for ledger operations

pub mod accumulator;
pub mod balance;
pub mod error;
pub mod movement;
pub mod statement;

#[cfg(test)]
mod accumulator_props;

pub use accumulator::{DailyTotals, LedgerLine, LedgerSnapshot, accumulate};
pub use balance::{VersionedBalance, receipt_delta};
pub use error::LedgerError;
pub use movement::{BookTransaction, LedgerMovement, Movement, TransactionKind, parse_amount};
pub use statement::{BookKind, BookStatement};
