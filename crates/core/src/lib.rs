//! Core business logic for Tripbooks.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Request handlers fetch rows, call into these modules and persist the results.
//!
//! # Modules
//!
//! - `ledger` - Cash book and bank book running balances
//! - `tds` - Tax deducted at source rate resolution and computation

pub mod ledger;
pub mod tds;
