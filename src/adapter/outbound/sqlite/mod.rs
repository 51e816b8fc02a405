//! SQLite persistence adapter.
//!
//! Provides the Diesel-backed [`SqliteLedger`](ledger::SqliteLedger) and the
//! connection management it runs on.

pub mod database;
pub mod ledger;

pub use ledger::SqliteLedger;
