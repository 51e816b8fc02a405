//! Application services (use cases).
//!
//! These services orchestrate domain logic over a [`LedgerStore`] to
//! implement the ledger's use cases.
//!
//! [`LedgerStore`]: crate::port::outbound::ledger::LedgerStore

pub mod account;
pub mod aggregator;
pub mod ledger;
pub mod lifecycle;
pub mod wagering;

pub use account::AccountService;
pub use aggregator::{MarketAggregator, MarketOverview};
pub use ledger::Ledger;
pub use lifecycle::MarketLifecycle;
pub use wagering::WageringEngine;
