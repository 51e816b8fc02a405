//! Wagerbook - A play-money prediction market ledger.
//!
//! Users hold a virtual balance, markets pose a question with exactly two
//! outcomes, and bets move balance into a market. The ledger guarantees that
//! a balance never goes negative and that every debit is matched by exactly
//! one recorded bet, even under concurrent placement.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - Markets, bets, users, money and the pure checks over them
//! - **`port`** - The [`LedgerStore`](port::outbound::ledger::LedgerStore) trait
//! - **`adapter`** - SQLite (Diesel) and in-memory stores
//! - **`application`** - Account, lifecycle, wagering and aggregation services
//! - **`infrastructure`** - Configuration, logging and bootstrap
//!
//! # Example
//!
//! ```no_run
//! use rust_decimal_macros::dec;
//! use wagerbook::infrastructure::bootstrap::bootstrap;
//! use wagerbook::infrastructure::config::settings::Config;
//!
//! # async fn run() -> wagerbook::error::Result<()> {
//! let config = Config::from_env()?;
//! config.init_logging();
//!
//! let ledger = bootstrap(&config).await?;
//! let user = ledger.register_user("alice", "argon2-hash").await?;
//! let markets = ledger.list_markets(None).await?;
//! ledger.place_bet(user.id, markets[0].id, "option_a", dec!(25)).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
