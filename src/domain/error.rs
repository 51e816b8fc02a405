//! Domain validation errors for the wagering ledger.
//!
//! Every variant here is detected before any write reaches the ledger, so a
//! caller receiving one can rely on balances and bets being untouched.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use wagerbook::domain::error::DomainError;
//! use wagerbook::domain::market::{MarketDraft, MarketParams};
//!
//! let result = MarketDraft::try_new("Who wins?", "parimutuel", &MarketParams::default());
//!
//! assert!(matches!(result, Err(DomainError::InvalidMarketType { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::id::{MarketId, UserId};
use super::market::{MarketStatus, MarketType};

/// Errors that occur when ledger invariants would be violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Market type is neither `binary` nor `over_under`.
    #[error("invalid market type '{value}'")]
    InvalidMarketType {
        /// The rejected market type.
        value: String,
    },

    /// Question or type-specific fields are missing or malformed.
    #[error("invalid market parameters: {reason}")]
    InvalidMarketParameters {
        /// Which field failed and why.
        reason: String,
    },

    /// Stakes must be positive, finite decimals.
    #[error("invalid bet amount '{amount}'")]
    InvalidBetAmount {
        /// The rejected amount, as supplied.
        amount: String,
    },

    /// Market is unknown or no longer accepting bets.
    #[error("market {market_id} is not active")]
    MarketNotActive {
        /// The market the bet was placed against.
        market_id: MarketId,
    },

    /// Option token is not legal for the market's type.
    #[error("option '{option}' is not valid for a {market_type} market")]
    InvalidOption {
        /// The rejected option token.
        option: String,
        /// Type of the market the bet was placed against.
        market_type: MarketType,
    },

    /// Balance does not cover the stake.
    #[error("insufficient balance: {balance} < {amount}")]
    InsufficientBalance {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Requested stake.
        amount: Decimal,
    },

    /// No user exists with this id.
    #[error("user {user_id} not found")]
    UserNotFound {
        /// The unknown user id.
        user_id: UserId,
    },

    /// Username or credential is empty.
    #[error("invalid username: {reason}")]
    InvalidUsername {
        /// Why the registration was rejected.
        reason: String,
    },

    /// Another user already holds this username.
    #[error("username '{username}' is already taken")]
    UsernameTaken {
        /// The duplicated username.
        username: String,
    },

    /// No market exists with this id.
    #[error("market {market_id} not found")]
    MarketNotFound {
        /// The unknown market id.
        market_id: MarketId,
    },

    /// Status change not allowed by the market state machine.
    #[error("cannot move market from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: MarketStatus,
        /// Requested status.
        to: MarketStatus,
    },
}
