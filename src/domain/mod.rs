//! Storage-agnostic ledger domain: markets, bets, users and the rules
//! that tie them together.

pub mod bet;
pub mod error;
pub mod id;
pub mod market;
pub mod money;
pub mod sentiment;
pub mod stats;
pub mod user;
pub mod wager;

pub use bet::{Bet, BetOption, Wager};
pub use error::DomainError;
pub use id::{BetId, MarketId, UserId};
pub use market::{Market, MarketDraft, MarketParams, MarketStatus, MarketTerms, MarketType};
pub use money::{Amount, STARTING_BALANCE};
pub use sentiment::{OptionShare, Sentiment};
pub use stats::MarketStats;
pub use user::{NewUser, User};
