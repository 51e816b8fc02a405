//! Persistence port for users, markets and bets.

use std::future::Future;

use crate::domain::{
    Bet, Market, MarketDraft, MarketId, MarketStatus, NewUser, User, UserId, Wager,
};
use crate::error::Result;

/// Durable record of users, markets and bets.
///
/// Implementations own the concurrency discipline of the ledger: the only
/// mutating calls that touch balances ([`place_bet`](Self::place_bet)) must
/// check and apply the debit as one atomic unit.
pub trait LedgerStore: Send + Sync {
    /// Insert a user. Fails with `UsernameTaken` on a duplicate username.
    fn insert_user(&self, user: &NewUser) -> impl Future<Output = Result<User>> + Send;

    /// Get a user by ID.
    fn find_user(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Get a user by exact username.
    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Persist a validated market with status `active`.
    fn insert_market(&self, draft: &MarketDraft) -> impl Future<Output = Result<Market>> + Send;

    /// Get a market by ID.
    fn find_market(&self, id: MarketId) -> impl Future<Output = Result<Option<Market>>> + Send;

    /// List markets newest first, optionally filtered by status.
    fn list_markets(
        &self,
        status: Option<MarketStatus>,
    ) -> impl Future<Output = Result<Vec<Market>>> + Send;

    /// Number of markets in the ledger.
    fn count_markets(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Move a market along its state machine, stamping `resolved_at`.
    ///
    /// Fails with `MarketNotFound` or `InvalidTransition`.
    fn transition_market(
        &self,
        id: MarketId,
        to: MarketStatus,
        resolution: Option<String>,
    ) -> impl Future<Output = Result<Market>> + Send;

    /// All bets recorded against a market, oldest first.
    fn market_bets(&self, id: MarketId) -> impl Future<Output = Result<Vec<Bet>>> + Send;

    /// Authorize a wager and, if it passes, record the bet and debit the
    /// user in one atomic step.
    ///
    /// Either both writes are applied or neither is.
    fn place_bet(&self, wager: &Wager) -> impl Future<Output = Result<Bet>> + Send;
}
