//! Ledger facade consumed by the web layer.
//!
//! Bundles the account, lifecycle, wagering and aggregation services over a
//! single shared store. Every operation takes the acting user explicitly;
//! the ledger never consults ambient session state.

use std::sync::Arc;

use crate::domain::money::{Amount, STARTING_BALANCE};
use crate::domain::{
    Bet, Market, MarketId, MarketParams, MarketStats, MarketStatus, Sentiment, User, UserId,
};
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

use super::account::AccountService;
use super::aggregator::{MarketAggregator, MarketOverview};
use super::lifecycle::MarketLifecycle;
use super::wagering::WageringEngine;

/// Entry point to the wagering ledger.
///
/// Cheap to clone; clones share the underlying store.
pub struct Ledger<S> {
    accounts: AccountService<S>,
    lifecycle: MarketLifecycle<S>,
    engine: WageringEngine<S>,
    aggregator: MarketAggregator<S>,
}

impl<S> Clone for Ledger<S> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            lifecycle: self.lifecycle.clone(),
            engine: self.engine.clone(),
            aggregator: self.aggregator.clone(),
        }
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Build a ledger that grants the default starting balance.
    pub fn new(store: S) -> Self {
        Self::with_starting_balance(store, STARTING_BALANCE)
    }

    /// Build a ledger that grants `starting_balance` to new users.
    pub fn with_starting_balance(store: S, starting_balance: Amount) -> Self {
        let store = Arc::new(store);
        Self {
            accounts: AccountService::new(Arc::clone(&store), starting_balance),
            lifecycle: MarketLifecycle::new(Arc::clone(&store)),
            engine: WageringEngine::new(Arc::clone(&store)),
            aggregator: MarketAggregator::new(store),
        }
    }

    #[must_use]
    pub const fn accounts(&self) -> &AccountService<S> {
        &self.accounts
    }

    #[must_use]
    pub const fn lifecycle(&self) -> &MarketLifecycle<S> {
        &self.lifecycle
    }

    #[must_use]
    pub const fn engine(&self) -> &WageringEngine<S> {
        &self.engine
    }

    #[must_use]
    pub const fn aggregator(&self) -> &MarketAggregator<S> {
        &self.aggregator
    }

    /// See [`AccountService::register`].
    ///
    /// # Errors
    /// Propagates registration failures.
    pub async fn register_user(&self, username: &str, credential: &str) -> Result<User> {
        self.accounts.register(username, credential).await
    }

    /// See [`AccountService::find`].
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn find_user(&self, user_id: UserId) -> Result<Option<User>> {
        self.accounts.find(user_id).await
    }

    /// See [`AccountService::find_by_username`].
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.accounts.find_by_username(username).await
    }

    /// See [`AccountService::balance`].
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn get_balance(&self, user_id: UserId) -> Result<Amount> {
        self.accounts.balance(user_id).await
    }

    /// See [`MarketLifecycle::create`].
    ///
    /// # Errors
    /// Propagates validation and storage failures.
    pub async fn create_market(
        &self,
        question: &str,
        market_type: &str,
        params: &MarketParams,
    ) -> Result<Market> {
        self.lifecycle.create(question, market_type, params).await
    }

    /// See [`MarketLifecycle::get`].
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn get_market(&self, market_id: MarketId) -> Result<Option<Market>> {
        self.lifecycle.get(market_id).await
    }

    /// See [`MarketLifecycle::list`].
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    pub async fn list_markets(&self, status: Option<MarketStatus>) -> Result<Vec<Market>> {
        self.lifecycle.list(status).await
    }

    /// See [`MarketLifecycle::resolve`].
    ///
    /// # Errors
    /// Propagates state machine and storage failures.
    pub async fn resolve_market(&self, market_id: MarketId, resolution: &str) -> Result<Market> {
        self.lifecycle.resolve(market_id, resolution).await
    }

    /// See [`MarketLifecycle::cancel`].
    ///
    /// # Errors
    /// Propagates state machine and storage failures.
    pub async fn cancel_market(&self, market_id: MarketId) -> Result<Market> {
        self.lifecycle.cancel(market_id).await
    }

    /// See [`MarketLifecycle::seed_defaults`].
    ///
    /// # Errors
    /// Returns a storage error if seeding fails.
    pub async fn seed_defaults(&self) -> Result<Vec<Market>> {
        self.lifecycle.seed_defaults().await
    }

    /// See [`WageringEngine::place_bet`].
    ///
    /// # Errors
    /// Propagates bet rejections and storage failures.
    pub async fn place_bet(
        &self,
        user_id: UserId,
        market_id: MarketId,
        option: &str,
        amount: Amount,
    ) -> Result<Bet> {
        self.engine.place_bet(user_id, market_id, option, amount).await
    }

    /// See [`MarketAggregator::sentiment`].
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read.
    pub async fn sentiment(&self, market_id: MarketId) -> Result<Option<Sentiment>> {
        self.aggregator.sentiment(market_id).await
    }

    /// See [`MarketAggregator::stats`].
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read.
    pub async fn stats(&self, market_id: MarketId, viewer: Option<UserId>) -> Result<MarketStats> {
        self.aggregator.stats(market_id, viewer).await
    }

    /// See [`MarketAggregator::overview`].
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read.
    pub async fn overview(
        &self,
        market_id: MarketId,
        viewer: Option<UserId>,
    ) -> Result<Option<MarketOverview>> {
        self.aggregator.overview(market_id, viewer).await
    }

    /// See [`MarketAggregator::dashboard`].
    ///
    /// # Errors
    /// Returns a storage error if the ledger cannot be read.
    pub async fn dashboard(&self, viewer: Option<UserId>) -> Result<Vec<MarketOverview>> {
        self.aggregator.dashboard(viewer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryLedger;
    use crate::domain::BetOption;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn end_to_end_flow_over_memory_store() {
        let ledger = Ledger::new(MemoryLedger::new());
        let seeded = ledger.seed_defaults().await.unwrap();
        let chip_race = seeded[0].id;

        let alice = ledger.register_user("alice", "hash").await.unwrap();
        ledger
            .place_bet(alice.id, chip_race, "option_a", dec!(300))
            .await
            .unwrap();

        assert_eq!(ledger.get_balance(alice.id).await.unwrap(), dec!(700));
        let sentiment = ledger.sentiment(chip_race).await.unwrap().unwrap();
        assert_eq!(sentiment.percent(BetOption::OptionA), Some(dec!(100)));

        let dashboard = ledger.dashboard(Some(alice.id)).await.unwrap();
        assert_eq!(dashboard.len(), 2);
        let chip = dashboard.iter().find(|o| o.market.id == chip_race).unwrap();
        assert_eq!(chip.stats.user_position, dec!(300));
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let ledger = Ledger::new(MemoryLedger::new());
        let clone = ledger.clone();
        let user = ledger.register_user("alice", "hash").await.unwrap();
        assert!(clone.find_user(user.id).await.unwrap().is_some());
    }
}
