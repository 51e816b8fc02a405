//! In-process ledger store.
//!
//! Keeps users, markets and bets in memory behind a single
//! [`parking_lot::Mutex`]. Every operation runs to completion while holding
//! the lock, which makes bet placement trivially atomic. Nothing survives a
//! restart; use [`SqliteLedger`](super::sqlite::SqliteLedger) for a durable ledger.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::wager::authorize;
use crate::domain::{
    Bet, BetId, DomainError, Market, MarketDraft, MarketId, MarketStatus, NewUser, User, UserId,
    Wager,
};
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

#[derive(Default)]
struct LedgerState {
    users: BTreeMap<UserId, User>,
    markets: BTreeMap<MarketId, Market>,
    bets: Vec<Bet>,
    next_user: i32,
    next_market: i32,
    next_bet: i32,
}

impl LedgerState {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }
}

/// Memory-backed ledger store.
#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedger {
    async fn insert_user(&self, user: &NewUser) -> Result<User> {
        let mut state = self.state.lock();
        if state.users.values().any(|u| u.username == user.username()) {
            return Err(DomainError::UsernameTaken {
                username: user.username().to_string(),
            }
            .into());
        }

        let id = UserId::new(LedgerState::next_id(&mut state.next_user));
        let created = User {
            id,
            username: user.username().to_string(),
            credential: user.credential().to_string(),
            balance: user.balance(),
            created_at: Utc::now(),
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_market(&self, draft: &MarketDraft) -> Result<Market> {
        let mut state = self.state.lock();
        let id = MarketId::new(LedgerState::next_id(&mut state.next_market));
        let market = Market {
            id,
            question: draft.question().to_string(),
            terms: draft.terms().clone(),
            status: MarketStatus::Active,
            resolution: None,
            created_at: Utc::now(),
            resolved_at: None,
        };
        state.markets.insert(id, market.clone());
        Ok(market)
    }

    async fn find_market(&self, id: MarketId) -> Result<Option<Market>> {
        Ok(self.state.lock().markets.get(&id).cloned())
    }

    async fn list_markets(&self, status: Option<MarketStatus>) -> Result<Vec<Market>> {
        let state = self.state.lock();
        let mut markets: Vec<Market> = state
            .markets
            .values()
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect();
        markets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(markets)
    }

    async fn count_markets(&self) -> Result<u64> {
        Ok(self.state.lock().markets.len() as u64)
    }

    async fn transition_market(
        &self,
        id: MarketId,
        to: MarketStatus,
        resolution: Option<String>,
    ) -> Result<Market> {
        let mut state = self.state.lock();
        let market = state
            .markets
            .get_mut(&id)
            .ok_or(DomainError::MarketNotFound { market_id: id })?;

        market.status = market.status.transition(to)?;
        market.resolution = resolution;
        market.resolved_at = Some(Utc::now());
        Ok(market.clone())
    }

    async fn market_bets(&self, id: MarketId) -> Result<Vec<Bet>> {
        Ok(self
            .state
            .lock()
            .bets
            .iter()
            .filter(|bet| bet.market_id == id)
            .cloned()
            .collect())
    }

    async fn place_bet(&self, wager: &Wager) -> Result<Bet> {
        let mut state = self.state.lock();
        let auth = authorize(
            wager,
            state.markets.get(&wager.market_id),
            state.users.get(&wager.user_id),
        )?;

        let bet = Bet {
            id: BetId::new(LedgerState::next_id(&mut state.next_bet)),
            user_id: wager.user_id,
            market_id: wager.market_id,
            option: auth.option,
            amount: auth.amount,
            placed_at: Utc::now(),
        };

        if let Some(user) = state.users.get_mut(&wager.user_id) {
            user.balance = auth.balance_after;
        }
        state.bets.push(bet.clone());
        Ok(bet)
    }
}
