//! Wagering engine: the only operation that moves money.
//!
//! The stake is validated before the store is touched. Everything that
//! depends on ledger state (market status, option legality, balance) is
//! checked by the store inside the same atomic unit that records the bet
//! and applies the debit.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::money::{validate_stake, Amount};
use crate::domain::{Bet, MarketId, UserId, Wager};
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

/// Validates and executes bet placements.
pub struct WageringEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for WageringEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> WageringEngine<S> {
    /// Create an engine over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Place a bet and debit the user's balance.
    ///
    /// Checks run in order and the first failure is returned:
    /// `InvalidBetAmount`, `MarketNotActive`, `InvalidOption`,
    /// `UserNotFound`, `InsufficientBalance`. A rejected or failed call leaves the ledger
    /// unchanged. Calls are not idempotent: every success records one bet.
    ///
    /// # Errors
    /// Returns the domain rejection, or a storage error if the transaction
    /// could not be committed.
    pub async fn place_bet(
        &self,
        user_id: UserId,
        market_id: MarketId,
        option: &str,
        amount: Amount,
    ) -> Result<Bet> {
        if let Err(e) = validate_stake(amount) {
            debug!(user_id = %user_id, market_id = %market_id, error = %e, "Bet rejected");
            return Err(e.into());
        }

        let wager = Wager::new(user_id, market_id, option, amount);
        match self.store.place_bet(&wager).await {
            Ok(bet) => {
                info!(
                    bet_id = %bet.id,
                    user_id = %user_id,
                    market_id = %market_id,
                    option = %bet.option,
                    amount = %bet.amount,
                    "Bet placed"
                );
                Ok(bet)
            }
            Err(e) => {
                if let Some(reason) = e.as_domain() {
                    debug!(
                        user_id = %user_id,
                        market_id = %market_id,
                        option,
                        amount = %amount,
                        error = %reason,
                        "Bet rejected"
                    );
                } else {
                    warn!(
                        user_id = %user_id,
                        market_id = %market_id,
                        error = %e,
                        "Bet placement failed"
                    );
                }
                Err(e)
            }
        }
    }
}
