//! Volume and position statistics for a market.

use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::Bet;
use super::id::UserId;
use super::money::{checked_sum, Amount};

/// Aggregate figures for a single market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarketStats {
    /// Sum of all bet amounts.
    pub total_volume: Amount,
    /// Number of bet rows.
    pub total_bets: u64,
    /// Sum of the requesting user's bet amounts (zero when anonymous).
    pub user_position: Amount,
}

impl MarketStats {
    /// Compute stats from a market's bet rows.
    ///
    /// Returns `None` if a total overflows.
    #[must_use]
    pub fn from_bets(bets: &[Bet], viewer: Option<UserId>) -> Option<Self> {
        let total_volume = checked_sum(bets.iter().map(|bet| bet.amount))?;
        let user_position = match viewer {
            Some(user_id) => checked_sum(
                bets.iter()
                    .filter(|bet| bet.user_id == user_id)
                    .map(|bet| bet.amount),
            )?,
            None => Decimal::ZERO,
        };

        Some(Self {
            total_volume,
            total_bets: bets.len() as u64,
            user_position,
        })
    }
}
