//! Bets and bet requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BetId, MarketId, UserId};
use super::money::Amount;

/// Option token a bet is placed on.
///
/// Binary markets take `option_a`/`option_b`; over/under markets take
/// `over`/`under`. See [`MarketType::legal_options`](super::market::MarketType::legal_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetOption {
    OptionA,
    OptionB,
    Over,
    Under,
}

impl BetOption {
    /// Storage token for this option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OptionA => "option_a",
            Self::OptionB => "option_b",
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl fmt::Display for BetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "option_a" => Ok(Self::OptionA),
            "option_b" => Ok(Self::OptionB),
            "over" => Ok(Self::Over),
            "under" => Ok(Self::Under),
            other => Err(format!("unknown bet option '{other}'")),
        }
    }
}

/// A recorded bet. Immutable once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub user_id: UserId,
    pub market_id: MarketId,
    pub option: BetOption,
    pub amount: Amount,
    pub placed_at: DateTime<Utc>,
}

/// A request to place a bet, as received from a caller.
///
/// The option is kept as the raw token so it can be checked against the
/// market's type inside the same transaction that debits the balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Wager {
    pub user_id: UserId,
    pub market_id: MarketId,
    pub option: String,
    pub amount: Amount,
}

impl Wager {
    /// Create a new bet request.
    pub fn new(
        user_id: UserId,
        market_id: MarketId,
        option: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            user_id,
            market_id,
            option: option.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_tokens_roundtrip() {
        for option in [
            BetOption::OptionA,
            BetOption::OptionB,
            BetOption::Over,
            BetOption::Under,
        ] {
            assert_eq!(option.as_str().parse::<BetOption>(), Ok(option));
        }
    }

    #[test]
    fn option_rejects_labels() {
        assert!("NVidia".parse::<BetOption>().is_err());
        assert!("OVER".parse::<BetOption>().is_err());
    }
}
