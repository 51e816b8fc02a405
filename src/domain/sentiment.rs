//! Market sentiment: the percentage split of wagered money across options.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::bet::{Bet, BetOption};
use super::market::MarketType;
use super::money::checked_sum;

/// Percentage of the market's total stake on one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionShare {
    pub option: BetOption,
    /// Percentage rounded to one decimal place.
    pub percent: Decimal,
}

/// Sentiment for a market, one share per legal option.
///
/// Each share is rounded independently (half to even), so the two
/// percentages are not normalized to add up to exactly 100.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sentiment {
    shares: [OptionShare; 2],
}

impl Sentiment {
    /// The 50/50 split shown before any money is wagered.
    #[must_use]
    pub fn neutral(market_type: MarketType) -> Self {
        let fifty = Decimal::new(500, 1);
        let [first, second] = market_type.legal_options();
        Self {
            shares: [
                OptionShare {
                    option: first,
                    percent: fifty,
                },
                OptionShare {
                    option: second,
                    percent: fifty,
                },
            ],
        }
    }

    /// Compute sentiment from a market's bet rows.
    ///
    /// Amounts are summed per option; the grand total covers every group.
    /// With no bets, or a zero grand total, the split is neutral. Returns
    /// `None` if a total overflows.
    ///
    /// Shares are computed in exact decimal arithmetic and rounded half to
    /// even, so a true tie such as 28.75 rounds to 28.8.
    #[must_use]
    pub fn from_bets(market_type: MarketType, bets: &[Bet]) -> Option<Self> {
        let mut totals: BTreeMap<BetOption, Decimal> = BTreeMap::new();
        for bet in bets {
            let total = totals.entry(bet.option).or_default();
            *total = total.checked_add(bet.amount)?;
        }

        let grand_total = checked_sum(totals.values().copied())?;
        if grand_total.is_zero() {
            return Some(Self::neutral(market_type));
        }

        let [first, second] = market_type.legal_options().map(|option| {
            let total = totals.get(&option).copied().unwrap_or_default();
            total
                .checked_div(grand_total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|percent| OptionShare {
                    option,
                    percent: percent.round_dp(1),
                })
        });
        Some(Self {
            shares: [first?, second?],
        })
    }

    /// Both shares, in the market type's option order.
    #[must_use]
    pub const fn shares(&self) -> &[OptionShare; 2] {
        &self.shares
    }

    /// Percentage for a given option, if it belongs to this market.
    #[must_use]
    pub fn percent(&self, option: BetOption) -> Option<Decimal> {
        self.shares
            .iter()
            .find(|share| share.option == option)
            .map(|share| share.percent)
    }
}
