//! Bet authorization rules.
//!
//! Store adapters call [`authorize`] while holding their write lock, after
//! loading the market and user rows, so the checks and the debit that
//! follows observe the same ledger state.

use rust_decimal::Decimal;

use super::bet::{BetOption, Wager};
use super::error::DomainError;
use super::market::Market;
use super::money::{validate_stake, Amount};
use super::user::User;

/// Outcome of a successful authorization: what to record and what to debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    /// Resolved option token.
    pub option: BetOption,
    /// Stake to record and debit.
    pub amount: Amount,
    /// User balance once the debit is applied.
    pub balance_after: Amount,
}

/// Run the bet placement checks in order.
///
/// 1. stake is positive
/// 2. market exists and is active
/// 3. option is legal for the market type
/// 4. user exists and balance covers the stake
///
/// # Errors
/// Returns the [`DomainError`] of the first failing check.
pub fn authorize(
    wager: &Wager,
    market: Option<&Market>,
    user: Option<&User>,
) -> Result<Authorization, DomainError> {
    let amount = validate_stake(wager.amount)?;

    let market = market
        .filter(|m| m.is_active())
        .ok_or(DomainError::MarketNotActive {
            market_id: wager.market_id,
        })?;

    let option = market.accepts(&wager.option)?;

    let user = user.ok_or(DomainError::UserNotFound {
        user_id: wager.user_id,
    })?;

    if user.balance < amount {
        return Err(DomainError::InsufficientBalance {
            balance: user.balance,
            amount,
        });
    }

    let balance_after = user.balance - amount;
    debug_assert!(balance_after >= Decimal::ZERO);

    Ok(Authorization {
        option,
        amount,
        balance_after,
    })
}
