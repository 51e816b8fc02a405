//! Monetary types for balances and stakes.
//!
//! All ledger arithmetic is done on [`Decimal`] so that debits are exact;
//! floats only appear at the boundary with callers that hand us `f64`.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::DomainError;

/// Play-money amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Balance granted to every newly registered user.
pub const STARTING_BALANCE: Amount = Decimal::ONE_THOUSAND;

/// Largest starting balance a ledger may be configured with.
pub const MAX_STARTING_BALANCE: Amount = dec!(1000000000000);

/// Sum amounts, returning `None` if the total leaves `Decimal`'s range.
#[must_use]
pub fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Option<Amount> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Check that a stake is strictly positive.
///
/// # Errors
/// Returns [`DomainError::InvalidBetAmount`] for zero or negative amounts.
pub fn validate_stake(amount: Amount) -> Result<Amount, DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::InvalidBetAmount {
            amount: amount.to_string(),
        });
    }
    Ok(amount)
}

/// Parse a stake from user input such as a form field.
///
/// # Errors
/// Returns [`DomainError::InvalidBetAmount`] if the text is not a decimal
/// number or the amount is not positive.
pub fn parse_stake(input: &str) -> Result<Amount, DomainError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed).map_err(|_| DomainError::InvalidBetAmount {
        amount: trimmed.to_string(),
    })?;
    validate_stake(amount)
}

/// Convert a float stake, rejecting NaN and infinities.
///
/// # Errors
/// Returns [`DomainError::InvalidBetAmount`] for non-finite or non-positive values.
pub fn stake_from_f64(value: f64) -> Result<Amount, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidBetAmount {
            amount: value.to_string(),
        });
    }
    let amount = Decimal::from_f64(value).ok_or_else(|| DomainError::InvalidBetAmount {
        amount: value.to_string(),
    })?;
    validate_stake(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn checked_sum_adds_exactly() {
        assert_eq!(checked_sum([dec!(0.1), dec!(0.2)]), Some(dec!(0.3)));
        assert_eq!(checked_sum(std::iter::empty()), Some(Decimal::ZERO));
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(checked_sum([Decimal::MAX, Decimal::MAX]), None);
    }

    #[test]
    fn starting_balance_is_one_thousand() {
        assert_eq!(STARTING_BALANCE, dec!(1000.0));
    }

    #[test]
    fn validate_stake_rejects_zero_and_negative() {
        assert!(validate_stake(dec!(0)).is_err());
        assert!(validate_stake(dec!(-5.00)).is_err());
        assert_eq!(validate_stake(dec!(0.01)).unwrap(), dec!(0.01));
    }

    #[test]
    fn parse_stake_trims_and_parses() {
        assert_eq!(parse_stake(" 250.50 ").unwrap(), dec!(250.50));
    }

    #[test]
    fn parse_stake_rejects_garbage() {
        let err = parse_stake("ten dollars").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidBetAmount {
                amount: "ten dollars".into()
            }
        );
    }

    #[test]
    fn stake_from_f64_rejects_non_finite() {
        assert!(stake_from_f64(f64::NAN).is_err());
        assert!(stake_from_f64(f64::INFINITY).is_err());
        assert!(stake_from_f64(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn stake_from_f64_accepts_positive() {
        assert_eq!(stake_from_f64(12.5).unwrap(), dec!(12.5));
    }
}
