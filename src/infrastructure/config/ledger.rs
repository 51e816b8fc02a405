//! Ledger policy configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::money::STARTING_BALANCE;

/// Ledger-wide settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Balance granted to each new user.
    pub starting_balance: Decimal,
    /// Insert the starter markets into an empty ledger at startup.
    pub seed_markets: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            seed_markets: true,
        }
    }
}
