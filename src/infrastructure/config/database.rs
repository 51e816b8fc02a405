//! Ledger database configuration.

use serde::Deserialize;

use crate::adapter::outbound::sqlite::database::connection::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_POOL_SIZE,
};

/// SQLite connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`.
    ///
    /// Overridden by the `DATABASE_URL` environment variable.
    pub url: String,
    /// Maximum pooled connections. In-memory databases always use one.
    pub pool_size: u32,
    /// How long a writer waits for the database lock, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "wagerbook.db".into(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
