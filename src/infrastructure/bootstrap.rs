//! Composition root: wires configuration into a ready ledger.

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool_with, enable_wal, run_migrations,
};
use crate::adapter::outbound::sqlite::SqliteLedger;
use crate::application::Ledger;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open the configured SQLite database and build a ledger over it.
///
/// Creates the pool, applies pending migrations, switches file databases to
/// WAL, and seeds the starter markets when `ledger.seed_markets` is set.
///
/// # Errors
///
/// Returns a connection error if the pool cannot be built, or a storage
/// error if migrations or seeding fail.
pub async fn bootstrap(config: &Config) -> Result<Ledger<SqliteLedger>> {
    let db = &config.database;
    let pool = create_pool_with(&db.url, db.pool_size, db.busy_timeout_ms)?;
    run_migrations(&pool)?;
    enable_wal(&pool, &db.url)?;
    info!(url = %db.url, pool_size = db.pool_size, "Ledger database ready");

    let ledger =
        Ledger::with_starting_balance(SqliteLedger::new(pool), config.ledger.starting_balance);

    if config.ledger.seed_markets {
        ledger.seed_defaults().await?;
    }

    Ok(ledger)
}
