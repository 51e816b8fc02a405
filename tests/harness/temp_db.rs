use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wagerbook::adapter::outbound::sqlite::database::connection::{
    create_pool, enable_wal, run_migrations, DbPool,
};
use wagerbook::adapter::outbound::sqlite::SqliteLedger;

/// Temporary file-backed SQLite database for integration tests.
///
/// The directory, database and WAL files are removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("wagerbook-{name}-"))
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("ledger.db");

        let url = path.display().to_string();
        let pool = create_pool(&url).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        enable_wal(&pool, &url).expect("enable WAL mode");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn store(&self) -> SqliteLedger {
        SqliteLedger::new(self.pool.clone())
    }
}
