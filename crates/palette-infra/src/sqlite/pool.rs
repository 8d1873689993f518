//! SQLite connection pools.
//!
//! One writer connection serializes every INSERT; a small reader pool serves
//! the notes and registry queries. WAL lets readers proceed while the writer
//! holds a transaction. Foreign keys are on for both pools, so a session or
//! note can only reference an existing child and therapist.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Readers opened alongside the single writer.
const READER_CONNECTIONS: u32 = 8;

/// Reader and writer pools over the same database file.
#[derive(Clone)]
pub struct DatabasePool {
    /// Read-only connections for SELECT queries.
    pub reader: SqlitePool,
    /// The only connection allowed to write.
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools for `database_url` and apply pending migrations.
    ///
    /// The schema is migrated through the writer before any reader connects.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        tracing::debug!(url = database_url, "database pool ready");
        Ok(Self { reader, writer })
    }
}

/// Database URL for `{data_dir}/palette.db`, created on first use.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("palette.db").display())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DatabasePool {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    // Leak tempdir so it lives for the test
    std::mem::forget(dir);
    DatabasePool::new(&url).await.unwrap()
}
