//! Store initialization
//!
//! The pool is created lazily: no connection is attempted at startup, so a
//! configured but unreachable store still produces a handle and the gateway
//! starts anyway. Connection failures surface later, per operation.

use crate::db::SqliteStore;
use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Default logical store name when `DATABASE_NAME` is not set
pub const DEFAULT_STORE_NAME: &str = "pashu";

/// Build a store handle from a `sqlite://` URL
///
/// `timeout` bounds how long a store operation waits for a connection
/// (and for SQLite locks).
pub fn open_store(database_url: &str, database_name: Option<&str>, timeout: Duration) -> Result<SqliteStore> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| Error::Config(format!("Invalid DATABASE_URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(timeout)
        .connect_lazy_with(options);

    let name = database_name.unwrap_or(DEFAULT_STORE_NAME);
    info!("Backing store configured: {} (lazy connect)", name);

    Ok(SqliteStore::new(pool, name))
}
