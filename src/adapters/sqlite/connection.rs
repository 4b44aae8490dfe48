//! Connection pools for the index database.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::domain::models::DatabaseConfig;

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Failed to open database: {0}")]
    Open(#[source] sqlx::Error),
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to create database directory: {0}")]
    CreateDirectory(#[source] std::io::Error),
}

/// Open the file-backed pool described by `config`, creating the file and its
/// parent directory when missing.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, ConnectionError> {
    let url = config.url();
    ensure_database_directory(&url)?;

    let options = SqliteConnectOptions::from_str(&url)
        .map_err(|_| ConnectionError::InvalidUrl(url.clone()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(ConnectionError::Open)
}

/// Single-connection in-memory pool. The connection is never recycled, so the
/// database lives as long as the pool.
pub async fn create_test_pool() -> Result<SqlitePool, ConnectionError> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|_| ConnectionError::InvalidUrl("sqlite::memory:".to_string()))?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await
        .map_err(ConnectionError::Open)
}

fn ensure_database_directory(database_url: &str) -> Result<(), ConnectionError> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(ConnectionError::CreateDirectory)?;
        }
    }
    Ok(())
}
