//! SQLite database adapters for the repodex indexer.

pub mod connection;
pub mod record_store;
pub mod schema;

pub use connection::{create_pool, create_test_pool, ConnectionError};
pub use record_store::SqliteRecordStore;

use crate::domain::errors::StoreError;
use crate::domain::models::DatabaseConfig;
use crate::domain::ports::RecordStore;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Schema error: {0}")]
    Schema(#[from] StoreError),
}

/// Open the configured database and make sure its tables exist.
pub async fn initialize_store(config: &DatabaseConfig) -> Result<SqliteRecordStore, DatabaseError> {
    let store = SqliteRecordStore::new(create_pool(config).await?);
    store.ensure_schema().await?;
    Ok(store)
}

/// In-memory store with the schema applied.
pub async fn create_test_store() -> Result<SqliteRecordStore, DatabaseError> {
    let store = SqliteRecordStore::new(create_test_pool().await?);
    store.ensure_schema().await?;
    Ok(store)
}
