//! Domain layer for the repodex indexer
//!
//! Core models, the staged change set, errors, and the port traits that the
//! adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ConfigurationError, FetchError, ParseError, StoreError, SyncError};
