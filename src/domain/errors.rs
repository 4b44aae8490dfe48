//! Domain errors for the repodex indexer.

use std::path::PathBuf;

use thiserror::Error;

/// A remote fetch failed. Aborts the whole remote sync.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Malformed input from the file-based source.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid row at {}:{line}: {reason}", path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

/// Persistence failure. Prior committed state is left intact.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Staged reference {0} does not point at a staged repository")]
    DanglingReference(usize),
}

/// Configuration problems.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("No GitHub token configured; requests will be unauthenticated")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failure of a whole sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type SyncResult<T> = Result<T, SyncError>;
