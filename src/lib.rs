//! Repodex - GitHub repository and open-issue indexer
//!
//! Fetches repositories matching a keyword from the GitHub REST API (or a
//! pair of CSV files), reconciles them into SQLite, and serves read-only list
//! and detail pages.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, the staged change set, errors and ports
//! - **Adapters** (`adapters`): GitHub client, CSV loader, SQLite store, web views
//! - **Service Layer** (`services`): the reconciliation engine
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use repodex::adapters::github::{GitHubClient, GitHubClientConfig};
//! use repodex::adapters::sqlite::create_test_store;
//! use repodex::services::{Reconciler, SyncSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(create_test_store().await?);
//!     let client = GitHubClient::new(GitHubClientConfig::default());
//!     let report = Reconciler::new(store)
//!         .sync(SyncSource::Remote(Arc::new(client)))
//!         .await?;
//!     println!("Sync complete: {report}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigurationError, FetchError, ParseError, StoreError, SyncError};
pub use domain::models::{ChangeSet, Config, Issue, Repository};
pub use domain::ports::{RecordStore, RepositoryOrder, RepositorySource};
pub use infrastructure::config::ConfigLoader;
pub use services::{Reconciler, SyncReport, SyncSource};
