//! Record store port (trait) for dependency injection.
//!
//! Defines the persistence contract the reconciler and the web views depend
//! on. Writes only happen through [`RecordStore::commit`].
use async_trait::async_trait;

use crate::domain::errors::StoreResult;
use crate::domain::models::{ChangeSet, CommitSummary, Issue, Repository};

/// Ordering for repository listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepositoryOrder {
    /// Order rows were inserted in.
    #[default]
    Insertion,
    /// Most starred first.
    StarsDesc,
}

impl RepositoryOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::StarsDesc => "stars",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Some(Self::Insertion),
            "stars" => Some(Self::StarsDesc),
            _ => None,
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create tables and indexes if they are absent. Never migrates.
    async fn ensure_schema(&self) -> StoreResult<()>;

    async fn find_repository_by_full_name(&self, full_name: &str)
        -> StoreResult<Option<Repository>>;

    async fn find_repository_by_id(&self, id: i64) -> StoreResult<Option<Repository>>;

    /// Issues linked to a repository, newest first.
    async fn find_issues_by_repository_id(&self, repository_id: i64) -> StoreResult<Vec<Issue>>;

    async fn list_repositories(&self, order: RepositoryOrder) -> StoreResult<Vec<Repository>>;

    /// Apply every staged change atomically.
    ///
    /// # Errors
    /// Returns `StoreError` if any statement fails; nothing from the change
    /// set is persisted in that case.
    async fn commit(&self, changes: ChangeSet) -> StoreResult<CommitSummary>;
}
