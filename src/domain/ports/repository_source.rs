//! Data source port for repository and issue records.
//!
//! The reconciler depends on this trait only; the GitHub client is the
//! production adapter and tests plug in scripted sources.
use async_trait::async_trait;

use crate::domain::errors::FetchError;
use crate::domain::models::{RawIssue, RawRepository};

#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Fetch up to `max_results` repositories matching `keyword`, in source
    /// order.
    ///
    /// # Errors
    /// Returns `FetchError` when any page request does not succeed. There is
    /// no retry.
    async fn fetch_repositories(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<RawRepository>, FetchError>;

    /// Approximate number of contributors. Returns 0 on any failure.
    async fn fetch_contributors_count(&self, owner: &str, repo_name: &str) -> i64;

    /// At most `limit` open issues, newest first. Empty on any failure.
    async fn fetch_recent_open_issues(
        &self,
        owner: &str,
        repo_name: &str,
        limit: usize,
    ) -> Vec<RawIssue>;

    /// Whether the reconciler should call the per-repository enrichment
    /// operations.
    fn supports_enrichment(&self) -> bool {
        true
    }
}
