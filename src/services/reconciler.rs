//! Reconciliation of fetched repository data with the record store.
//!
//! A remote sync upserts repositories by `full_name` and replaces each
//! repository's issues with the freshly fetched set, committing everything
//! in one change set. A file sync wipes the store and reloads it from CSV.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::adapters::csv::{load_dataset, CsvPaths};
use crate::domain::errors::SyncResult;
use crate::domain::models::{
    split_full_name, ChangeSet, GitHubConfig, NewIssue, NewRepository, Repository, RepositoryRef,
};
use crate::domain::ports::{RecordStore, RepositoryOrder, RepositorySource};

/// Where a sync reads its data from.
#[derive(Clone)]
pub enum SyncSource {
    /// Upsert from a fetch-interface source.
    Remote(Arc<dyn RepositorySource>),
    /// Destructive reload from the two CSV files.
    File(CsvPaths),
}

impl fmt::Debug for SyncSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(_) => f.write_str("Remote(..)"),
            Self::File(paths) => f.debug_tuple("File").field(paths).finish(),
        }
    }
}

/// Parameters of a remote sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerOptions {
    /// Search keyword matched against repository names.
    pub keyword: String,
    /// Upper bound on repositories fetched per sync.
    pub max_results: usize,
    /// Open issues kept per repository.
    pub issues_limit: usize,
}

impl Default for ReconcilerOptions {
    fn default() -> Self {
        Self::from(&GitHubConfig::default())
    }
}

impl From<&GitHubConfig> for ReconcilerOptions {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            keyword: config.keyword.clone(),
            max_results: config.max_results,
            issues_limit: config.issues_limit,
        }
    }
}

/// Counts describing one completed sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    /// Records dropped before staging (malformed name, duplicate or bad row).
    pub skipped: usize,
    /// Repositories removed by a file reload.
    pub removed: usize,
    pub issues_written: usize,
    pub issues_skipped: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} repositories fetched ({} inserted, {} updated, {} skipped",
            self.fetched, self.inserted, self.updated, self.skipped
        )?;
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        write!(f, "), {} issues written", self.issues_written)?;
        if self.issues_skipped > 0 {
            write!(f, ", {} issues skipped", self.issues_skipped)?;
        }
        Ok(())
    }
}

/// Match for a fetched record: a repository staged earlier in this pass, or
/// a stored row.
enum Existing {
    Staged(usize),
    Stored(Repository),
}

pub struct Reconciler<S: RecordStore> {
    store: Arc<S>,
    options: ReconcilerOptions,
}

impl<S: RecordStore> Reconciler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            options: ReconcilerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReconcilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ReconcilerOptions {
        &self.options
    }

    /// Run one sync against `source`.
    ///
    /// # Errors
    /// `SyncError::Fetch` when the repository fetch fails (nothing is
    /// written), `SyncError::Parse` when a CSV file is unusable, and
    /// `SyncError::Store` when a commit fails (that commit is rolled back).
    pub async fn sync(&self, source: SyncSource) -> SyncResult<SyncReport> {
        match source {
            SyncSource::Remote(source) => self.sync_remote(source.as_ref()).await,
            SyncSource::File(paths) => self.reload_from_files(&paths).await,
        }
    }

    /// Upsert repositories from `source` and replace their issues.
    pub async fn sync_remote(&self, source: &dyn RepositorySource) -> SyncResult<SyncReport> {
        let fetched = source
            .fetch_repositories(&self.options.keyword, self.options.max_results)
            .await?;

        let mut report = SyncReport {
            fetched: fetched.len(),
            ..SyncReport::default()
        };
        let enrich = source.supports_enrichment();
        let mut changes = ChangeSet::new();

        for raw in &fetched {
            let Some((owner, name)) = split_full_name(&raw.full_name) else {
                tracing::warn!(full_name = %raw.full_name, "Skipping repository with malformed name");
                report.skipped += 1;
                continue;
            };

            let existing = match changes.staged_insert_for(&raw.full_name) {
                Some(RepositoryRef::Staged(index)) => Some(Existing::Staged(index)),
                _ => self
                    .store
                    .find_repository_by_full_name(&raw.full_name)
                    .await?
                    .map(Existing::Stored),
            };

            let contributors = if enrich {
                Some(source.fetch_contributors_count(owner, name).await)
            } else {
                None
            };

            let target = match existing {
                Some(Existing::Stored(mut repository)) => {
                    repository.apply(raw);
                    if let Some(count) = contributors {
                        repository.contributors_count = count;
                    }
                    let id = repository.id;
                    changes.stage_update_repository(repository);
                    RepositoryRef::Persisted(id)
                }
                Some(Existing::Staged(index)) => {
                    tracing::warn!(full_name = %raw.full_name, "Repository fetched twice; keeping the later record");
                    if let Some(pending) = changes.staged_insert_mut(index) {
                        pending.apply(raw);
                        if let Some(count) = contributors {
                            pending.contributors_count = count;
                        }
                    }
                    RepositoryRef::Staged(index)
                }
                None => {
                    let mut repository = NewRepository::from(raw);
                    if let Some(count) = contributors {
                        repository.contributors_count = count;
                    }
                    changes.stage_insert_repository(repository)
                }
            };

            let issues = source
                .fetch_recent_open_issues(owner, name, self.options.issues_limit)
                .await;

            if let RepositoryRef::Persisted(id) = target {
                for stale in self.store.find_issues_by_repository_id(id).await? {
                    changes.stage_delete_issue(stale);
                }
            }
            changes.discard_issue_inserts(target);

            tracing::debug!(
                full_name = %raw.full_name,
                issues = issues.len(),
                "Staged repository"
            );

            for issue in issues {
                changes.stage_insert_issue(NewIssue::from_raw(target, issue));
            }
        }

        let summary = self.store.commit(changes).await?;

        report.inserted = summary.repositories_inserted();
        report.updated = summary.repositories_updated;
        report.issues_written = summary.issues_inserted;

        tracing::info!(
            fetched = report.fetched,
            inserted = report.inserted,
            updated = report.updated,
            skipped = report.skipped,
            issues_written = report.issues_written,
            issues_removed = summary.issues_deleted,
            "Remote sync complete"
        );

        Ok(report)
    }

    /// Wipe the store and reload it from the CSV files.
    ///
    /// Runs three commits: the wipe, the repository inserts, then the issue
    /// inserts. Issue rows whose `RepositoryId` does not resolve to a stored
    /// repository are skipped.
    pub async fn reload_from_files(&self, paths: &CsvPaths) -> SyncResult<SyncReport> {
        let dataset = load_dataset(paths)?;

        let mut report = SyncReport {
            fetched: dataset.repositories.len(),
            skipped: dataset.skipped_repository_rows,
            issues_skipped: dataset.skipped_issue_rows,
            ..SyncReport::default()
        };

        let mut wipe = ChangeSet::new();
        for repository in self.store.list_repositories(RepositoryOrder::Insertion).await? {
            wipe.stage_delete_repository(repository);
        }
        report.removed = self.store.commit(wipe).await?.repositories_deleted;

        let mut inserts = ChangeSet::new();
        for raw in &dataset.repositories {
            if inserts.staged_insert_for(&raw.full_name).is_some() {
                tracing::warn!(full_name = %raw.full_name, "Skipping duplicate repository row");
                report.skipped += 1;
                continue;
            }
            inserts.stage_insert_repository(NewRepository::from(raw));
        }
        report.inserted = self.store.commit(inserts).await?.repositories_inserted();

        let mut issues = ChangeSet::new();
        for row in dataset.issues {
            match self.store.find_repository_by_id(row.repository_id).await? {
                Some(repository) => {
                    issues.stage_insert_issue(NewIssue::from_raw(
                        RepositoryRef::Persisted(repository.id),
                        row.issue,
                    ));
                }
                None => {
                    tracing::warn!(
                        repository_id = row.repository_id,
                        issue_number = row.issue.issue_number,
                        "Skipping issue row for unknown repository"
                    );
                    report.issues_skipped += 1;
                }
            }
        }
        report.issues_written = self.store.commit(issues).await?.issues_inserted;

        tracing::info!(
            removed = report.removed,
            inserted = report.inserted,
            skipped = report.skipped,
            issues_written = report.issues_written,
            issues_skipped = report.issues_skipped,
            "File reload complete"
        );

        Ok(report)
    }
}
