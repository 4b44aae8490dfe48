//! Staging area for pending store writes.
//!
//! The reconciler records every insert, update and delete here and hands the
//! whole set to [`RecordStore::commit`](crate::domain::ports::RecordStore::commit),
//! which applies it in a single transaction.

use super::issue::{Issue, NewIssue};
use super::repository::{NewRepository, Repository};

/// Points at a repository that either already has a row or is staged in the
/// same change set and will receive its id on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryRef {
    Persisted(i64),
    Staged(usize),
}

#[derive(Debug, Default)]
pub struct ChangeSet {
    repository_inserts: Vec<NewRepository>,
    repository_updates: Vec<Repository>,
    repository_deletes: Vec<Repository>,
    issue_inserts: Vec<NewIssue>,
    issue_deletes: Vec<Issue>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_insert_repository(&mut self, repository: NewRepository) -> RepositoryRef {
        self.repository_inserts.push(repository);
        RepositoryRef::Staged(self.repository_inserts.len() - 1)
    }

    /// Stage an in-place update. A later update of the same row replaces the
    /// earlier one.
    pub fn stage_update_repository(&mut self, repository: Repository) {
        if let Some(existing) = self
            .repository_updates
            .iter_mut()
            .find(|r| r.id == repository.id)
        {
            *existing = repository;
        } else {
            self.repository_updates.push(repository);
        }
    }

    /// Stage deletion of a repository and, on commit, all of its issues.
    pub fn stage_delete_repository(&mut self, repository: Repository) {
        if !self.repository_deletes.iter().any(|r| r.id == repository.id) {
            self.repository_deletes.push(repository);
        }
    }

    pub fn stage_insert_issue(&mut self, issue: NewIssue) {
        self.issue_inserts.push(issue);
    }

    pub fn stage_delete_issue(&mut self, issue: Issue) {
        if !self.issue_deletes.iter().any(|i| i.id == issue.id) {
            self.issue_deletes.push(issue);
        }
    }

    /// Find a repository already staged for insertion by its natural key.
    pub fn staged_insert_for(&self, full_name: &str) -> Option<RepositoryRef> {
        self.repository_inserts
            .iter()
            .position(|r| r.full_name == full_name)
            .map(RepositoryRef::Staged)
    }

    pub fn staged_insert_mut(&mut self, index: usize) -> Option<&mut NewRepository> {
        self.repository_inserts.get_mut(index)
    }

    /// Drop every issue insert staged for `repository`. Returns how many were
    /// dropped.
    pub fn discard_issue_inserts(&mut self, repository: RepositoryRef) -> usize {
        let before = self.issue_inserts.len();
        self.issue_inserts.retain(|i| i.repository != repository);
        before - self.issue_inserts.len()
    }

    pub fn repository_inserts(&self) -> &[NewRepository] {
        &self.repository_inserts
    }

    pub fn repository_updates(&self) -> &[Repository] {
        &self.repository_updates
    }

    pub fn repository_deletes(&self) -> &[Repository] {
        &self.repository_deletes
    }

    pub fn issue_inserts(&self) -> &[NewIssue] {
        &self.issue_inserts
    }

    pub fn issue_deletes(&self) -> &[Issue] {
        &self.issue_deletes
    }

    pub fn len(&self) -> usize {
        self.repository_inserts.len()
            + self.repository_updates.len()
            + self.repository_deletes.len()
            + self.issue_inserts.len()
            + self.issue_deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Ids assigned to staged repository inserts, indexed like the inserts.
    pub inserted_repository_ids: Vec<i64>,
    pub repositories_updated: usize,
    pub repositories_deleted: usize,
    pub issues_inserted: usize,
    pub issues_deleted: usize,
}

impl CommitSummary {
    pub fn repositories_inserted(&self) -> usize {
        self.inserted_repository_ids.len()
    }
}
