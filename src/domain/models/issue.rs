use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::change_set::RepositoryRef;

/// An open issue belonging to exactly one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub repository_id: i64,
    /// Source-side issue number, unique only within its repository.
    pub issue_number: i64,
    pub title: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}

/// An issue staged for insertion, linked to a persisted or staged repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub repository: RepositoryRef,
    pub issue_number: i64,
    pub title: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewIssue {
    pub fn from_raw(repository: RepositoryRef, raw: RawIssue) -> Self {
        Self {
            repository,
            issue_number: raw.issue_number,
            title: raw.title,
            html_url: raw.html_url,
            created_at: raw.created_at,
        }
    }
}

/// An issue as produced by a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIssue {
    pub issue_number: i64,
    pub title: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
}
