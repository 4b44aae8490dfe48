//! Row shapes of the two CSV files. Headers are matched by name.

use serde::Deserialize;

use crate::adapters::datetime::parse_datetime;
use crate::domain::models::{RawIssue, RawRepository};

pub const REPOSITORY_COLUMNS: [&str; 6] = [
    "FullName",
    "Description",
    "HtmlUrl",
    "Stars",
    "ContributorsCount",
    "OpenIssuesCount",
];

pub const ISSUE_COLUMNS: [&str; 5] = ["RepositoryId", "IssueNumber", "Title", "HtmlUrl", "CreatedAt"];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CsvRepositoryRow {
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    pub html_url: String,
    pub stars: i64,
    pub contributors_count: i64,
    pub open_issues_count: i64,
}

impl From<CsvRepositoryRow> for RawRepository {
    fn from(row: CsvRepositoryRow) -> Self {
        let description = Some(row.description).filter(|d| !d.trim().is_empty());
        Self {
            full_name: row.full_name,
            description,
            html_url: row.html_url,
            stars: row.stars,
            open_issues_count: row.open_issues_count,
            contributors_count: Some(row.contributors_count),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CsvIssueRow {
    pub repository_id: i64,
    pub issue_number: i64,
    pub title: String,
    pub html_url: String,
    pub created_at: String,
}

impl CsvIssueRow {
    /// Convert into a raw issue, reporting an unparseable `CreatedAt` as the
    /// error message.
    pub fn into_raw(self) -> Result<(i64, RawIssue), String> {
        let created_at = parse_datetime(&self.created_at)
            .map_err(|e| format!("CreatedAt '{}' is not a timestamp: {e}", self.created_at))?;

        Ok((
            self.repository_id,
            RawIssue {
                issue_number: self.issue_number,
                title: self.title,
                html_url: self.html_url,
                created_at,
            },
        ))
    }
}
