//! GitHub REST API response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are used
//! internally by the GitHub adapter and are converted to the domain's raw
//! records before leaving it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::{RawIssue, RawRepository};

/// Response body of `GET /search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<GitHubRepository>,
}

/// A repository item from the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    /// `owner/name`
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub open_issues_count: i64,
}

impl From<GitHubRepository> for RawRepository {
    fn from(repo: GitHubRepository) -> Self {
        Self {
            full_name: repo.full_name,
            description: repo.description,
            html_url: repo.html_url,
            stars: repo.stargazers_count,
            open_issues_count: repo.open_issues_count,
            contributors_count: None,
        }
    }
}

/// An issue returned by `GET /repos/{owner}/{repo}/issues`.
///
/// Issues and pull requests share the endpoint. Pull requests carry a
/// non-null `pull_request` field.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub number: i64,
    pub title: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
}

impl GitHubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl From<GitHubIssue> for RawIssue {
    fn from(issue: GitHubIssue) -> Self {
        Self {
            issue_number: issue.number,
            title: issue.title,
            html_url: issue.html_url,
            created_at: issue.created_at,
        }
    }
}

/// Reference object present on pull requests (absent on plain issues).
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPullRequestRef {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "id": 1296269,
                    "full_name": "octocat/Hello-World",
                    "description": "This your first repo!",
                    "html_url": "https://github.com/octocat/Hello-World",
                    "stargazers_count": 80,
                    "open_issues_count": 2
                },
                {
                    "id": 2,
                    "full_name": "octocat/json-tools",
                    "description": null,
                    "html_url": "https://github.com/octocat/json-tools",
                    "stargazers_count": 3,
                    "open_issues_count": 0
                }
            ]
        }"#;

        let response: GitHubSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_count, 2);
        assert_eq!(response.items.len(), 2);

        let raw: RawRepository = response.items[0].clone().into();
        assert_eq!(raw.full_name, "octocat/Hello-World");
        assert_eq!(raw.stars, 80);
        assert_eq!(raw.open_issues_count, 2);
        assert_eq!(raw.contributors_count, None);
        assert!(response.items[1].description.is_none());
    }

    #[test]
    fn test_issue_deserialization() {
        let json = r#"{
            "id": 1,
            "number": 1347,
            "title": "Found a bug",
            "state": "open",
            "html_url": "https://github.com/octocat/Hello-World/issues/1347",
            "created_at": "2011-04-22T13:33:48Z",
            "pull_request": null
        }"#;

        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert!(!issue.is_pull_request());

        let raw: RawIssue = issue.into();
        assert_eq!(raw.issue_number, 1347);
        assert_eq!(raw.created_at.to_rfc3339(), "2011-04-22T13:33:48+00:00");
    }

    #[test]
    fn test_pr_detection_via_pull_request_field() {
        let json = r#"{
            "number": 99,
            "title": "Add feature X",
            "html_url": "https://github.com/org/repo/pull/99",
            "created_at": "2024-01-15T09:00:00Z",
            "pull_request": { "url": "https://api.github.com/repos/org/repo/pulls/99" }
        }"#;

        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert!(issue.is_pull_request());
    }
}
