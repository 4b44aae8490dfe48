//! Common test utilities for integration tests
//!
//! Scripted data sources, store setup and fixture builders shared by the
//! integration test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use repodex::adapters::sqlite::{create_test_store, SqliteRecordStore};
use repodex::domain::models::{RawIssue, RawRepository};
use repodex::domain::ports::RepositorySource;
use repodex::FetchError;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory store with the schema applied.
pub async fn test_store() -> Arc<SqliteRecordStore> {
    Arc::new(
        create_test_store()
            .await
            .expect("Failed to create test store"),
    )
}

pub fn raw_repo(full_name: &str, stars: i64) -> RawRepository {
    RawRepository {
        full_name: full_name.to_string(),
        description: Some(format!("{full_name} description")),
        html_url: format!("https://github.com/{full_name}"),
        stars,
        open_issues_count: 0,
        contributors_count: None,
    }
}

/// Open issue created on 2024-01-`day`.
pub fn raw_issue(full_name: &str, number: i64, day: u32) -> RawIssue {
    RawIssue {
        issue_number: number,
        title: format!("Issue {number}"),
        html_url: format!("https://github.com/{full_name}/issues/{number}"),
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
    }
}

/// A `RepositorySource` that serves canned data and records how it was
/// called.
#[derive(Default)]
pub struct ScriptedSource {
    repositories: Vec<RawRepository>,
    contributors: HashMap<String, i64>,
    issues: HashMap<String, Vec<RawIssue>>,
    fail_fetch: bool,
    no_enrichment: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(repositories: Vec<RawRepository>) -> Self {
        Self {
            repositories,
            ..Self::default()
        }
    }

    /// Source whose repository fetch fails with a 503.
    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    pub fn with_contributors(mut self, full_name: &str, count: i64) -> Self {
        self.contributors.insert(full_name.to_string(), count);
        self
    }

    pub fn with_issues(mut self, full_name: &str, issues: Vec<RawIssue>) -> Self {
        self.issues.insert(full_name.to_string(), issues);
        self
    }

    pub fn without_enrichment(mut self) -> Self {
        self.no_enrichment = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositorySource for ScriptedSource {
    async fn fetch_repositories(
        &self,
        keyword: &str,
        max_results: usize,
    ) -> Result<Vec<RawRepository>, FetchError> {
        self.record(format!("search {keyword} {max_results}"));

        if self.fail_fetch {
            return Err(FetchError::Status {
                url: "https://api.github.com/search/repositories".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        Ok(self
            .repositories
            .iter()
            .take(max_results)
            .cloned()
            .collect())
    }

    async fn fetch_contributors_count(&self, owner: &str, repo_name: &str) -> i64 {
        let full_name = format!("{owner}/{repo_name}");
        self.record(format!("contributors {full_name}"));
        self.contributors.get(&full_name).copied().unwrap_or(0)
    }

    async fn fetch_recent_open_issues(
        &self,
        owner: &str,
        repo_name: &str,
        limit: usize,
    ) -> Vec<RawIssue> {
        let full_name = format!("{owner}/{repo_name}");
        self.record(format!("issues {full_name} {limit}"));
        self.issues
            .get(&full_name)
            .map(|issues| issues.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    fn supports_enrichment(&self) -> bool {
        !self.no_enrichment
    }
}

/// Write `contents` to `dir/name`.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}
