//! CSV file source.
//!
//! Reads the repository file and the issue file into one in-memory
//! [`CsvDataset`]. A file that cannot be opened, or whose header row is
//! unreadable or lacks a column, fails the whole load. A malformed data row is
//! logged and skipped.

use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::errors::{FetchError, ParseError};
use crate::domain::models::{CsvConfig, RawIssue, RawRepository};
use crate::domain::ports::RepositorySource;

use super::rows::{CsvIssueRow, CsvRepositoryRow, ISSUE_COLUMNS, REPOSITORY_COLUMNS};

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPaths {
    pub repositories: PathBuf,
    pub issues: PathBuf,
}

impl From<&CsvConfig> for CsvPaths {
    fn from(config: &CsvConfig) -> Self {
        Self {
            repositories: config.repositories_path.clone(),
            issues: config.issues_path.clone(),
        }
    }
}

/// An issue row. `repository_id` refers to a stored repository id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvIssue {
    pub repository_id: i64,
    pub issue: RawIssue,
}

#[derive(Debug, Clone, Default)]
pub struct CsvDataset {
    pub repositories: Vec<RawRepository>,
    pub issues: Vec<CsvIssue>,
    /// Data rows dropped because they could not be parsed.
    pub skipped_repository_rows: usize,
    pub skipped_issue_rows: usize,
}

/// Load both files.
///
/// # Errors
/// Returns `ParseError` when either file cannot be read or its header row is
/// unusable.
pub fn load_dataset(paths: &CsvPaths) -> Result<CsvDataset, ParseError> {
    let (repositories, skipped_repository_rows) = read_rows(
        &paths.repositories,
        &REPOSITORY_COLUMNS,
        |row: CsvRepositoryRow| Ok(RawRepository::from(row)),
    )?;

    let (issues, skipped_issue_rows) =
        read_rows(&paths.issues, &ISSUE_COLUMNS, |row: CsvIssueRow| {
            row.into_raw().map(|(repository_id, issue)| CsvIssue {
                repository_id,
                issue,
            })
        })?;

    tracing::info!(
        repositories = repositories.len(),
        issues = issues.len(),
        skipped_repository_rows,
        skipped_issue_rows,
        "Loaded CSV dataset"
    );

    Ok(CsvDataset {
        repositories,
        issues,
        skipped_repository_rows,
        skipped_issue_rows,
    })
}

fn read_rows<T, U, F>(path: &Path, columns: &[&str], convert: F) -> Result<(Vec<U>, usize), ParseError>
where
    T: DeserializeOwned,
    F: Fn(T) -> Result<U, String>,
{
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| ParseError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    if let Some(missing) = columns
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(ParseError::InvalidRow {
            path: path.to_path_buf(),
            line: 1,
            reason: format!("missing column {missing}"),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let (line, parsed) = match result {
            Ok(record) => {
                let line = record.position().map_or(0, ::csv::Position::line);
                let parsed = record
                    .deserialize::<T>(Some(&headers))
                    .map_err(|e| e.to_string())
                    .and_then(&convert);
                (line, parsed)
            }
            Err(source) if source.is_io_error() => {
                return Err(ParseError::Csv {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Err(source) => (
                source.position().map_or(0, ::csv::Position::line),
                Err(source.to_string()),
            ),
        };

        match parsed {
            Ok(row) => rows.push(row),
            Err(reason) => {
                let err = ParseError::InvalidRow {
                    path: path.to_path_buf(),
                    line,
                    reason,
                };
                tracing::warn!(error = %err, "Skipping malformed CSV row");
                skipped += 1;
            }
        }
    }

    Ok((rows, skipped))
}

/// Serves a loaded dataset through the fetch interface.
///
/// Contributor counts come from the file, so enrichment is off. Issue rows
/// reference stored ids rather than names and are not served here; use
/// [`load_dataset`] with the file reload for those.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dataset: CsvDataset,
}

impl CsvSource {
    /// # Errors
    /// Returns `ParseError` when the dataset cannot be loaded.
    pub fn open(paths: &CsvPaths) -> Result<Self, ParseError> {
        Ok(Self {
            dataset: load_dataset(paths)?,
        })
    }
}

#[async_trait]
impl RepositorySource for CsvSource {
    /// The file is the whole result set; `keyword` is not applied.
    async fn fetch_repositories(
        &self,
        _keyword: &str,
        max_results: usize,
    ) -> Result<Vec<RawRepository>, FetchError> {
        Ok(self
            .dataset
            .repositories
            .iter()
            .take(max_results)
            .cloned()
            .collect())
    }

    async fn fetch_contributors_count(&self, owner: &str, repo_name: &str) -> i64 {
        let full_name = format!("{owner}/{repo_name}");
        self.dataset
            .repositories
            .iter()
            .rev()
            .find(|r| r.full_name == full_name)
            .and_then(|r| r.contributors_count)
            .unwrap_or(0)
    }

    async fn fetch_recent_open_issues(
        &self,
        _owner: &str,
        _repo_name: &str,
        _limit: usize,
    ) -> Vec<RawIssue> {
        Vec::new()
    }

    fn supports_enrichment(&self) -> bool {
        false
    }
}
