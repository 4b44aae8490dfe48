//! SQLite implementation of the RecordStore.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::adapters::datetime::{parse_datetime, storage_datetime};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{ChangeSet, CommitSummary, Issue, Repository, RepositoryRef};
use crate::domain::ports::{RecordStore, RepositoryOrder};

use super::schema;

#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Delete a repository's issues, then the repository itself.
    async fn delete_repository_cascade(
        tx: &mut Transaction<'_, Sqlite>,
        repository_id: i64,
    ) -> StoreResult<u64> {
        sqlx::query("DELETE FROM issues WHERE repository_id = ?")
            .bind(repository_id)
            .execute(&mut **tx)
            .await?;

        let result = sqlx::query("DELETE FROM repositories WHERE id = ?")
            .bind(repository_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        schema::ensure_schema(&self.pool).await?;
        Ok(())
    }

    async fn find_repository_by_full_name(
        &self,
        full_name: &str,
    ) -> StoreResult<Option<Repository>> {
        let row: Option<RepositoryRow> =
            sqlx::query_as("SELECT * FROM repositories WHERE full_name = ?")
                .bind(full_name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn find_repository_by_id(&self, id: i64) -> StoreResult<Option<Repository>> {
        let row: Option<RepositoryRow> = sqlx::query_as("SELECT * FROM repositories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_issues_by_repository_id(&self, repository_id: i64) -> StoreResult<Vec<Issue>> {
        let rows: Vec<IssueRow> = sqlx::query_as(
            "SELECT * FROM issues WHERE repository_id = ? ORDER BY created_at DESC, id",
        )
        .bind(repository_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_repositories(&self, order: RepositoryOrder) -> StoreResult<Vec<Repository>> {
        let sql = match order {
            RepositoryOrder::Insertion => "SELECT * FROM repositories ORDER BY id",
            RepositoryOrder::StarsDesc => "SELECT * FROM repositories ORDER BY stars DESC, id",
        };

        let rows: Vec<RepositoryRow> = sqlx::query_as(sql).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn commit(&self, changes: ChangeSet) -> StoreResult<CommitSummary> {
        let mut summary = CommitSummary::default();
        if changes.is_empty() {
            return Ok(summary);
        }

        let mut tx = self.pool.begin().await?;

        for issue in changes.issue_deletes() {
            let result = sqlx::query("DELETE FROM issues WHERE id = ?")
                .bind(issue.id)
                .execute(&mut *tx)
                .await?;
            summary.issues_deleted += result.rows_affected() as usize;
        }

        for repository in changes.repository_deletes() {
            let deleted = Self::delete_repository_cascade(&mut tx, repository.id).await?;
            summary.repositories_deleted += deleted as usize;
        }

        for repository in changes.repository_inserts() {
            let result = sqlx::query(
                r"INSERT INTO repositories (full_name, description, html_url, stars, open_issues_count, contributors_count)
                  VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&repository.full_name)
            .bind(&repository.description)
            .bind(&repository.html_url)
            .bind(repository.stars)
            .bind(repository.open_issues_count)
            .bind(repository.contributors_count)
            .execute(&mut *tx)
            .await?;
            summary
                .inserted_repository_ids
                .push(result.last_insert_rowid());
        }

        for repository in changes.repository_updates() {
            let result = sqlx::query(
                r"UPDATE repositories
                  SET description = ?, html_url = ?, stars = ?, open_issues_count = ?, contributors_count = ?
                  WHERE id = ?",
            )
            .bind(&repository.description)
            .bind(&repository.html_url)
            .bind(repository.stars)
            .bind(repository.open_issues_count)
            .bind(repository.contributors_count)
            .bind(repository.id)
            .execute(&mut *tx)
            .await?;
            summary.repositories_updated += result.rows_affected() as usize;
        }

        for issue in changes.issue_inserts() {
            let repository_id = match issue.repository {
                RepositoryRef::Persisted(id) => id,
                RepositoryRef::Staged(index) => *summary
                    .inserted_repository_ids
                    .get(index)
                    .ok_or(StoreError::DanglingReference(index))?,
            };

            sqlx::query(
                r"INSERT INTO issues (repository_id, issue_number, title, html_url, created_at)
                  VALUES (?, ?, ?, ?, ?)",
            )
            .bind(repository_id)
            .bind(issue.issue_number)
            .bind(&issue.title)
            .bind(&issue.html_url)
            .bind(storage_datetime(&issue.created_at))
            .execute(&mut *tx)
            .await?;
            summary.issues_inserted += 1;
        }

        tx.commit().await?;

        tracing::debug!(
            repositories_inserted = summary.repositories_inserted(),
            repositories_updated = summary.repositories_updated,
            repositories_deleted = summary.repositories_deleted,
            issues_inserted = summary.issues_inserted,
            issues_deleted = summary.issues_deleted,
            "Committed change set"
        );

        Ok(summary)
    }
}

#[derive(sqlx::FromRow)]
struct RepositoryRow {
    id: i64,
    full_name: String,
    description: Option<String>,
    html_url: String,
    stars: i64,
    open_issues_count: i64,
    contributors_count: i64,
}

impl From<RepositoryRow> for Repository {
    fn from(row: RepositoryRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            description: row.description,
            html_url: row.html_url,
            stars: row.stars,
            open_issues_count: row.open_issues_count,
            contributors_count: row.contributors_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct IssueRow {
    id: i64,
    repository_id: i64,
    issue_number: i64,
    title: String,
    html_url: String,
    created_at: String,
}

impl TryFrom<IssueRow> for Issue {
    type Error = StoreError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        let created_at = parse_datetime(&row.created_at).map_err(|e| {
            StoreError::Corrupt(format!("issue {} created_at {:?}: {e}", row.id, row.created_at))
        })?;

        Ok(Issue {
            id: row.id,
            repository_id: row.repository_id,
            issue_number: row.issue_number,
            title: row.title,
            html_url: row.html_url,
            created_at,
        })
    }
}
