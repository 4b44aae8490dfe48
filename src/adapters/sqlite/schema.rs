//! Table definitions. Applied with `CREATE ... IF NOT EXISTS`; there is no
//! migration history.

use sqlx::SqlitePool;

const STATEMENTS: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS repositories (
        id INTEGER PRIMARY KEY,
        full_name TEXT NOT NULL UNIQUE,
        description TEXT,
        html_url TEXT NOT NULL,
        stars INTEGER NOT NULL DEFAULT 0,
        open_issues_count INTEGER NOT NULL DEFAULT 0,
        contributors_count INTEGER NOT NULL DEFAULT 0
    )",
    r"CREATE TABLE IF NOT EXISTS issues (
        id INTEGER PRIMARY KEY,
        repository_id INTEGER NOT NULL REFERENCES repositories(id) ON DELETE CASCADE,
        issue_number INTEGER NOT NULL,
        title TEXT NOT NULL,
        html_url TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_issues_repository_id ON issues(repository_id)",
    "CREATE INDEX IF NOT EXISTS idx_repositories_stars ON repositories(stars DESC)",
];

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}
