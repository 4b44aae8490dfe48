//! `repodex list`: print stored repositories.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::adapters::sqlite::initialize_store;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::ListArgs;
use crate::domain::models::{Config, Repository};
use crate::domain::ports::{RecordStore, RepositoryOrder};

#[derive(Debug, Serialize)]
pub struct RepositoryListOutput {
    pub order: &'static str,
    pub total: usize,
    pub repositories: Vec<Repository>,
}

impl CommandOutput for RepositoryListOutput {
    fn to_human(&self) -> String {
        if self.repositories.is_empty() {
            return "No repositories found. Run `repodex sync` first.".to_string();
        }

        format!(
            "{}\n{} repositories",
            TableFormatter::new().format_repositories(&self.repositories),
            self.total
        )
    }
}

pub async fn execute(args: ListArgs, config: &Config, json_mode: bool) -> Result<()> {
    let order = RepositoryOrder::from(args.order);

    let store = initialize_store(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    let repositories = store
        .list_repositories(order)
        .await
        .context("Failed to list repositories")?;

    output(
        &RepositoryListOutput {
            order: order.as_str(),
            total: repositories.len(),
            repositories,
        },
        json_mode,
    );
    Ok(())
}
