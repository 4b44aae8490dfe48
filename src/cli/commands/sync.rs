//! `repodex sync`: run one reconciliation pass.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::adapters::csv::{CsvPaths, CsvSource};
use crate::adapters::github::{GitHubClient, GitHubClientConfig};
use crate::adapters::sqlite::initialize_store;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SyncArgs;
use crate::domain::models::{Config, SourceMode};
use crate::services::{Reconciler, ReconcilerOptions, SyncReport, SyncSource};

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub source: &'static str,
    #[serde(flatten)]
    pub report: SyncReport,
}

impl SyncOutput {
    fn new(mode: SourceMode, report: SyncReport) -> Self {
        Self {
            source: match mode {
                SourceMode::Github => "github",
                SourceMode::Csv => "csv",
            },
            report,
        }
    }
}

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        format!("Sync complete: {}", self.report)
    }
}

/// Build the source for `mode` from configuration.
///
/// `upsert` only affects the CSV source: the files are loaded up front and
/// served through the fetch interface, so stored rows are updated in place
/// rather than wiped.
pub fn build_source(mode: SourceMode, upsert: bool, config: &Config) -> Result<SyncSource> {
    let source = match mode {
        SourceMode::Github => {
            let client = GitHubClient::new(GitHubClientConfig::from(&config.github));
            tracing::debug!(authenticated = client.is_authenticated(), "GitHub client ready");
            SyncSource::Remote(Arc::new(client))
        }
        SourceMode::Csv if upsert => {
            let paths = CsvPaths::from(&config.csv);
            let source = CsvSource::open(&paths).with_context(|| {
                format!("Failed to load {}", paths.repositories.display())
            })?;
            SyncSource::Remote(Arc::new(source))
        }
        SourceMode::Csv => SyncSource::File(CsvPaths::from(&config.csv)),
    };
    Ok(source)
}

pub async fn execute(args: SyncArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mode = args.source.map_or(config.source, SourceMode::from);
    if args.upsert && mode != SourceMode::Csv {
        tracing::warn!("--upsert only applies to the CSV source; ignoring it");
    }

    let store = initialize_store(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    let reconciler =
        Reconciler::new(Arc::new(store)).with_options(ReconcilerOptions::from(&config.github));

    tracing::info!(source = ?mode, keyword = %config.github.keyword, "Starting sync");

    let report = reconciler
        .sync(build_source(mode, args.upsert, config)?)
        .await
        .context("Sync failed")?;

    output(&SyncOutput::new(mode, report), json_mode);
    Ok(())
}
