//! `repodex serve`: serve the repository pages.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::sqlite::initialize_store;
use crate::adapters::web::WebServer;
use crate::cli::types::ServeArgs;
use crate::domain::models::Config;

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let mut web = config.web.clone();
    if let Some(host) = args.host {
        web.host = host;
    }
    if let Some(port) = args.port {
        web.port = port;
    }

    let store = initialize_store(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path))?;

    WebServer::new(Arc::new(store), web)
        .serve_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutting down web server");
            }
        })
        .await
}
