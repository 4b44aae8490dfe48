//! Repodex CLI entry point.

use anyhow::Result;
use clap::Parser;

use repodex::cli::{commands, handle_error, Cli, Commands, SyncArgs};
use repodex::infrastructure::logging::LoggerImpl;
use repodex::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json).await {
        handle_error(&err, cli.json);
    }
}

async fn run(
    command: Option<Commands>,
    config_path: Option<&std::path::Path>,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&config.logging)?;

    match command.unwrap_or_else(|| Commands::Sync(SyncArgs::default())) {
        Commands::Sync(args) => commands::sync::execute(args, &config, json).await,
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::List(args) => commands::list::execute(args, &config, json).await,
    }
}
