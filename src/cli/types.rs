//! CLI type definitions
//!
//! Clap structures describing the `repodex` command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::models::SourceMode;
use crate::domain::ports::RepositoryOrder;

#[derive(Parser, Debug)]
#[command(name = "repodex")]
#[command(about = "Index GitHub repositories and their open issues", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run; defaults to `sync`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load configuration from this YAML file instead of repodex.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch repositories and issues into the local database
    Sync(SyncArgs),

    /// Serve the repository pages over HTTP
    Serve(ServeArgs),

    /// Print stored repositories as a table
    List(ListArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct SyncArgs {
    /// Override the configured data source
    #[arg(short, long, value_enum)]
    pub source: Option<SourceArg>,

    /// With the CSV source, merge the repository file into the existing
    /// index instead of wiping and reloading it
    #[arg(long)]
    pub upsert: bool,
}

#[derive(clap::Args, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Sort order
    #[arg(short, long, value_enum, default_value_t = OrderArg::Insertion)]
    pub order: OrderArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    Github,
    Csv,
}

impl From<SourceArg> for SourceMode {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Github => Self::Github,
            SourceArg::Csv => Self::Csv,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderArg {
    #[default]
    Insertion,
    Stars,
}

impl From<OrderArg> for RepositoryOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Insertion => Self::Insertion,
            OrderArg::Stars => Self::StarsDesc,
        }
    }
}
