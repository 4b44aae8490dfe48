use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for repodex
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Which data source `sync` reads from
    #[serde(default)]
    pub source: SourceMode,

    /// GitHub API configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// CSV fallback configuration
    #[serde(default)]
    pub csv: CsvConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Web view configuration
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Github,
    Csv,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Personal access token. Falls back to `GITHUB_TOKEN` when unset.
    #[serde(default)]
    pub token: Option<String>,

    /// API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Search keyword, matched against repository names
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Maximum number of repositories fetched per sync
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Search page size (GitHub caps this at 100)
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Number of most recent open issues kept per repository
    #[serde(default = "default_issues_limit")]
    pub issues_limit: usize,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "repodex".to_string()
}

fn default_keyword() -> String {
    "json".to_string()
}

const fn default_max_results() -> usize {
    200
}

const fn default_per_page() -> usize {
    100
}

const fn default_issues_limit() -> usize {
    5
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            keyword: default_keyword(),
            max_results: default_max_results(),
            per_page: default_per_page(),
            issues_limit: default_issues_limit(),
        }
    }
}

/// CSV fallback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CsvConfig {
    #[serde(default = "default_repositories_path")]
    pub repositories_path: PathBuf,

    #[serde(default = "default_issues_path")]
    pub issues_path: PathBuf,
}

fn default_repositories_path() -> PathBuf {
    PathBuf::from("data/repositories.csv")
}

fn default_issues_path() -> PathBuf {
    PathBuf::from("data/issues.csv")
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            repositories_path: default_repositories_path(),
            issues_path: default_issues_path(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    "repodex.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    /// The sqlx connection URL for this database.
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Web view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
