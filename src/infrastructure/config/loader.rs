use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

use crate::domain::errors::ConfigurationError;
use crate::domain::models::Config;

/// Project configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "repodex.yaml";

/// Optional local overrides, merged over [`CONFIG_FILE`].
pub const LOCAL_CONFIG_FILE: &str = "repodex.local.yaml";

/// Variable read when no token is configured.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the working directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `repodex.yaml`
    /// 3. `repodex.local.yaml`
    /// 4. Environment variables (`REPODEX_` prefix, `__` separates sections)
    ///
    /// `GITHUB_TOKEN` fills in the token when none of the above sets one.
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed("REPODEX_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::finish(config)
    }

    /// Load configuration from a specific file. Environment overrides still
    /// apply.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        anyhow::ensure!(path.is_file(), "Config file {} not found", path.display());

        let config: Config = Self::figment()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("REPODEX_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::finish(config)
    }

    fn figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    fn finish(mut config: Config) -> Result<Config> {
        Self::apply_token_fallback(&mut config, std::env::var(TOKEN_ENV_VAR).ok());
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_token_fallback(config: &mut Config, fallback: Option<String>) {
        let configured = config
            .github
            .token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());

        if !configured {
            config.github.token = fallback.filter(|t| !t.trim().is_empty());
        }
    }

    /// Validate configuration after loading. A missing token is not an error.
    pub fn validate(config: &Config) -> Result<(), ConfigurationError> {
        let invalid = |msg: String| Err(ConfigurationError::Invalid(msg));

        if config.database.path.trim().is_empty() {
            return invalid("database.path cannot be empty".to_string());
        }

        if config.database.max_connections == 0 {
            return invalid("database.max_connections must be at least 1".to_string());
        }

        if config.github.keyword.trim().is_empty() {
            return invalid("github.keyword cannot be empty".to_string());
        }

        if config.github.max_results == 0 {
            return invalid("github.max_results must be at least 1".to_string());
        }

        if !(1..=100).contains(&config.github.per_page) {
            return invalid(format!(
                "github.per_page must be between 1 and 100, got {}",
                config.github.per_page
            ));
        }

        if config.github.issues_limit > 100 {
            return invalid(format!(
                "github.issues_limit must be at most 100, got {}",
                config.github.issues_limit
            ));
        }

        if config.github.api_base_url.trim().is_empty() {
            return invalid("github.api_base_url cannot be empty".to_string());
        }

        if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
            return invalid(format!(
                "Invalid log level: {}. Must be one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return invalid(format!(
                "Invalid log format: {}. Must be one of: json, pretty",
                config.logging.format
            ));
        }

        if config.web.host.trim().is_empty() {
            return invalid("web.host cannot be empty".to_string());
        }

        Ok(())
    }
}
