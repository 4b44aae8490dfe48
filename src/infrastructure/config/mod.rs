//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment: YAML files, then
//! `REPODEX_*` environment overrides, then validation.

pub mod loader;

pub use loader::{ConfigLoader, CONFIG_FILE, LOCAL_CONFIG_FILE, TOKEN_ENV_VAR};
