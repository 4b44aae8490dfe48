pub mod change_set;
pub mod config;
pub mod issue;
pub mod repository;

pub use change_set::{ChangeSet, CommitSummary, RepositoryRef};
pub use config::{
    Config, CsvConfig, DatabaseConfig, GitHubConfig, LoggingConfig, SourceMode, WebConfig,
};
pub use issue::{Issue, NewIssue, RawIssue};
pub use repository::{split_full_name, NewRepository, RawRepository, Repository};
