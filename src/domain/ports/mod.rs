//! Port trait definitions (Hexagonal Architecture)
//!
//! - `RepositorySource`: where repository and issue records come from
//! - `RecordStore`: persistence of repositories and issues

pub mod record_store;
pub mod repository_source;

pub use record_store::{RecordStore, RepositoryOrder};
pub use repository_source::RepositorySource;
