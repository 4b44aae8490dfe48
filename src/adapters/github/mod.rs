//! GitHub REST API adapter.
//!
//! Implements [`RepositorySource`](crate::domain::ports::RepositorySource)
//! against repository search, contributor listing and issue listing.

pub mod client;
pub mod link;
pub mod models;

pub use client::{GitHubClient, GitHubClientConfig, MAX_PER_PAGE};
