//! Presentation views: HTML pages and a JSON API served with axum.

pub mod html;
pub mod server;

pub use server::{IssueResponse, RepositoryDetailResponse, RepositoryResponse, WebServer};
