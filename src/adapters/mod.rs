//! Adapters for external systems: GitHub, CSV files, SQLite and HTTP.

pub mod csv;
pub mod datetime;
pub mod github;
pub mod sqlite;
pub mod web;
