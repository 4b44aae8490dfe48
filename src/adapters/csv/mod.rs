//! Flat-file data source for bulk and offline seeding.

pub mod rows;
pub mod source;

pub use source::{load_dataset, CsvDataset, CsvIssue, CsvPaths, CsvSource};
