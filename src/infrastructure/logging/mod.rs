//! Logging infrastructure: tracing subscriber setup with console and
//! optional rolling file output.

pub mod logger;

pub use logger::{LogFormat, LoggerImpl};
