use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading log sources.
#[derive(Debug, Error)]
pub enum AccessLogError {
    #[error("failed to open log source {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read log source {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
