use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying a metadata store.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to open metadata store {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read metadata store {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed metadata record at {path}:{line}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}
