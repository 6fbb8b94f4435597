use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// The input stream must be monotonic; an older-than-newest access is
    /// fatal for the run rather than silently reordered.
    #[error("access at {timestamp} is older than the newest logged event ({newest})")]
    OutOfOrder {
        timestamp: DateTime<Utc>,
        newest: DateTime<Utc>,
    },

    /// A simulator cursor pointed past the retained buffer. This indicates a
    /// coordinator/simulator desynchronization bug, not an input problem.
    #[error("event log index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("metadata lookup failed: {0}")]
    Metadata(#[from] spana_metadata::MetadataError),
}
