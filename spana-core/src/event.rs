use std::sync::Arc;

use chrono::{DateTime, Utc};

/// One resolved content access: which object, when, and how many bytes the
/// object occupies. Immutable once created; the size is resolved once per
/// object id and assumed constant for the run.
///
/// The id is an `Arc<str>` because every configured window simulator keys its
/// residency map on it — clones are pointer bumps, not string copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub object_id: Arc<str>,
    pub timestamp: DateTime<Utc>,
    pub size: u64,
}
