//! # spana-metadata
//!
//! Object metadata lookup for the cache estimator. The simulation core only
//! needs two facts about an object: how many bytes it occupies and when it
//! was created. Where those facts come from is behind the [`MetadataResolver`]
//! trait so the estimator can run against a file dump in production and a
//! plain map in tests.

use chrono::{DateTime, Utc};

mod error;
mod store;

pub use error::MetadataError;
pub use store::{JsonlStore, MemoryStore};

/// Byte size and creation time of one stored object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectMeta {
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Maps an object identifier to its metadata.
///
/// `Ok(None)` means the object is unknown to the store — objects can be
/// deleted out-of-band after having been accessed, so a miss is an expected
/// outcome, not an error.
pub trait MetadataResolver {
    fn resolve(&self, object_id: &str) -> Result<Option<ObjectMeta>, MetadataError>;
}

impl<R: MetadataResolver + ?Sized> MetadataResolver for &R {
    fn resolve(&self, object_id: &str) -> Result<Option<ObjectMeta>, MetadataError> {
        (**self).resolve(object_id)
    }
}
