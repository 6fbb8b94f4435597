//! Concrete metadata stores.
//!
//! `JsonlStore` is the production path: a dump of the object table with one
//! JSON record per line, loaded fully into memory at startup. `MemoryStore`
//! backs tests and embedding.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{MetadataError, MetadataResolver, ObjectMeta};

/// In-memory metadata map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, ObjectMeta>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object_id: impl Into<String>, meta: ObjectMeta) {
        self.entries.insert(object_id.into(), meta);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ObjectMeta)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (S, ObjectMeta)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, meta)| (id.into(), meta))
                .collect(),
        }
    }
}

impl MetadataResolver for MemoryStore {
    fn resolve(&self, object_id: &str) -> Result<Option<ObjectMeta>, MetadataError> {
        Ok(self.entries.get(object_id).copied())
    }
}

/// One record of the object-table dump.
#[derive(Debug, Deserialize)]
struct MetaRecord {
    path_id: String,
    size: u64,
    created_at: DateTime<Utc>,
}

/// Metadata store backed by a JSON-Lines dump of the object table.
///
/// When the dump contains more than one record for the same object id, the
/// first one wins, matching the upstream table's ordering.
#[derive(Clone, Debug)]
pub struct JsonlStore {
    entries: HashMap<String, ObjectMeta>,
}

impl JsonlStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MetadataError::Open {
            path: PathBuf::from(path),
            source,
        })?;

        let mut entries = HashMap::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| MetadataError::Read {
                path: PathBuf::from(path),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: MetaRecord =
                serde_json::from_str(&line).map_err(|source| MetadataError::Malformed {
                    path: PathBuf::from(path),
                    line: line_no + 1,
                    source,
                })?;
            entries.entry(record.path_id).or_insert(ObjectMeta {
                size: record.size,
                created_at: record.created_at,
            });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataResolver for JsonlStore {
    fn resolve(&self, object_id: &str) -> Result<Option<ObjectMeta>, MetadataError> {
        Ok(self.entries.get(object_id).copied())
    }
}
