//! Object metadata store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Where to find the object-table dump used to resolve sizes and creation
/// times. Optional here because the CLI can supply it per run.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct MetadataConfig {
    /// Path to a JSON-Lines dump of the object table.
    #[serde(default)]
    pub store: Option<PathBuf>,
}
