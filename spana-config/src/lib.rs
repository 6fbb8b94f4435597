//! # spana configuration
//!
//! Hierarchical configuration for the estimator: defaults, then an optional
//! YAML file, then `SPANA_*` environment overrides, validated after merging.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod metadata;
mod simulation;
mod validation;

pub use error::ConfigError;
pub use metadata::MetadataConfig;
pub use simulation::SimulationConfig;

/// Top-level configuration container for the estimator.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct SpanaConfig {
    /// Windowed-cache simulation parameters.
    #[validate(nested)]
    pub simulation: SimulationConfig,

    /// Object metadata store location.
    #[validate(nested)]
    pub metadata: MetadataConfig,
}

impl SpanaConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/spana.yaml`, when present
    /// 3. `SPANA_*` environment variables (`__` separates nesting levels)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SpanaConfig::default()));

        if Path::new("config/spana.yaml").exists() {
            figment = figment.merge(Yaml::file("config/spana.yaml"));
        }

        figment
            .merge(Env::prefixed("SPANA_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(SpanaConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SPANA_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SpanaConfig::default();
        config.validate().expect("default config should validate");
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("spana-config-{}.yaml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "simulation:").unwrap();
        writeln!(file, "  windows: [60, 300]").unwrap();
        writeln!(file, "metadata:").unwrap();
        writeln!(file, "  store: /var/lib/spana/objects.jsonl").unwrap();

        let config = SpanaConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.simulation.windows, vec![60, 300]);
        assert_eq!(
            config.metadata.store.as_deref(),
            Some(Path::new("/var/lib/spana/objects.jsonl"))
        );
    }

    #[test]
    fn empty_window_list_is_rejected() {
        let path = std::env::temp_dir().join(format!("spana-config-empty-{}.yaml", std::process::id()));
        std::fs::write(&path, "simulation:\n  windows: []\n").unwrap();

        let result = SpanaConfig::load_from_path(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            SpanaConfig::load_from_path("/nonexistent/spana.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
