//! Windowed-cache simulation parameters.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Simulation parameters: which retention windows to evaluate.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SimulationConfig {
    /// Window durations in seconds. Order is preserved in the report;
    /// duplicates are permitted and tracked independently.
    #[serde(default = "default_windows")]
    #[validate(custom(function = validation::validate_windows))]
    pub windows: Vec<u64>,
}

// One second up to one day, roughly logarithmically spaced.
fn default_windows() -> Vec<u64> {
    vec![
        1,
        5,
        15,
        30,
        60,
        90,
        120,
        180,
        240,
        300,
        600,
        900,
        1200,
        1800,
        60 * 60,
        60 * 60 * 2,
        60 * 60 * 6,
        60 * 60 * 12,
        60 * 60 * 24,
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
        }
    }
}
