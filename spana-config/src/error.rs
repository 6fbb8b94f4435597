//! Configuration loading and validation errors.

use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid configuration:\n{}", render_validation_errors(.0))]
    Validation(#[source] ValidationErrors),

    #[error("configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),
}

fn render_validation_errors(errors: &ValidationErrors) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    for (field, errors) in errors.field_errors() {
        for error in errors {
            let _ = writeln!(output, "  {}: {}", field, error.code);
        }
    }
    output
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}
