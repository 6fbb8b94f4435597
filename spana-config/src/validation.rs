//! Custom validation functions for configuration.

use validator::ValidationError;

/// One year, the longest retention window worth simulating.
const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Validate the window duration list: non-empty, every entry between one
/// second and one year.
pub fn validate_windows(windows: &[u64]) -> Result<(), ValidationError> {
    if windows.is_empty() {
        return Err(ValidationError::new("no_windows"));
    }
    if windows.iter().any(|&w| w == 0 || w > MAX_WINDOW_SECS) {
        return Err(ValidationError::new("window_out_of_range"));
    }
    Ok(())
}
