//! Input validation for command-line values.

use crate::error::{NetTuiError, Result};
use crate::state::CHROME_ROWS;
use std::path::Path;

/// Maximum allowed length for file paths
const MAX_PATH_LEN: usize = 4096;

/// Maximum allowed refresh interval in milliseconds
const MAX_REFRESH_INTERVAL: u64 = 60_000; // 1 minute

/// Minimum allowed refresh interval in milliseconds
const MIN_REFRESH_INTERVAL: u64 = 100; // 0.1 seconds

/// Narrowest frame `--snapshot` will lay out.
const MIN_FRAME_WIDTH: u16 = 20;

/// # Examples
/// ```
/// use net_tui::validation::validate_refresh_interval;
///
/// assert!(validate_refresh_interval(2000).is_ok());
/// assert!(validate_refresh_interval(50).is_err());
/// ```
pub fn validate_refresh_interval(interval_ms: u64) -> Result<()> {
    if interval_ms < MIN_REFRESH_INTERVAL {
        return Err(NetTuiError::Config(format!(
            "Refresh interval too small (minimum {MIN_REFRESH_INTERVAL}ms)"
        )));
    }
    if interval_ms > MAX_REFRESH_INTERVAL {
        return Err(NetTuiError::Config(format!(
            "Refresh interval too large (maximum {MAX_REFRESH_INTERVAL}ms)"
        )));
    }
    Ok(())
}

/// Frame size must leave room for at least one data row.
pub fn validate_frame_size(width: u16, height: u16) -> Result<()> {
    if width < MIN_FRAME_WIDTH {
        return Err(NetTuiError::Config(format!(
            "Frame width too small (minimum {MIN_FRAME_WIDTH})"
        )));
    }
    if height <= CHROME_ROWS {
        return Err(NetTuiError::Config(format!(
            "Frame height too small (minimum {})",
            CHROME_ROWS + 1
        )));
    }
    Ok(())
}

/// Log destinations must be plain, reasonably short paths.
pub fn validate_log_path(path: &Path) -> Result<()> {
    let display = path.display().to_string();
    if display.is_empty() {
        return Err(NetTuiError::Config("Log file path cannot be empty".to_string()));
    }
    if display.len() > MAX_PATH_LEN {
        return Err(NetTuiError::Config(format!(
            "Log file path too long (max {MAX_PATH_LEN} characters)"
        )));
    }
    if display.contains('\0') {
        return Err(NetTuiError::Config(
            "Log file path contains a null byte".to_string(),
        ));
    }
    if path.is_dir() {
        return Err(NetTuiError::Config(format!("{display} is a directory")));
    }
    Ok(())
}
