use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::utils::get_utc_iso_datetime;

/// Centralized function to append error messages to an errors log file
///
/// # Arguments
/// * `log_path` - The log file to append to (created if missing)
/// * `error_type` - A description of the error type/category (e.g., "Upload Processing Error")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(log_path: &Path, error_type: &str, error_message: &str) {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", log_entry);
        }
        Err(e) => {
            tracing::warn!("Could not open error log {}: {}", log_path.display(), e);
        }
    }
}
