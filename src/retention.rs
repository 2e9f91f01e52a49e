//! Runtime log retention.
//!
//! Deletes runtime log files older than the retention period and prunes
//! month folders left empty by the sweep.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;

/// Default retention period in days.
pub const DEFAULT_RETENTION_DAYS: u64 = 30;

/// Clean up runtime log files older than the default retention period.
///
/// Returns the number of files deleted.
pub fn cleanup_runtime_logs(root: impl AsRef<Path>) -> Result<usize> {
    cleanup_runtime_logs_with_retention(root, DEFAULT_RETENTION_DAYS)
}

/// Clean up runtime log files older than the specified number of days.
///
/// Sweeps every month folder under `{root}/runtime`. Returns the number of
/// files deleted.
pub fn cleanup_runtime_logs_with_retention(
    root: impl AsRef<Path>,
    retention_days: u64,
) -> Result<usize> {
    let runtime_dir = root.as_ref().join("runtime");
    if !runtime_dir.exists() {
        return Ok(0);
    }

    let retention_duration = Duration::from_secs(retention_days * 24 * 60 * 60);
    let cutoff = SystemTime::now()
        .checked_sub(retention_duration)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut deleted_count = 0;

    for month_entry in fs::read_dir(&runtime_dir)? {
        let month_dir = month_entry?.path();
        if !month_dir.is_dir() {
            continue;
        }

        for entry in fs::read_dir(&month_dir)? {
            let entry = entry?;
            let path = entry.path();

            // Only process runtime log files
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if !name.starts_with("log-") || !name.ends_with(".log") {
                    continue;
                }
            } else {
                continue;
            }

            // Check file modification time
            if let Ok(metadata) = entry.metadata() {
                if let Ok(modified) = metadata.modified() {
                    if modified < cutoff && fs::remove_file(&path).is_ok() {
                        deleted_count += 1;
                    }
                }
            }
        }

        // Prune month folders the sweep emptied
        if fs::read_dir(&month_dir)?.next().is_none() {
            let _ = fs::remove_dir(&month_dir);
        }
    }

    Ok(deleted_count)
}
