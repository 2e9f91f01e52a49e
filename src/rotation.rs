//! Date-partitioned log paths.
//!
//! Runtime logs live under `{root}/runtime/{month}-{year}/log-{month}-{day}.log`
//! and custom dumps under
//! `{root}/custom/{month}-{year}/{day}-{month}-logs/log-{name}-{id}.log`.
//! Date components are written without zero padding. The functions here are
//! pure path derivations; the writer compares them against its open file to
//! decide when to rotate.

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path separator convention to build log paths with.
///
/// Paths are assembled as plain strings so a configuration can pin the
/// convention regardless of where the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Windows,
}

impl TargetOs {
    /// The separator character for this convention.
    pub fn separator(&self) -> char {
        match self {
            TargetOs::Linux => '/',
            TargetOs::Windows => '\\',
        }
    }

    /// The convention of the compilation target.
    pub fn current() -> Self {
        if cfg!(windows) {
            TargetOs::Windows
        } else {
            TargetOs::Linux
        }
    }
}

impl Default for TargetOs {
    fn default() -> Self {
        Self::current()
    }
}

/// Where the runtime log for a given day lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePath {
    /// Month folder, e.g. `logs/runtime/3-2024`.
    pub folder: String,
    /// File name inside the folder, e.g. `log-3-5.log`.
    pub file_name: String,
    /// Folder and file name joined.
    pub full: String,
}

/// Derive the runtime log path for `now`.
pub fn runtime_path(root: &str, os: TargetOs, now: DateTime<Local>) -> RuntimePath {
    let sep = os.separator();
    let folder = format!(
        "{root}{sep}runtime{sep}{month}-{year}",
        month = now.month(),
        year = now.year()
    );
    let file_name = format!("log-{month}-{day}.log", month = now.month(), day = now.day());
    let full = format!("{folder}{sep}{file_name}");
    RuntimePath {
        folder,
        file_name,
        full,
    }
}

/// Where a custom log dump for a given day lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomLogPath {
    /// Month folder, e.g. `logs/custom/3-2024`.
    pub month_folder: String,
    /// Day folder inside the month, e.g. `logs/custom/3-2024/5-3-logs`.
    pub day_folder: String,
    /// File name inside the day folder, e.g. `log-report-{id}.log`.
    pub file_name: String,
    /// Day folder and file name joined.
    pub full: String,
}

/// Derive the path for a custom dump named `name`, disambiguated by `id`.
pub fn custom_log_path(
    root: &str,
    os: TargetOs,
    name: &str,
    id: Uuid,
    now: DateTime<Local>,
) -> CustomLogPath {
    let sep = os.separator();
    let month_folder = format!(
        "{root}{sep}custom{sep}{month}-{year}",
        month = now.month(),
        year = now.year()
    );
    let day_folder = format!(
        "{month_folder}{sep}{day}-{month}-logs",
        day = now.day(),
        month = now.month()
    );
    let file_name = format!("log-{name}-{id}.log");
    let full = format!("{day_folder}{sep}{file_name}");
    CustomLogPath {
        month_folder,
        day_folder,
        file_name,
        full,
    }
}
