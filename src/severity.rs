//! Log severities and their built-in console colors.

use crossterm::style::Color;

/// Classification of a log entry.
///
/// `LoggerError` is reserved for the logger reporting its own failures
/// (a failed rotation, an append error); those lines are displayed but
/// never persisted, so a broken disk cannot trigger a save-failure loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Debug,
    Warning,
    Error,
    Success,
    LoggerError,
}

impl Severity {
    /// The five severities available to callers (everything but `LoggerError`).
    pub const DISPLAY: [Severity; 5] = [
        Severity::Info,
        Severity::Debug,
        Severity::Warning,
        Severity::Error,
        Severity::Success,
    ];

    /// Get the display name for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Success => "SUCCESS",
            Severity::LoggerError => "LOGGER_ERROR",
        }
    }

    /// Built-in console color for this severity.
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => Color::White,
            Severity::Debug => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::Success => Color::Green,
            Severity::LoggerError => Color::DarkRed,
        }
    }
}
