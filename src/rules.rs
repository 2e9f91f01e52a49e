//! Per-severity emission policies.
//!
//! A writer carries two independent rule sets: one gating console display,
//! one gating persistence. Both default to everything enabled.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

fn default_enabled() -> bool {
    true
}

/// One boolean per severity, controlling whether an action applies to it.
///
/// The same shape serves both the display side and the save side of a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRules {
    #[serde(default = "default_enabled")]
    pub info: bool,
    #[serde(default = "default_enabled")]
    pub debug: bool,
    #[serde(default = "default_enabled")]
    pub warning: bool,
    #[serde(default = "default_enabled")]
    pub error: bool,
    #[serde(default = "default_enabled")]
    pub success: bool,
    #[serde(default = "default_enabled")]
    pub logger_error: bool,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self::all(true)
    }
}

impl DisplayRules {
    /// Create a rule set with each flag set explicitly.
    pub fn new(
        info: bool,
        debug: bool,
        warning: bool,
        error: bool,
        success: bool,
        logger_error: bool,
    ) -> Self {
        Self {
            info,
            debug,
            warning,
            error,
            success,
            logger_error,
        }
    }

    /// Create a rule set with every flag set to `enabled`.
    pub fn all(enabled: bool) -> Self {
        Self {
            info: enabled,
            debug: enabled,
            warning: enabled,
            error: enabled,
            success: enabled,
            logger_error: enabled,
        }
    }

    /// Whether the action this rule set guards applies to `severity`.
    pub fn permits(&self, severity: Severity) -> bool {
        match severity {
            Severity::Info => self.info,
            Severity::Debug => self.debug,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
            Severity::Success => self.success,
            Severity::LoggerError => self.logger_error,
        }
    }
}

/// The pair of rule sets a writer evaluates on every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterRules {
    /// Gates console emission.
    pub display: DisplayRules,
    /// Gates persistence to the runtime log file.
    pub save: DisplayRules,
}

impl WriterRules {
    /// Create the pair from explicit display and save rule sets.
    pub fn new(display: DisplayRules, save: DisplayRules) -> Self {
        Self { display, save }
    }

    /// Whether `severity` may be written to the console.
    pub fn allows_display(&self, severity: Severity) -> bool {
        self.display.permits(severity)
    }

    /// Whether `severity` may be persisted.
    ///
    /// `LoggerError` never persists: the logger's own failure reports must
    /// not re-enter the save path they are reporting about.
    pub fn allows_save(&self, severity: Severity) -> bool {
        match severity {
            Severity::LoggerError => false,
            _ => self.save.permits(severity),
        }
    }
}
