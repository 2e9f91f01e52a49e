//! TOML configuration for the writer.
//!
//! `WriterConfig` mirrors the builder surface, so a deployment can describe a
//! writer in a file instead of code. Every field is optional; missing fields
//! take the builder defaults.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::rotation::TargetOs;
use crate::rules::DisplayRules;
use crate::template::{DEFAULT_LINE_START, DEFAULT_SERVICE_NAME};

/// Writer configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Service name rendered into the line prefix.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Root folder the runtime and custom log trees live under.
    #[serde(default)]
    pub log_path: String,

    /// Line-prefix template text.
    #[serde(default = "default_line_start")]
    pub line_start: String,

    /// Path separator convention for derived log paths.
    #[serde(default)]
    pub target_os: TargetOs,

    /// Per-severity console display flags.
    #[serde(default)]
    pub display_rules: DisplayRules,

    /// Per-severity persistence flags.
    #[serde(default)]
    pub save_rules: DisplayRules,

    /// Custom template tokens and their initial values.
    #[serde(default)]
    pub line_params: BTreeMap<String, String>,

    /// Key/value properties listed in the log file header.
    #[serde(default)]
    pub header_properties: BTreeMap<String, String>,

    /// Custom log type names and their display colors.
    #[serde(default)]
    pub custom_colors: BTreeMap<String, Color>,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_line_start() -> String {
    DEFAULT_LINE_START.to_string()
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_path: String::new(),
            line_start: default_line_start(),
            target_os: TargetOs::default(),
            display_rules: DisplayRules::default(),
            save_rules: DisplayRules::default(),
            line_params: BTreeMap::new(),
            header_properties: BTreeMap::new(),
            custom_colors: BTreeMap::new(),
        }
    }
}

impl WriterConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content).context("Failed to write config file")?;
        Ok(())
    }
}
