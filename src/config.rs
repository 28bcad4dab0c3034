//! Configuration management for script-debugger.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::model::DebuggerOptions;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Debugger model policy.
    pub debugger: DebuggerSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Debugger model policy section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebuggerSection {
    /// Reject breakpoint lines outside a loaded script.
    pub reject_out_of_range_lines: bool,
    /// Allow overlapping edits of the same script.
    pub allow_concurrent_edits: bool,
}

impl Default for DebuggerSection {
    fn default() -> Self {
        let options = DebuggerOptions::default();
        Self {
            reject_out_of_range_lines: options.reject_out_of_range_lines,
            allow_concurrent_edits: options.allow_concurrent_edits,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log filter (error, warn, info, debug, trace, or an EnvFilter directive).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("SCRIPT_DEBUGGER_ALLOW_CONCURRENT_EDITS") {
            if let Some(allow) = parse_flag(&value) {
                self.debugger.allow_concurrent_edits = allow;
            }
        }

        if let Ok(level) = std::env::var("SCRIPT_DEBUGGER_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if args.allow_concurrent_edits {
            self.debugger.allow_concurrent_edits = true;
        }

        if args.no_line_check {
            self.debugger.reject_out_of_range_lines = false;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Options for the debugger model.
    pub fn debugger_options(&self) -> DebuggerOptions {
        DebuggerOptions {
            reject_out_of_range_lines: self.debugger.reject_out_of_range_lines,
            allow_concurrent_edits: self.debugger.allow_concurrent_edits,
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
