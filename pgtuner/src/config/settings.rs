//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::render::OutputFormat;

/// Complete CLI preferences loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// How derived settings are printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    /// conf or alter-system
    pub format: OutputFormat,
    /// Emit a header describing the profile
    pub include_profile: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path. Logs only go to stderr when unset.
    pub file: Option<PathBuf>,
}
