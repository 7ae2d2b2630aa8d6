//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use pgtuner::config::{config_file_path, ConfigFileError};
use pgtuner::profile::ValidationError;
use pgtuner::NotFoundError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to read or write the config file
    ConfigFile(ConfigFileError),
    /// Invalid profile input
    Profile(ValidationError),
    /// Requested setting is not derived for this profile
    Setting(NotFoundError),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Profile(ValidationError::Memory(_)) => {
                eprintln!();
                eprintln!("Memory is a whole number with an optional unit:");
                eprintln!("  16GB, 512MB, 2048kb, 1073741824");
            }
            CliError::Profile(_) => {
                eprintln!();
                eprintln!("Valid values:");
                eprintln!("  --type     web, oltp, dw, mixed, desktop");
                eprintln!("  --version  9.4, 9.5, 9.6, 10, 11, 12, 13, 14");
                eprintln!("  --platform linux, darwin, windows");
                eprintln!("  --storage  ssd, hdd, san");
            }
            CliError::Setting(_) => {
                eprintln!();
                eprintln!("Settings depend on version, platform and CPU count.");
                eprintln!("Run the same command without --setting to list the derived ones.");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in {}", config_file_path().display());
                eprintln!("or reset it with 'pgtuner config set <key> <value>'.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Profile(e) => write!(f, "Invalid profile: {}", e),
            CliError::Setting(e) => write!(f, "{}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Profile(e) => Some(e),
            CliError::Setting(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        CliError::Profile(e)
    }
}

impl From<NotFoundError> for CliError {
    fn from(e: NotFoundError) -> Self {
        CliError::Setting(e)
    }
}
