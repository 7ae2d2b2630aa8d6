//! Shared setup for commands that derive or detect settings.

use pgtuner::config::ConfigFile;
use pgtuner::logging::{init_logging, LoggingGuard};
use tracing::debug;

use crate::error::CliError;

/// Loaded preferences plus an active logging subscriber.
///
/// Logging stays installed for as long as the runner is alive.
pub struct CliRunner {
    _logging: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load `~/.pgtuner/config.ini` and install logging.
    ///
    /// `debug` lowers the default stderr filter to debug; `RUST_LOG` still wins.
    pub fn with_debug(debug: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let logging = init_logging(config.logging.file.as_deref(), debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging: logging,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn log_startup(&self, command: &str) {
        debug!(
            version = pgtuner::VERSION,
            command,
            log_file = ?self.config.logging.file,
            "pgtuner starting"
        );
    }
}
