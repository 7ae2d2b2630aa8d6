//! CLI preferences stored in `~/.pgtuner/config.ini`.
//!
//! Only presentation and logging preferences live here. Profiles are never
//! persisted; every run derives settings from the inputs it is given.
//!
//! # Example
//!
//! ```
//! use pgtuner::config::{ConfigFile, ConfigKey};
//!
//! let mut config = ConfigFile::default();
//! ConfigKey::OutputFormat.set(&mut config, "alter-system").unwrap();
//! assert_eq!(ConfigKey::OutputFormat.get(&config), "alter-system");
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_INCLUDE_PROFILE, DEFAULT_OUTPUT_FORMAT};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ConfigFile, LoggingSettings, OutputSettings};
