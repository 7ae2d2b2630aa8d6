//! Reading and writing `~/.pgtuner/config.ini`.
//!
//! A missing file is not an error: the CLI runs on defaults until the first
//! `config set` writes one.

use ini::Ini;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use super::settings::*;

const CONFIG_DIR_NAME: &str = ".pgtuner";
const CONFIG_FILE_NAME: &str = "config.ini";

/// Failure to load or store the preferences file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key holds a value outside its allowed set.
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Load from `~/.pgtuner/config.ini`, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        super::parser::parse_ini(&ini)
    }

    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Write to `path`, creating missing parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_error = |target: &Path| {
            let target = target.to_path_buf();
            move |source: std::io::Error| ConfigFileError::Write {
                path: target,
                source,
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error(parent))?;
        }
        fs::write(path, super::writer::to_config_string(self)).map_err(write_error(path))
    }
}

/// `~/.pgtuner`, or `./.pgtuner` when there is no home directory.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("absent.ini")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.output.format, OutputFormat::Conf);
        assert!(config.output.include_profile);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_save_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join(CONFIG_FILE_NAME);

        ConfigFile::default().save_to(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_save_into_file_parent_is_write_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = ConfigFile::default()
            .save_to(&blocker.join(CONFIG_FILE_NAME))
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::Write { .. }));
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn test_unreadable_ini_is_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, [b'[', 0xC3, 0x28, b']', b'\n']).unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Read { .. }));
    }

    #[test]
    fn test_config_file_path() {
        assert!(config_file_path().ends_with(".pgtuner/config.ini"));
    }
}
