//! Named access to the preferences in [`ConfigFile`].
//!
//! Keys are written `section.key`, matching the INI layout. Each key owns a
//! `ValueSpecification` that a value must satisfy before it is stored.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::file::ConfigFile;
use super::parser::{expand_tilde, parse_bool};
use crate::render::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigKeyError {
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// A settable preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `output.format`
    OutputFormat,
    /// `output.include_profile`
    OutputIncludeProfile,
    /// `logging.file`
    LoggingFile,
}

const ALL_KEYS: [ConfigKey; 3] = [
    ConfigKey::OutputFormat,
    ConfigKey::OutputIncludeProfile,
    ConfigKey::LoggingFile,
];

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// Full dotted name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::OutputFormat => "output.format",
            ConfigKey::OutputIncludeProfile => "output.include_profile",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    pub fn section(&self) -> &'static str {
        self.split_name().0
    }

    pub fn key_name(&self) -> &'static str {
        self.split_name().1
    }

    fn split_name(&self) -> (&'static str, &'static str) {
        let name = self.name();
        name.split_once('.').unwrap_or(("", name))
    }

    /// Current value as it would be written to the file. Unset is empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::OutputFormat => config.output.format.to_string(),
            ConfigKey::OutputIncludeProfile => config.output.include_profile.to_string(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_deref()
                .map(home_relative)
                .unwrap_or_default(),
        }
    }

    /// Validate `value` and store it. `config` is untouched on error.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;

        match self {
            ConfigKey::OutputFormat => {
                config.output.format = value
                    .trim()
                    .parse::<OutputFormat>()
                    .map_err(|_| self.rejected(format!("cannot interpret '{}'", value)))?;
            }
            ConfigKey::OutputIncludeProfile => {
                config.output.include_profile = parse_bool(value)
                    .ok_or_else(|| self.rejected(format!("cannot interpret '{}'", value)))?;
            }
            ConfigKey::LoggingFile => {
                let value = value.trim();
                config.logging.file = (!value.is_empty()).then(|| expand_tilde(value));
            }
        }
        Ok(())
    }

    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value)
            .map_err(|reason| self.rejected(reason))
    }

    fn specification(&self) -> &'static dyn ValueSpecification {
        match self {
            ConfigKey::OutputFormat => &OneOfSpec {
                options: &["conf", "alter-system"],
            },
            ConfigKey::OutputIncludeProfile => &BooleanSpec,
            ConfigKey::LoggingFile => &OptionalPathSpec,
        }
    }

    fn rejected(&self, reason: String) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason,
        }
    }
}

// ============================================================================
// Value specifications
// ============================================================================

/// A rule a raw value must satisfy. `Err` carries the reason shown to the user.
trait ValueSpecification {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Case-insensitive membership in a fixed list.
struct OneOfSpec {
    options: &'static [&'static str],
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        if self.options.iter().any(|opt| opt.eq_ignore_ascii_case(value)) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

struct BooleanSpec;

impl ValueSpecification for BooleanSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match parse_bool(value) {
            Some(_) => Ok(()),
            None => Err("must be true/false, yes/no, 1/0, or on/off".to_string()),
        }
    }
}

/// Any path, or empty to unset.
struct OptionalPathSpec;

impl ValueSpecification for OptionalPathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.contains('\0') {
            return Err("must not contain NUL bytes".to_string());
        }
        Ok(())
    }
}

/// Show paths under the home directory as `~/...`.
fn home_relative(path: &Path) -> String {
    dirs::home_dir()
        .and_then(|home| path.strip_prefix(home).ok().map(|rest| rest.to_path_buf()))
        .map(|rest| format!("~/{}", rest.display()))
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(
            "output.format".parse::<ConfigKey>().unwrap(),
            ConfigKey::OutputFormat
        );
        assert_eq!(
            " LOGGING.FILE ".parse::<ConfigKey>().unwrap(),
            ConfigKey::LoggingFile
        );
        assert!(matches!(
            "output.colour".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey(k)) if k == "output.colour"
        ));
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_section_and_key_name() {
        assert_eq!(ConfigKey::OutputIncludeProfile.section(), "output");
        assert_eq!(ConfigKey::OutputIncludeProfile.key_name(), "include_profile");
        assert_eq!(ConfigKey::LoggingFile.section(), "logging");
        assert_eq!(ConfigKey::LoggingFile.key_name(), "file");
    }

    #[test]
    fn test_defaults_read_back() {
        let config = ConfigFile::default();
        assert_eq!(ConfigKey::OutputFormat.get(&config), "conf");
        assert_eq!(ConfigKey::OutputIncludeProfile.get(&config), "true");
        assert_eq!(ConfigKey::LoggingFile.get(&config), "");
    }

    #[test]
    fn test_set_each_key() {
        let mut config = ConfigFile::default();

        ConfigKey::OutputFormat.set(&mut config, "ALTER-SYSTEM").unwrap();
        assert_eq!(config.output.format, OutputFormat::AlterSystem);

        ConfigKey::OutputIncludeProfile.set(&mut config, "off").unwrap();
        assert!(!config.output.include_profile);

        ConfigKey::LoggingFile.set(&mut config, "/tmp/pgtuner.log").unwrap();
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/pgtuner.log")));
        assert_eq!(ConfigKey::LoggingFile.get(&config), "/tmp/pgtuner.log");

        ConfigKey::LoggingFile.set(&mut config, "").unwrap();
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_rejected_value_leaves_config_alone() {
        let mut config = ConfigFile::default();

        let err = ConfigKey::OutputFormat.set(&mut config, "yaml").unwrap_err();
        assert!(err.to_string().contains("conf, alter-system"));

        assert!(ConfigKey::OutputIncludeProfile
            .set(&mut config, "maybe")
            .is_err());
        assert!(ConfigKey::LoggingFile.set(&mut config, "a\0b").is_err());

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_boolean_spellings() {
        for value in ["true", "false", "yes", "no", "1", "0", "on", "off"] {
            assert!(
                ConfigKey::OutputIncludeProfile.validate(value).is_ok(),
                "'{}' should be accepted",
                value
            );
        }
    }
}
