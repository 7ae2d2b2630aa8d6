//! Reading an `Ini` document into a [`ConfigFile`].
//!
//! Unknown sections and keys are ignored; known keys with bad values fail.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Overlay the values found in `ini` on the defaults.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(v) = ini.get_from(Some("output"), "format") {
        config.output.format = v
            .trim()
            .parse()
            .map_err(|_| invalid("output", "format", v, "must be one of: conf, alter-system"))?;
    }

    if let Some(v) = ini.get_from(Some("output"), "include_profile") {
        config.output.include_profile = parse_bool(v).ok_or_else(|| {
            invalid(
                "output",
                "include_profile",
                v,
                "must be true/false, yes/no, 1/0, or on/off",
            )
        })?;
    }

    if let Some(v) = ini.get_from(Some("logging"), "file") {
        let v = v.trim();
        config.logging.file = (!v.is_empty()).then(|| expand_tilde(v));
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Accepts true/false, yes/no, 1/0 and on/off in any case.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// `~/x` becomes `$HOME/x`; anything else is taken literally.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_invalid_output_format() {
        let err = load("[output]\nformat = yaml\n").unwrap_err();
        assert!(err.to_string().contains("output.format"));
        assert!(err.to_string().contains("must be one of:"));
    }

    #[test]
    fn test_invalid_include_profile() {
        let err = load("[output]\ninclude_profile = maybe\n").unwrap_err();
        assert!(err.to_string().contains("include_profile"));
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[output]
format = alter-system
include_profile = no

[logging]
file = /var/log/pgtuner.log
"#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::AlterSystem);
        assert!(!config.output.include_profile);
        assert_eq!(config.logging.file, Some(PathBuf::from("/var/log/pgtuner.log")));
    }

    #[test]
    fn test_partial_config() {
        let config = load("[output]\nformat = conf\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Conf);
        assert!(config.output.include_profile);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_empty_log_file_is_unset() {
        let config = load("[logging]\nfile =\n").unwrap();
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_parse_bool_values() {
        for v in ["true", "TRUE", "yes", "1", "on", " on "] {
            assert_eq!(parse_bool(v), Some(true), "Expected '{}' to be true", v);
        }
        for v in ["false", "no", "0", "off"] {
            assert_eq!(parse_bool(v), Some(false), "Expected '{}' to be false", v);
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
