//! `pgtuner config` - inspect and change `~/.pgtuner/config.ini`.
//!
//! Only CLI preferences live there (output format, profile header, log file).
//! Tuning profiles are always given on the command line.

use clap::Subcommand;
use pgtuner::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

const UNSET: &str = "(not set)";

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get {
        /// Key as section.key, e.g. output.format
        key: String,
    },

    /// Validate and store one value
    Set {
        /// Key as section.key, e.g. output.format
        key: String,

        /// New value; an empty string unsets logging.file
        value: String,
    },

    /// Print every key grouped by section
    List,

    /// Print where the file lives
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let key = parse_key(&key)?;
            println!("{}", display_value(key, &current()));
        }
        ConfigCommands::Set { key, value } => {
            let key = parse_key(&key)?;
            let mut config = current();
            key.set(&mut config, &value)
                .map_err(|e| CliError::Config(e.to_string()))?;
            config.save()?;
            println!("Set {} = {}", key.name(), value);
        }
        ConfigCommands::List => print!("{}", listing(&current())),
        ConfigCommands::Path => println!("{}", config_file_path().display()),
    }
    Ok(())
}

/// The stored preferences. An unreadable file shows as defaults here so it
/// can be repaired with `config set`.
fn current() -> ConfigFile {
    ConfigFile::load().unwrap_or_default()
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'pgtuner config list' to see available keys.",
            key
        ))
    })
}

fn display_value(key: ConfigKey, config: &ConfigFile) -> String {
    let value = key.get(config);
    if value.is_empty() {
        UNSET.to_string()
    } else {
        value
    }
}

/// All keys under `[section]` headings, in declaration order.
fn listing(config: &ConfigFile) -> String {
    let mut out = String::from("Configuration Settings\n======================\n");
    let mut section = None;

    for key in ConfigKey::all() {
        if section != Some(key.section()) {
            section = Some(key.section());
            out.push_str(&format!("\n[{}]\n", key.section()));
        }
        out.push_str(&format!(
            "  {} = {}\n",
            key.key_name(),
            display_value(*key, config)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgtuner::OutputFormat;

    #[test]
    fn test_parse_key_known() {
        assert_eq!(parse_key("output.format").unwrap(), ConfigKey::OutputFormat);
    }

    #[test]
    fn test_parse_key_unknown_mentions_list() {
        let msg = parse_key("output.colour").unwrap_err().to_string();
        assert!(msg.contains("output.colour"));
        assert!(msg.contains("pgtuner config list"));
    }

    #[test]
    fn test_listing_groups_by_section() {
        let mut config = ConfigFile::default();
        config.output.format = OutputFormat::AlterSystem;

        let out = listing(&config);
        assert_eq!(out.matches("[output]").count(), 1);
        assert_eq!(out.matches("[logging]").count(), 1);
        assert!(out.contains("  format = alter-system\n"));
        assert!(out.contains("  include_profile = true\n"));
        assert!(out.contains("  file = (not set)\n"));
        assert!(out.find("[output]") < out.find("[logging]"));
    }
}
