//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use pgtuner::config::ConfigFile;
use pgtuner::OutputFormat;

/// Output format selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// postgresql.conf lines (name = value)
    Conf,
    /// ALTER SYSTEM SET statements for psql
    AlterSystem,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Conf => OutputFormat::Conf,
            FormatArg::AlterSystem => OutputFormat::AlterSystem,
        }
    }
}

/// Resolve output format from CLI args and config.
pub fn resolve_format(cli_format: Option<FormatArg>, config: &ConfigFile) -> OutputFormat {
    cli_format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format)
}

/// Resolve the profile header flag from CLI args and config.
pub fn resolve_include_profile(no_header: bool, config: &ConfigFile) -> bool {
    !no_header && config.output.include_profile
}
