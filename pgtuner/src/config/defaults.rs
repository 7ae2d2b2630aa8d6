//! Default values for all configuration settings.

use super::settings::*;
use crate::render::OutputFormat;

/// Default output format.
pub const DEFAULT_OUTPUT_FORMAT: OutputFormat = OutputFormat::Conf;

/// Whether output starts with a profile header by default.
pub const DEFAULT_INCLUDE_PROFILE: bool = true;

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_OUTPUT_FORMAT,
            include_profile: DEFAULT_INCLUDE_PROFILE,
        }
    }
}
