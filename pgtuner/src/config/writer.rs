//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    format!(
        r#"[output]
; How tuned settings are printed:
;   conf         - postgresql.conf lines (name = value)
;   alter-system - ALTER SYSTEM SET statements for psql
format = {}
; Start the output with comment lines describing the profile
include_profile = {}

[logging]
; Log file path. If empty, logs only go to stderr.
; Example: file = ~/.pgtuner/pgtuner.log
file = {}
"#,
        config.output.format, config.output.include_profile, log_file,
    )
}
