//! Tune command - derive settings for a profile and print them.
//!
//! Profile values given on the command line are passed to the library as-is
//! so it can validate them. Memory, CPU count, platform and (with
//! `--data-dir`) storage fall back to host detection when omitted.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pgtuner::profile::DbVersion;
use pgtuner::system::SystemInfo;
use pgtuner::{render, Tuner};

use super::common::{resolve_format, resolve_include_profile, FormatArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the tune command.
#[derive(Debug, Args)]
pub struct TuneArgs {
    /// Workload type: web, oltp, dw, mixed, desktop
    #[arg(long = "type", default_value = "web")]
    pub workload_type: String,

    /// Engine version: 9.4, 9.5, 9.6, 10, 11, 12, 13, 14 (default: latest)
    #[arg(long = "version")]
    pub db_version: Option<String>,

    /// Platform: linux, darwin, windows (default: this host)
    #[arg(long)]
    pub platform: Option<String>,

    /// Total memory, e.g. 16GB or 512MB (default: this host)
    #[arg(long)]
    pub memory: Option<String>,

    /// Connection count (default: per workload type)
    #[arg(long)]
    pub connections: Option<String>,

    /// Storage class: ssd, hdd, san (default: detected from --data-dir, else ssd)
    #[arg(long)]
    pub storage: Option<String>,

    /// CPU count (default: this host)
    #[arg(long, alias = "cpu")]
    pub cpus: Option<String>,

    /// Data directory used to detect the storage class
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output format (default: from config, else conf)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Print only this setting's value
    #[arg(long)]
    pub setting: Option<String>,

    /// Omit the profile header
    #[arg(long)]
    pub no_header: bool,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// The seven raw profile inputs after host fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInputs {
    pub workload_type: String,
    pub version: String,
    pub platform: String,
    pub memory: String,
    pub connections: String,
    pub storage: String,
    pub cpus: String,
}

impl ProfileInputs {
    /// Fill omitted values from `host`, if detection ran.
    pub fn resolve(args: &TuneArgs, host: Option<&SystemInfo>) -> Self {
        let from_host = |value: &Option<String>, detected: Option<String>| {
            value.clone().or(detected).unwrap_or_default()
        };

        Self {
            workload_type: args.workload_type.clone(),
            version: args
                .db_version
                .clone()
                .unwrap_or_else(|| DbVersion::LATEST.to_string()),
            platform: from_host(&args.platform, host.map(|h| h.platform.to_string())),
            memory: from_host(&args.memory, host.map(|h| h.total_memory.to_string())),
            connections: args.connections.clone().unwrap_or_default(),
            storage: args
                .storage
                .clone()
                .or_else(|| host.and_then(|h| h.storage).map(|s| s.to_string()))
                .unwrap_or_else(|| "ssd".to_string()),
            cpus: from_host(&args.cpus, host.map(|h| h.cpus.to_string())),
        }
    }

    pub fn build(&self) -> Result<Tuner, CliError> {
        Ok(Tuner::new(
            &self.workload_type,
            &self.version,
            &self.platform,
            &self.memory,
            &self.connections,
            &self.storage,
            &self.cpus,
        )?)
    }
}

/// Whether any omitted input needs host detection.
fn needs_detection(args: &TuneArgs) -> bool {
    args.memory.is_none()
        || args.cpus.is_none()
        || args.platform.is_none()
        || (args.storage.is_none() && args.data_dir.is_some())
}

/// Run the tune command.
pub fn run(args: TuneArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("tune");

    let host = needs_detection(&args).then(|| SystemInfo::detect(args.data_dir.as_deref()));
    if let Some(info) = &host {
        debug!(
            cpus = info.cpus,
            memory = %info.total_memory,
            platform = %info.platform,
            storage = info.storage_display(),
            "Detected host"
        );
    }

    let inputs = ProfileInputs::resolve(&args, host.as_ref());
    let tuner = inputs.build()?;
    info!(settings = tuner.tables().len(), "Derived settings");

    let output = match &args.setting {
        Some(name) => format!("{}\n", tuner.get_setting(name)?),
        None => render(
            &tuner,
            resolve_format(args.format, runner.config()),
            resolve_include_profile(args.no_header, runner.config()),
        ),
    };

    match &args.output {
        Some(path) => write_output(path, &output),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    std::fs::write(path, content).map_err(|e| CliError::FileWrite {
        path: path.display().to_string(),
        error: e,
    })?;
    info!("Settings written to {}", path.display());
    Ok(())
}
