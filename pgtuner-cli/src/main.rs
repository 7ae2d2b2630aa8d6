//! pgtuner CLI - Command-line interface
//!
//! This binary derives PostgreSQL settings from a hardware and workload
//! profile using the pgtuner library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::config::ConfigCommands;
use commands::tune::TuneArgs;

#[derive(Parser)]
#[command(name = "pgtuner")]
#[command(version = pgtuner::VERSION)]
#[command(about = "Recommend PostgreSQL settings for a hardware and workload profile", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive settings for a profile
    Tune(TuneArgs),

    /// Show the host values used when profile options are omitted
    Detect {
        /// Data directory used to detect the storage class
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// View or change CLI preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tune(args) => commands::tune::run(args, cli.debug),
        Commands::Detect { data_dir } => commands::detect::run(data_dir.as_deref(), cli.debug),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
