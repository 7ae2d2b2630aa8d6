//! Detect command - shows the host values `tune` would fill in.

use std::path::Path;

use crate::error::CliError;
use crate::runner::CliRunner;
use pgtuner::system::SystemInfo;

/// Run the detect command.
pub fn run(data_dir: Option<&Path>, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("detect");

    let info = SystemInfo::detect(data_dir);

    println!("Host Detection");
    println!("==============");
    println!();
    println!("  cpu      = {}", info.cpus);
    println!(
        "  memory   = {} ({})",
        info.total_memory,
        info.memory_display()
    );
    println!("  platform = {}", info.platform);
    match data_dir {
        Some(dir) => println!("  storage  = {} ({})", info.storage_display(), dir.display()),
        None => println!("  storage  = (pass --data-dir to detect)"),
    }

    Ok(())
}
