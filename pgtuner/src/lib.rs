//! pgtuner - PostgreSQL configuration from a hardware and workload profile
//!
//! This library derives recommended server settings (memory sizes, planner
//! costs, WAL sizing, parallelism) from seven inputs: workload type, engine
//! version, platform, total memory, connection count, storage class and CPU
//! count. The derivation is pure and deterministic.
//!
//! # High-Level API
//!
//! For most use cases, [`Tuner`] is the entry point:
//!
//! ```
//! use pgtuner::Tuner;
//!
//! let tuner = Tuner::new("web", "13", "linux", "16GB", "", "ssd", "4")?;
//!
//! assert_eq!(tuner.get_memory_setting("shared_buffers")?, "4GB");
//! assert_eq!(tuner.get_string_setting("max_connections")?, "200");
//!
//! for (name, value) in tuner.all_settings() {
//!     println!("{} = {}", name, value);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod engine;
pub mod logging;
pub mod memory;
pub mod profile;
pub mod render;
pub mod system;
pub mod tuner;

pub use memory::{Memory, MemoryParseError};
pub use profile::{
    DbVersion, Platform, Profile, ProfileField, StorageClass, ValidationError, WorkloadType,
};
pub use render::{render, OutputFormat};
pub use tuner::{NotFoundError, Tuner};

/// Version of the pgtuner library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports_compose() {
        let tuner = Tuner::new("desktop", "9.6", "windows", "512MB", "", "hdd", "").unwrap();
        assert_eq!(tuner.profile().total_memory, Memory::from_mb(512));
        assert_eq!(tuner.get_memory_setting("shared_buffers").unwrap(), "32MB");
        assert_eq!(tuner.get_string_setting("random_page_cost").unwrap(), "4");
    }
}
