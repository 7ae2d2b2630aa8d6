//! Host hardware detection.
//!
//! Fills in the profile inputs a user leaves out on the command line: CPU
//! count, total memory, platform and, on Linux, the storage class backing the
//! data directory. Only the hardware is inspected; nothing here talks to a
//! running database.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use pgtuner::system::SystemInfo;
//!
//! let info = SystemInfo::detect(Some(Path::new("/tmp")));
//!
//! println!("CPUs: {}", info.cpus);
//! println!("Memory: {}", info.memory_display());
//! println!("Storage: {}", info.storage_display());
//! ```

mod hardware;
mod storage;

pub use hardware::{detect_cpus, detect_platform, detect_total_memory, SystemInfo};
pub use storage::detect_storage_class;
