//! CPU, memory and platform detection with fallbacks for unsupported hosts.

use std::path::Path;

use super::storage::detect_storage_class;
use crate::memory::{Memory, GB};
use crate::profile::{Platform, StorageClass};

/// Detected host information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Number of logical CPUs
    pub cpus: u32,
    /// Total system memory
    pub total_memory: Memory,
    /// Operating system family
    pub platform: Platform,
    /// Storage class of the data directory, if it could be determined
    pub storage: Option<StorageClass>,
}

impl SystemInfo {
    /// Detect the host. Storage is only probed when `data_dir` is given.
    pub fn detect(data_dir: Option<&Path>) -> Self {
        Self {
            cpus: detect_cpus(),
            total_memory: detect_total_memory(),
            platform: detect_platform(),
            storage: data_dir.and_then(detect_storage_class),
        }
    }

    /// Create SystemInfo with specific values (for testing).
    #[cfg(test)]
    pub fn new(
        cpus: u32,
        total_memory: Memory,
        platform: Platform,
        storage: Option<StorageClass>,
    ) -> Self {
        Self {
            cpus,
            total_memory,
            platform,
            storage,
        }
    }

    /// Memory rounded to whole gigabytes for display (e.g., "16 GB").
    pub fn memory_display(&self) -> String {
        let gb = (self.total_memory.bytes() + GB / 2) / GB;
        format!("{} GB", gb)
    }

    pub fn storage_display(&self) -> &'static str {
        match self.storage {
            Some(StorageClass::Ssd) => "SSD",
            Some(StorageClass::Hdd) => "HDD",
            Some(StorageClass::San) => "SAN",
            None => "Unknown",
        }
    }
}

/// Detect the number of logical CPUs.
///
/// Falls back to 4 if detection fails.
pub fn detect_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|p| u32::try_from(p.get()).unwrap_or(u32::MAX))
        .unwrap_or(4)
}

/// Detect total system memory.
///
/// # Platform Support
///
/// - **Linux**: Parses `/proc/meminfo`
/// - **Other platforms**: Returns fallback of 8GB
#[cfg(target_os = "linux")]
pub fn detect_total_memory() -> Memory {
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|content| parse_meminfo(&content))
        .unwrap_or(FALLBACK_MEMORY)
}

#[cfg(not(target_os = "linux"))]
pub fn detect_total_memory() -> Memory {
    FALLBACK_MEMORY
}

const FALLBACK_MEMORY: Memory = Memory::from_gb(8);

/// Extract `MemTotal` from /proc/meminfo content.
///
/// Format: "MemTotal:       16384000 kB"
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_meminfo(content: &str) -> Option<Memory> {
    let line = content.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kb = line.split_whitespace().nth(1)?.parse::<u64>().ok()?;
    Some(Memory::from_bytes(kb.checked_mul(1024)?))
}

/// Map the compile target to a platform. Unknown targets count as linux.
pub fn detect_platform() -> Platform {
    if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "macos") {
        Platform::Darwin
    } else {
        Platform::Linux
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_cpus_returns_positive() {
        assert!(detect_cpus() > 0, "Should detect at least 1 CPU");
    }

    #[test]
    fn test_detect_total_memory_returns_positive() {
        assert!(detect_total_memory().bytes() > 0, "Should detect some memory");
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "MemTotal:       16384000 kB\nMemFree:         1000 kB\n";
        assert_eq!(
            parse_meminfo(content),
            Some(Memory::from_bytes(16_384_000 * 1024))
        );
        assert_eq!(parse_meminfo("MemFree: 10 kB\n"), None);
        assert_eq!(parse_meminfo("MemTotal: lots kB\n"), None);
    }

    #[test]
    fn test_detected_platform_matches_target() {
        let platform = detect_platform();
        if cfg!(target_os = "linux") {
            assert_eq!(platform, Platform::Linux);
        }
    }

    #[test]
    fn test_display_formatting() {
        let info = SystemInfo::new(8, Memory::from_gb(16), Platform::Linux, Some(StorageClass::Ssd));
        assert_eq!(info.memory_display(), "16 GB");
        assert_eq!(info.storage_display(), "SSD");

        let odd = SystemInfo::new(2, Memory::from_bytes(16_384_000 * 1024), Platform::Linux, None);
        assert_eq!(odd.memory_display(), "16 GB");
        assert_eq!(odd.storage_display(), "Unknown");
    }
}
