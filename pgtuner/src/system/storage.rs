//! Storage class detection for a data directory.
//!
//! # Detection Method (Linux)
//!
//! 1. Read the device number of the path (or its parent if it doesn't exist)
//! 2. Find the block device with that major:minor under `/sys/block`
//! 3. Check `/sys/block/<device>/queue/rotational`: 1 is an HDD, 0 an SSD
//!
//! SAN volumes look like ordinary block devices to the kernel, so they are
//! never detected; pass `--storage san` explicitly.

use std::path::Path;
use tracing::debug;

#[cfg(not(target_os = "linux"))]
use tracing::warn;

use crate::profile::StorageClass;

/// Detect the storage class of the device holding `path`.
///
/// Returns `None` if detection fails.
#[cfg(target_os = "linux")]
pub fn detect_storage_class(path: &Path) -> Option<StorageClass> {
    use std::fs;
    use std::os::unix::fs::MetadataExt;

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            debug!("Failed to get metadata for {:?}: {}", path, e);
            let parent = path.parent()?;
            fs::metadata(parent)
                .map_err(|e| debug!("Failed to get metadata for parent {:?}: {}", parent, e))
                .ok()?
        }
    };

    let (major, minor) = split_dev(metadata.dev());
    debug!("Path {:?} is on device {}:{}", path, major, minor);

    let block_device = find_block_device(major, minor)?;
    debug!("Found block device: {}", block_device);

    let rotational_path = format!("/sys/block/{}/queue/rotational", block_device);
    match fs::read_to_string(&rotational_path) {
        Ok(content) => {
            let class = parse_rotational(&content);
            debug!(device = %block_device, storage = %class, "Detected storage class");
            Some(class)
        }
        Err(e) => {
            debug!(
                "Failed to read rotational status from {}: {}",
                rotational_path, e
            );
            None
        }
    }
}

/// Fallback for non-Linux platforms - always returns None.
#[cfg(not(target_os = "linux"))]
pub fn detect_storage_class(path: &Path) -> Option<StorageClass> {
    warn!(
        "Storage detection not supported on this platform, ignoring {:?}",
        path
    );
    None
}

/// Decode a Linux `dev_t` into major and minor numbers.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn split_dev(dev: u64) -> (u32, u32) {
    let major = ((dev >> 8) & 0xfff) | ((dev >> 32) & !0xfff);
    let minor = (dev & 0xff) | ((dev >> 12) & !0xff);
    (major as u32, minor as u32)
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_rotational(content: &str) -> StorageClass {
    if content.trim() == "1" {
        StorageClass::Hdd
    } else {
        StorageClass::Ssd
    }
}

/// Find the whole-disk block device for the given major:minor numbers.
///
/// Partitions (e.g., sda1, nvme0n1p1) resolve to their parent disk, since
/// only the disk has a `queue` directory.
#[cfg(target_os = "linux")]
fn find_block_device(major: u32, minor: u32) -> Option<String> {
    use std::fs;

    let expected = format!("{}:{}", major, minor);
    let matches = |dev_file: &Path| {
        fs::read_to_string(dev_file)
            .map(|content| content.trim() == expected)
            .unwrap_or(false)
    };

    let block_dir = match fs::read_dir("/sys/block") {
        Ok(dir) => dir,
        Err(e) => {
            debug!("Failed to read /sys/block: {}", e);
            return None;
        }
    };

    for entry in block_dir.flatten() {
        let device_name = entry.file_name().to_string_lossy().to_string();
        let device_path = entry.path();

        if matches(&device_path.join("dev")) {
            return Some(device_name);
        }

        if let Ok(children) = fs::read_dir(&device_path) {
            for child in children.flatten() {
                let child_name = child.file_name().to_string_lossy().to_string();
                if child_name.starts_with(&device_name) && matches(&child.path().join("dev")) {
                    return Some(device_name);
                }
            }
        }
    }

    None
}
