//! The validated tuning request.
//!
//! A [`Profile`] describes the server to tune: workload type, engine version,
//! platform, total memory, connection count, storage class and CPU count.
//! Raw strings are validated field by field through [`ProfileField`]; the
//! typed fields can then only hold members of their closed value sets.
//!
//! # Example
//!
//! ```
//! use pgtuner::profile::{DbVersion, Profile, WorkloadType};
//!
//! let profile = Profile::parse("web", "13", "linux", "16GB", "", "ssd", "4").unwrap();
//! assert_eq!(profile.workload_type, WorkloadType::Web);
//! assert_eq!(profile.version, DbVersion::V13);
//! assert_eq!(profile.connections, 0); // unspecified
//! ```

mod field;
mod types;

pub use field::{ProfileField, ValidationError};
pub use types::{DbVersion, Platform, StorageClass, WorkloadType};

use crate::memory::Memory;

/// A validated tuning request.
///
/// `connections` and `cpus` use 0 for "unspecified": connections then fall
/// back to per-workload defaults, and CPU-driven settings are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub workload_type: WorkloadType,
    pub version: DbVersion,
    pub platform: Platform,
    pub total_memory: Memory,
    pub connections: u32,
    pub storage: StorageClass,
    pub cpus: u32,
}

impl Profile {
    /// Validate seven raw inputs in fixed order, stopping at the first error.
    ///
    /// Empty strings are accepted only for `connections` and `cpu`.
    pub fn parse(
        workload_type: &str,
        version: &str,
        platform: &str,
        total_memory: &str,
        connections: &str,
        storage: &str,
        cpu: &str,
    ) -> Result<Self, ValidationError> {
        let raw = [
            workload_type,
            version,
            platform,
            total_memory,
            connections,
            storage,
            cpu,
        ];

        let mut profile = Profile::blank();
        for (field, value) in ProfileField::all().iter().zip(raw) {
            field.set(&mut profile, value)?;
        }
        Ok(profile)
    }

    /// Starting point for field-by-field construction; never handed out.
    pub(crate) fn blank() -> Self {
        Self {
            workload_type: WorkloadType::Web,
            version: DbVersion::LATEST,
            platform: Platform::Linux,
            total_memory: Memory::default(),
            connections: 0,
            storage: StorageClass::Ssd,
            cpus: 0,
        }
    }
}
