//! Server defaults for the parallelism settings, per engine version.
//!
//! Keyed by the exact [`DbVersion`], so 9.4, 9.5 and 9.6 each get their own
//! entry instead of collapsing onto a truncated major number.

use crate::profile::DbVersion;

/// Built-in server defaults that the engine falls back to.
///
/// `None` means the setting does not exist in that version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionDefaults {
    pub max_worker_processes: Option<u32>,
    pub max_parallel_workers_per_gather: Option<u32>,
    pub max_parallel_workers: Option<u32>,
}

impl VersionDefaults {
    pub const fn for_version(version: DbVersion) -> Self {
        match version {
            DbVersion::V9_4 => Self {
                max_worker_processes: None,
                max_parallel_workers_per_gather: None,
                max_parallel_workers: None,
            },
            DbVersion::V9_5 => Self {
                max_worker_processes: Some(8),
                max_parallel_workers_per_gather: None,
                max_parallel_workers: None,
            },
            DbVersion::V9_6 => Self {
                max_worker_processes: Some(8),
                max_parallel_workers_per_gather: Some(0),
                max_parallel_workers: None,
            },
            DbVersion::V10 | DbVersion::V11 | DbVersion::V12 | DbVersion::V13 | DbVersion::V14 => {
                Self {
                    max_worker_processes: Some(8),
                    max_parallel_workers_per_gather: Some(2),
                    max_parallel_workers: Some(8),
                }
            }
        }
    }

    /// Divisor used by `work_mem` when no per-gather worker count was derived.
    ///
    /// A missing or zero default counts as 1.
    pub fn work_mem_parallelism(&self) -> u32 {
        match self.max_parallel_workers_per_gather {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_ten_versions_are_distinct() {
        let v94 = VersionDefaults::for_version(DbVersion::V9_4);
        let v95 = VersionDefaults::for_version(DbVersion::V9_5);
        let v96 = VersionDefaults::for_version(DbVersion::V9_6);
        assert_ne!(v94, v95);
        assert_ne!(v95, v96);
        assert_eq!(v96.max_parallel_workers_per_gather, Some(0));
    }

    #[test]
    fn test_modern_versions_share_defaults() {
        let v10 = VersionDefaults::for_version(DbVersion::V10);
        for v in [DbVersion::V11, DbVersion::V12, DbVersion::V13, DbVersion::V14] {
            assert_eq!(VersionDefaults::for_version(v), v10);
        }
        assert_eq!(v10.max_parallel_workers, Some(8));
    }

    #[test]
    fn test_work_mem_parallelism() {
        assert_eq!(VersionDefaults::for_version(DbVersion::V9_4).work_mem_parallelism(), 1);
        assert_eq!(VersionDefaults::for_version(DbVersion::V9_6).work_mem_parallelism(), 1);
        assert_eq!(VersionDefaults::for_version(DbVersion::V13).work_mem_parallelism(), 2);
    }
}
