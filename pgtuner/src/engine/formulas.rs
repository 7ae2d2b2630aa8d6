//! Per-parameter formulas.
//!
//! Each function derives one parameter's table from the profile and, where a
//! parameter depends on another, from the earlier table passed in. The order
//! of evaluation lives in [`super::recalculate`].

use tracing::debug;

use super::table::{ByStorage, ByWorkload};
use super::version_defaults::VersionDefaults;
use crate::memory::{Memory, GB, MB};
use crate::profile::{DbVersion, Platform, Profile, WorkloadType};

// =============================================================================
// Limits
// =============================================================================

/// shared_buffers cap on Windows before version 10.
pub const WINDOWS_SHARED_BUFFERS_LIMIT: u64 = 512 * MB;

/// maintenance_work_mem cap.
pub const MAINTENANCE_WORK_MEM_LIMIT: u64 = 2 * GB;

/// maintenance_work_mem cap on Windows.
pub const WINDOWS_MAINTENANCE_WORK_MEM_LIMIT: u64 = 2 * GB - MB;

/// wal_buffers ceiling.
pub const WAL_BUFFERS_MAX: u64 = 16 * MB;

/// Values above this (and below the ceiling) snap up to the ceiling.
pub const WAL_BUFFERS_SNAP_THRESHOLD: u64 = 14 * MB;

/// wal_buffers floor, in bytes.
pub const WAL_BUFFERS_MIN: u64 = 32;

/// Cap on per-gather and maintenance parallel workers.
pub const PARALLEL_WORKERS_CAP: u32 = 4;

// =============================================================================
// Memory-valued
// =============================================================================

/// `memory * numerator / denominator` without intermediate overflow.
fn fraction(memory: Memory, numerator: u64, denominator: u64) -> Memory {
    let bytes = u128::from(memory.bytes()) * u128::from(numerator) / u128::from(denominator);
    Memory::from_bytes(bytes as u64)
}

/// A quarter of memory, a sixteenth for desktops.
pub fn shared_buffers(profile: &Profile) -> ByWorkload<Memory> {
    let table = ByWorkload::from_fn(|wt| match wt {
        WorkloadType::Desktop => fraction(profile.total_memory, 1, 16),
        _ => fraction(profile.total_memory, 1, 4),
    });

    if profile.version < DbVersion::V10 && profile.platform == Platform::Windows {
        return table.map(|wt, mem| {
            if mem.bytes() > WINDOWS_SHARED_BUFFERS_LIMIT {
                debug!(
                    workload = %wt,
                    requested = %mem,
                    "shared_buffers capped at 512MB on windows before version 10"
                );
                Memory::from_bytes(WINDOWS_SHARED_BUFFERS_LIMIT)
            } else {
                *mem
            }
        });
    }
    table
}

/// Three quarters of memory, a quarter for desktops.
pub fn effective_cache_size(profile: &Profile) -> ByWorkload<Memory> {
    ByWorkload::from_fn(|wt| match wt {
        WorkloadType::Desktop => fraction(profile.total_memory, 1, 4),
        _ => fraction(profile.total_memory, 3, 4),
    })
}

/// A sixteenth of memory (an eighth for data warehouses), capped at 2GB.
pub fn maintenance_work_mem(profile: &Profile) -> ByWorkload<Memory> {
    let limit = match profile.platform {
        Platform::Windows => WINDOWS_MAINTENANCE_WORK_MEM_LIMIT,
        _ => MAINTENANCE_WORK_MEM_LIMIT,
    };

    ByWorkload::from_fn(|wt| {
        let mem = match wt {
            WorkloadType::Dw => fraction(profile.total_memory, 1, 8),
            _ => fraction(profile.total_memory, 1, 16),
        };
        if mem.bytes() > limit {
            debug!(workload = %wt, requested = %mem, limit, "maintenance_work_mem capped");
            Memory::from_bytes(limit)
        } else {
            mem
        }
    })
}

/// 3% of the matching shared_buffers, kept within [32 bytes, 16MB].
pub fn wal_buffers(shared_buffers: &ByWorkload<Memory>) -> ByWorkload<Memory> {
    shared_buffers.map(|wt, sb| {
        let mut bytes = 3 * sb.bytes() / 100;
        if bytes > WAL_BUFFERS_MAX {
            bytes = WAL_BUFFERS_MAX;
        }
        if bytes > WAL_BUFFERS_SNAP_THRESHOLD && bytes < WAL_BUFFERS_MAX {
            debug!(workload = %wt, requested = bytes, "wal_buffers snapped up to 16MB");
            bytes = WAL_BUFFERS_MAX;
        }
        if bytes < WAL_BUFFERS_MIN {
            bytes = WAL_BUFFERS_MIN;
        }
        Memory::from_bytes(bytes)
    })
}

pub fn min_wal_size() -> ByWorkload<Memory> {
    ByWorkload::new([
        Memory::from_mb(1024),
        Memory::from_mb(2048),
        Memory::from_mb(4096),
        Memory::from_mb(1024),
        Memory::from_mb(100),
    ])
}

pub fn max_wal_size() -> ByWorkload<Memory> {
    ByWorkload::new([
        Memory::from_mb(4096),
        Memory::from_mb(8192),
        Memory::from_mb(16384),
        Memory::from_mb(4096),
        Memory::from_mb(2048),
    ])
}

/// Memory left after shared_buffers, spread over three sorts per connection
/// and per parallel worker, then scaled down by workload.
///
/// `per_gather` is the derived max_parallel_workers_per_gather table, if any;
/// otherwise the version's server default is used.
pub fn work_mem(
    profile: &Profile,
    shared_buffers: &ByWorkload<Memory>,
    max_connections: &ByWorkload<u32>,
    per_gather: Option<&ByWorkload<u32>>,
) -> ByWorkload<Memory> {
    let fallback = VersionDefaults::for_version(profile.version).work_mem_parallelism();

    ByWorkload::from_fn(|wt| {
        let parallelism = per_gather.map_or(fallback, |t| t[wt]).max(1);
        let connections = u64::from(max_connections[wt].max(1));
        let available = profile.total_memory.bytes() - shared_buffers[wt].bytes();

        let base = available / (connections * 3) / u64::from(parallelism);
        let scaled = match wt {
            WorkloadType::Web | WorkloadType::Oltp => base,
            WorkloadType::Dw | WorkloadType::Mixed => base / 2,
            WorkloadType::Desktop => base / 6,
        };
        Memory::from_bytes(scaled).floor_kb()
    })
}

// =============================================================================
// Scalar-valued
// =============================================================================

/// Per-workload defaults, or the requested connection count everywhere.
pub fn max_connections(profile: &Profile) -> ByWorkload<u32> {
    if profile.connections > 0 {
        return ByWorkload::uniform(profile.connections);
    }
    ByWorkload::new([200, 300, 40, 100, 20])
}

pub fn checkpoint_completion_target() -> ByWorkload<String> {
    ByWorkload::uniform("0.9".to_string())
}

pub fn random_page_cost() -> ByStorage<String> {
    ByStorage::new(["1.1".to_string(), "4".to_string(), "1.1".to_string()])
}

pub fn default_statistics_target() -> ByWorkload<u32> {
    ByWorkload::new([100, 100, 500, 100, 100])
}

/// Only meaningful before 9.5, where WAL sizing was segment based.
pub fn checkpoint_segments() -> ByWorkload<u32> {
    ByWorkload::new([32, 64, 128, 32, 3])
}

/// Only meaningful on Linux.
pub fn effective_io_concurrency() -> ByStorage<u32> {
    ByStorage::new([200, 2, 300])
}

pub fn max_worker_processes(profile: &Profile) -> ByWorkload<u32> {
    ByWorkload::uniform(profile.cpus)
}

/// Half the CPUs rounded up, capped at 4 unless the profile is a data warehouse.
pub fn max_parallel_workers_per_gather(profile: &Profile) -> ByWorkload<u32> {
    let workers = profile.cpus.div_ceil(2);
    let workers = if profile.workload_type != WorkloadType::Dw {
        workers.min(PARALLEL_WORKERS_CAP)
    } else {
        workers
    };
    ByWorkload::uniform(workers)
}

pub fn max_parallel_workers(profile: &Profile) -> ByWorkload<u32> {
    ByWorkload::uniform(profile.cpus)
}

/// Half the CPUs rounded up, capped at 4.
pub fn max_parallel_maintenance_workers(profile: &Profile) -> ByWorkload<u32> {
    ByWorkload::uniform(profile.cpus.div_ceil(2).min(PARALLEL_WORKERS_CAP))
}
