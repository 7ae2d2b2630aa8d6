//! Names of the derived configuration parameters.

use std::fmt;
use std::str::FromStr;

/// Every parameter the engine can derive.
///
/// Which ones are present for a given profile depends on version, platform
/// and CPU gating; see [`crate::engine::recalculate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    // Memory-valued
    SharedBuffers,
    EffectiveCacheSize,
    MaintenanceWorkMem,
    WalBuffers,
    MinWalSize,
    MaxWalSize,
    WorkMem,

    // Scalar-valued
    MaxConnections,
    CheckpointCompletionTarget,
    RandomPageCost,
    DefaultStatisticsTarget,
    CheckpointSegments,
    EffectiveIoConcurrency,
    MaxWorkerProcesses,
    MaxParallelWorkersPerGather,
    MaxParallelWorkers,
    MaxParallelMaintenanceWorkers,
}

impl Parameter {
    pub fn all() -> &'static [Parameter] {
        &[
            Parameter::SharedBuffers,
            Parameter::EffectiveCacheSize,
            Parameter::MaintenanceWorkMem,
            Parameter::WalBuffers,
            Parameter::MinWalSize,
            Parameter::MaxWalSize,
            Parameter::WorkMem,
            Parameter::MaxConnections,
            Parameter::CheckpointCompletionTarget,
            Parameter::RandomPageCost,
            Parameter::DefaultStatisticsTarget,
            Parameter::CheckpointSegments,
            Parameter::EffectiveIoConcurrency,
            Parameter::MaxWorkerProcesses,
            Parameter::MaxParallelWorkersPerGather,
            Parameter::MaxParallelWorkers,
            Parameter::MaxParallelMaintenanceWorkers,
        ]
    }

    /// The name as written in postgresql.conf.
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::SharedBuffers => "shared_buffers",
            Parameter::EffectiveCacheSize => "effective_cache_size",
            Parameter::MaintenanceWorkMem => "maintenance_work_mem",
            Parameter::WalBuffers => "wal_buffers",
            Parameter::MinWalSize => "min_wal_size",
            Parameter::MaxWalSize => "max_wal_size",
            Parameter::WorkMem => "work_mem",
            Parameter::MaxConnections => "max_connections",
            Parameter::CheckpointCompletionTarget => "checkpoint_completion_target",
            Parameter::RandomPageCost => "random_page_cost",
            Parameter::DefaultStatisticsTarget => "default_statistics_target",
            Parameter::CheckpointSegments => "checkpoint_segments",
            Parameter::EffectiveIoConcurrency => "effective_io_concurrency",
            Parameter::MaxWorkerProcesses => "max_worker_processes",
            Parameter::MaxParallelWorkersPerGather => "max_parallel_workers_per_gather",
            Parameter::MaxParallelWorkers => "max_parallel_workers",
            Parameter::MaxParallelMaintenanceWorkers => "max_parallel_maintenance_workers",
        }
    }

    /// Whether the parameter holds a byte quantity.
    pub fn is_memory(&self) -> bool {
        matches!(
            self,
            Parameter::SharedBuffers
                | Parameter::EffectiveCacheSize
                | Parameter::MaintenanceWorkMem
                | Parameter::WalBuffers
                | Parameter::MinWalSize
                | Parameter::MaxWalSize
                | Parameter::WorkMem
        )
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = ();

    /// Exact, case-sensitive match on the postgresql.conf name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::all()
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or(())
    }
}
