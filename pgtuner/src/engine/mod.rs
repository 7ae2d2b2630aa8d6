//! Recalculation engine.
//!
//! [`recalculate`] is a pure function from a [`Profile`] to the full set of
//! derived tables. It always rebuilds everything: several parameters read
//! tables produced earlier in the same pass (`wal_buffers` reads
//! `shared_buffers`; `work_mem` reads `shared_buffers`, `max_connections` and
//! `max_parallel_workers_per_gather`), so the derivations run in a fixed
//! dependency order and there is no partial update path.
//!
//! # Gating
//!
//! | Parameter | Present when |
//! |-----------|--------------|
//! | `checkpoint_segments` | version < 9.5 |
//! | `min_wal_size`, `max_wal_size` | version >= 9.5 |
//! | `effective_io_concurrency` | platform is linux |
//! | `max_worker_processes` | version > 9.5 and cpus > 2 |
//! | `max_parallel_workers_per_gather` | version >= 9.6 and cpus > 2 |
//! | `max_parallel_workers` | version >= 10 and cpus > 2 |
//! | `max_parallel_maintenance_workers` | version >= 11 and cpus > 2 |
//! | `work_mem` | version > 9.5 |
//!
//! Everything else is always present.

pub mod formulas;
mod parameter;
mod table;
mod version_defaults;

pub use parameter::Parameter;
pub use table::{ByStorage, ByWorkload, CategoryTable};
pub use version_defaults::VersionDefaults;

use std::collections::BTreeMap;
use tracing::debug;

use crate::memory::Memory;
use crate::profile::{DbVersion, Platform, Profile};

/// Output of one recalculation pass.
///
/// Memory-valued and scalar-valued parameters live in separate maps; a
/// parameter is in at most one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedTables {
    memory: BTreeMap<Parameter, CategoryTable<Memory>>,
    scalar: BTreeMap<Parameter, CategoryTable<String>>,
}

impl DerivedTables {
    pub fn memory(&self, parameter: Parameter) -> Option<&CategoryTable<Memory>> {
        self.memory.get(&parameter)
    }

    pub fn scalar(&self, parameter: Parameter) -> Option<&CategoryTable<String>> {
        self.scalar.get(&parameter)
    }

    pub fn memory_parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.memory.keys().copied()
    }

    pub fn scalar_parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.scalar.keys().copied()
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.memory.contains_key(&parameter) || self.scalar.contains_key(&parameter)
    }

    /// Number of derived parameters.
    pub fn len(&self) -> usize {
        self.memory.len() + self.scalar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_memory(&mut self, parameter: Parameter, table: impl Into<CategoryTable<Memory>>) {
        self.memory.insert(parameter, table.into());
    }

    fn insert_scalar(&mut self, parameter: Parameter, table: impl Into<CategoryTable<String>>) {
        self.scalar.insert(parameter, table.into());
    }
}

/// Derive every parameter table for `profile`.
pub fn recalculate(profile: &Profile) -> DerivedTables {
    let mut tables = DerivedTables::default();

    let shared_buffers = formulas::shared_buffers(profile);
    let max_connections = formulas::max_connections(profile);

    tables.insert_memory(Parameter::SharedBuffers, shared_buffers.clone());
    tables.insert_scalar(Parameter::MaxConnections, max_connections.to_strings());
    tables.insert_memory(
        Parameter::EffectiveCacheSize,
        formulas::effective_cache_size(profile),
    );
    tables.insert_memory(
        Parameter::MaintenanceWorkMem,
        formulas::maintenance_work_mem(profile),
    );
    tables.insert_scalar(
        Parameter::CheckpointCompletionTarget,
        formulas::checkpoint_completion_target(),
    );
    tables.insert_scalar(Parameter::RandomPageCost, formulas::random_page_cost());
    tables.insert_memory(Parameter::WalBuffers, formulas::wal_buffers(&shared_buffers));
    tables.insert_scalar(
        Parameter::DefaultStatisticsTarget,
        formulas::default_statistics_target().to_strings(),
    );

    if profile.version < DbVersion::V9_5 {
        tables.insert_scalar(
            Parameter::CheckpointSegments,
            formulas::checkpoint_segments().to_strings(),
        );
    } else {
        tables.insert_memory(Parameter::MinWalSize, formulas::min_wal_size());
        tables.insert_memory(Parameter::MaxWalSize, formulas::max_wal_size());
    }

    if profile.platform == Platform::Linux {
        tables.insert_scalar(
            Parameter::EffectiveIoConcurrency,
            formulas::effective_io_concurrency().to_strings(),
        );
    }

    let mut per_gather = None;
    if profile.version > DbVersion::V9_5 && profile.cpus > 2 {
        tables.insert_scalar(
            Parameter::MaxWorkerProcesses,
            formulas::max_worker_processes(profile).to_strings(),
        );

        if profile.version >= DbVersion::V9_6 {
            let gather = formulas::max_parallel_workers_per_gather(profile);
            tables.insert_scalar(Parameter::MaxParallelWorkersPerGather, gather.to_strings());
            per_gather = Some(gather);
        }

        if profile.version >= DbVersion::V10 {
            tables.insert_scalar(
                Parameter::MaxParallelWorkers,
                formulas::max_parallel_workers(profile).to_strings(),
            );
        }

        if profile.version >= DbVersion::V11 {
            tables.insert_scalar(
                Parameter::MaxParallelMaintenanceWorkers,
                formulas::max_parallel_maintenance_workers(profile).to_strings(),
            );
        }
    }

    if profile.version > DbVersion::V9_5 {
        tables.insert_memory(
            Parameter::WorkMem,
            formulas::work_mem(
                profile,
                &shared_buffers,
                &max_connections,
                per_gather.as_ref(),
            ),
        );
    }

    debug!(
        workload = %profile.workload_type,
        version = %profile.version,
        platform = %profile.platform,
        memory = %profile.total_memory,
        connections = profile.connections,
        storage = %profile.storage,
        cpus = profile.cpus,
        memory_parameters = tables.memory.len(),
        scalar_parameters = tables.scalar.len(),
        "Recalculated settings"
    );

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{StorageClass, WorkloadType};

    fn tables_for(version: &str, platform: &str, cpu: &str) -> DerivedTables {
        let profile = Profile::parse("web", version, platform, "16GB", "", "ssd", cpu).unwrap();
        recalculate(&profile)
    }

    #[test]
    fn test_always_present_parameters() {
        let tables = tables_for("9.4", "windows", "");
        for p in [
            Parameter::SharedBuffers,
            Parameter::EffectiveCacheSize,
            Parameter::MaintenanceWorkMem,
            Parameter::WalBuffers,
            Parameter::MaxConnections,
            Parameter::CheckpointCompletionTarget,
            Parameter::RandomPageCost,
            Parameter::DefaultStatisticsTarget,
        ] {
            assert!(tables.contains(p), "{} should always be derived", p);
        }
    }

    #[test]
    fn test_wal_sizing_gated_on_version() {
        let old = tables_for("9.4", "linux", "");
        assert!(old.scalar(Parameter::CheckpointSegments).is_some());
        assert!(old.memory(Parameter::MinWalSize).is_none());
        assert!(old.memory(Parameter::MaxWalSize).is_none());

        let new = tables_for("9.5", "linux", "");
        assert!(new.scalar(Parameter::CheckpointSegments).is_none());
        assert!(new.memory(Parameter::MinWalSize).is_some());
        assert!(new.memory(Parameter::MaxWalSize).is_some());
    }

    #[test]
    fn test_io_concurrency_linux_only() {
        assert!(tables_for("14", "linux", "").contains(Parameter::EffectiveIoConcurrency));
        assert!(!tables_for("14", "darwin", "").contains(Parameter::EffectiveIoConcurrency));
        assert!(!tables_for("14", "windows", "").contains(Parameter::EffectiveIoConcurrency));
    }

    #[test]
    fn test_cpu_gating() {
        let few = tables_for("14", "linux", "2");
        assert!(!few.contains(Parameter::MaxWorkerProcesses));
        assert!(!few.contains(Parameter::MaxParallelWorkersPerGather));

        let v95 = tables_for("9.5", "linux", "8");
        assert!(!v95.contains(Parameter::MaxWorkerProcesses));

        let v96 = tables_for("9.6", "linux", "8");
        assert!(v96.contains(Parameter::MaxWorkerProcesses));
        assert!(v96.contains(Parameter::MaxParallelWorkersPerGather));
        assert!(!v96.contains(Parameter::MaxParallelWorkers));

        let v10 = tables_for("10", "linux", "8");
        assert!(v10.contains(Parameter::MaxParallelWorkers));
        assert!(!v10.contains(Parameter::MaxParallelMaintenanceWorkers));

        let v11 = tables_for("11", "linux", "8");
        assert!(v11.contains(Parameter::MaxParallelMaintenanceWorkers));
    }

    #[test]
    fn test_work_mem_gated_on_version() {
        assert!(!tables_for("9.5", "linux", "").contains(Parameter::WorkMem));
        assert!(tables_for("9.6", "linux", "").contains(Parameter::WorkMem));
    }

    #[test]
    fn test_memory_and_scalar_are_disjoint() {
        let tables = tables_for("14", "linux", "16");
        for p in tables.memory_parameters() {
            assert!(tables.scalar(p).is_none());
            assert!(p.is_memory());
        }
        for p in tables.scalar_parameters() {
            assert!(!p.is_memory());
        }
        assert_eq!(tables.len(), 16);
    }

    #[test]
    fn test_storage_keyed_tables_stringified() {
        let tables = tables_for("14", "linux", "");
        let cost = tables.scalar(Parameter::RandomPageCost).unwrap();
        assert_eq!(cost.resolve(WorkloadType::Web, StorageClass::Hdd), "4");
        let io = tables.scalar(Parameter::EffectiveIoConcurrency).unwrap();
        assert_eq!(io.resolve(WorkloadType::Web, StorageClass::San), "300");
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let profile = Profile::parse("oltp", "12", "linux", "64GB", "400", "hdd", "12").unwrap();
        assert_eq!(recalculate(&profile), recalculate(&profile));
    }
}
