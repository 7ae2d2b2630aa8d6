//! The tuner aggregate: a validated profile plus its derived settings.
//!
//! A [`Tuner`] is built from the seven raw profile inputs and always holds
//! tables that match its current profile. Every setter validates its input,
//! stores it, and rebuilds the tables with [`engine::recalculate`]. A failed
//! setter leaves both the profile and the tables as they were.
//!
//! # Example
//!
//! ```
//! use pgtuner::Tuner;
//!
//! let mut tuner = Tuner::new("web", "13", "linux", "16GB", "", "ssd", "4").unwrap();
//! assert_eq!(tuner.get_memory_setting("shared_buffers").unwrap(), "4GB");
//!
//! tuner.set_workload_type("desktop").unwrap();
//! assert_eq!(tuner.get_memory_setting("shared_buffers").unwrap(), "1GB");
//! ```

use std::collections::BTreeMap;
use thiserror::Error;

use crate::engine::{self, DerivedTables, Parameter};
use crate::profile::{Profile, ProfileField, ValidationError};

/// A single-key lookup named a parameter that is not derived for the
/// current profile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid setting name: {0}")]
pub struct NotFoundError(pub String);

/// Profile and derived settings, kept in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuner {
    profile: Profile,
    tables: DerivedTables,
}

impl Tuner {
    /// Validate the seven raw inputs in order and derive every setting.
    ///
    /// `connections` and `cpu` may be empty to mean "unspecified".
    pub fn new(
        workload_type: &str,
        version: &str,
        platform: &str,
        total_memory: &str,
        connections: &str,
        storage: &str,
        cpu: &str,
    ) -> Result<Self, ValidationError> {
        let profile = Profile::parse(
            workload_type,
            version,
            platform,
            total_memory,
            connections,
            storage,
            cpu,
        )?;
        Ok(Self::from_profile(profile))
    }

    pub fn from_profile(profile: Profile) -> Self {
        let tables = engine::recalculate(&profile);
        Self { profile, tables }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn tables(&self) -> &DerivedTables {
        &self.tables
    }

    /// Rebuild every derived table from the current profile.
    pub fn recalculate(&mut self) {
        self.tables = engine::recalculate(&self.profile);
    }

    /// Validate and store one field, then recalculate.
    pub fn set(&mut self, field: ProfileField, value: &str) -> Result<(), ValidationError> {
        let mut profile = self.profile.clone();
        field.set(&mut profile, value)?;
        self.profile = profile;
        self.recalculate();
        Ok(())
    }

    pub fn set_workload_type(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::WorkloadType, value)
    }

    pub fn set_version(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::Version, value)
    }

    pub fn set_platform(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::Platform, value)
    }

    pub fn set_total_memory(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::TotalMemory, value)
    }

    pub fn set_connections(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::Connections, value)
    }

    pub fn set_storage(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::Storage, value)
    }

    pub fn set_cpus(&mut self, value: &str) -> Result<(), ValidationError> {
        self.set(ProfileField::Cpus, value)
    }

    /// Formatted value of a memory-valued setting for the active profile.
    pub fn get_memory_setting(&self, name: &str) -> Result<String, NotFoundError> {
        let parameter = parse_parameter(name)?;
        self.memory_value(parameter)
            .ok_or_else(|| NotFoundError(name.to_string()))
    }

    /// Value of a scalar setting for the active profile.
    pub fn get_string_setting(&self, name: &str) -> Result<String, NotFoundError> {
        let parameter = parse_parameter(name)?;
        self.scalar_value(parameter)
            .ok_or_else(|| NotFoundError(name.to_string()))
    }

    /// Either kind of setting, memory first.
    pub fn get_setting(&self, name: &str) -> Result<String, NotFoundError> {
        let parameter = parse_parameter(name)?;
        self.memory_value(parameter)
            .or_else(|| self.scalar_value(parameter))
            .ok_or_else(|| NotFoundError(name.to_string()))
    }

    /// Every derived setting, keyed by name.
    ///
    /// Never fails: a key that cannot be resolved maps to an empty string.
    pub fn all_settings(&self) -> BTreeMap<String, String> {
        let memory = self
            .tables
            .memory_parameters()
            .map(|p| (p.name().to_string(), self.memory_value(p).unwrap_or_default()));
        let scalar = self
            .tables
            .scalar_parameters()
            .map(|p| (p.name().to_string(), self.scalar_value(p).unwrap_or_default()));
        memory.chain(scalar).collect()
    }

    fn memory_value(&self, parameter: Parameter) -> Option<String> {
        self.tables
            .memory(parameter)
            .map(|table| {
                table
                    .resolve(self.profile.workload_type, self.profile.storage)
                    .format()
            })
    }

    fn scalar_value(&self, parameter: Parameter) -> Option<String> {
        self.tables
            .scalar(parameter)
            .map(|table| {
                table
                    .resolve(self.profile.workload_type, self.profile.storage)
                    .clone()
            })
    }
}

fn parse_parameter(name: &str) -> Result<Parameter, NotFoundError> {
    name.parse::<Parameter>()
        .map_err(|_| NotFoundError(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Platform, StorageClass, WorkloadType};

    fn web_13() -> Tuner {
        Tuner::new("web", "13", "linux", "16GB", "", "ssd", "4").unwrap()
    }

    #[test]
    fn test_new_derives_settings() {
        let tuner = web_13();
        assert_eq!(tuner.get_memory_setting("shared_buffers").unwrap(), "4GB");
        assert_eq!(tuner.get_memory_setting("effective_cache_size").unwrap(), "12GB");
        assert_eq!(tuner.get_string_setting("max_connections").unwrap(), "200");
        assert_eq!(tuner.get_string_setting("max_worker_processes").unwrap(), "4");
        assert_eq!(
            tuner.get_string_setting("max_parallel_workers_per_gather").unwrap(),
            "2"
        );
    }

    #[test]
    fn test_new_rejects_invalid_input() {
        let err = Tuner::new("web", "8.0", "linux", "16GB", "", "ssd", "").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { field: "version", .. }));
    }

    #[test]
    fn test_accessor_kind_mismatch_is_not_found() {
        let tuner = web_13();
        assert_eq!(
            tuner.get_memory_setting("max_connections"),
            Err(NotFoundError("max_connections".to_string()))
        );
        assert!(tuner.get_string_setting("shared_buffers").is_err());
        assert_eq!(tuner.get_setting("shared_buffers").unwrap(), "4GB");
        assert_eq!(tuner.get_setting("max_connections").unwrap(), "200");
    }

    #[test]
    fn test_unknown_and_gated_names_are_not_found() {
        let tuner = web_13();
        let err = tuner.get_string_setting("nonexistent_key").unwrap_err();
        assert_eq!(err.to_string(), "invalid setting name: nonexistent_key");
        assert!(tuner.get_string_setting("checkpoint_segments").is_err());
    }

    #[test]
    fn test_storage_keyed_settings_follow_storage() {
        let mut tuner = web_13();
        assert_eq!(tuner.get_string_setting("random_page_cost").unwrap(), "1.1");
        tuner.set_storage("hdd").unwrap();
        assert_eq!(tuner.profile().storage, StorageClass::Hdd);
        assert_eq!(tuner.get_string_setting("random_page_cost").unwrap(), "4");
        assert_eq!(tuner.get_string_setting("effective_io_concurrency").unwrap(), "2");
    }

    #[test]
    fn test_platform_setter_recalculates() {
        let mut tuner = web_13();
        assert!(tuner.get_string_setting("effective_io_concurrency").is_ok());
        tuner.set_platform("windows").unwrap();
        assert_eq!(tuner.profile().platform, Platform::Windows);
        assert!(tuner.get_string_setting("effective_io_concurrency").is_err());
        assert_eq!(tuner.get_memory_setting("maintenance_work_mem").unwrap(), "1GB");
    }

    #[test]
    fn test_version_setter_regates() {
        let mut tuner = web_13();
        tuner.set_version("9.4").unwrap();
        assert_eq!(tuner.get_string_setting("checkpoint_segments").unwrap(), "32");
        assert!(tuner.get_memory_setting("min_wal_size").is_err());
        assert!(tuner.get_memory_setting("work_mem").is_err());
        assert!(tuner.get_string_setting("max_worker_processes").is_err());
    }

    #[test]
    fn test_count_setters_recalculate() {
        let mut tuner = web_13();
        tuner.set_connections("50").unwrap();
        assert_eq!(tuner.get_string_setting("max_connections").unwrap(), "50");

        tuner.set_cpus("16").unwrap();
        assert_eq!(tuner.get_string_setting("max_parallel_workers").unwrap(), "16");
        assert_eq!(
            tuner.get_string_setting("max_parallel_workers_per_gather").unwrap(),
            "4"
        );
    }

    #[test]
    fn test_failed_setter_changes_nothing() {
        let mut tuner = web_13();
        let before = tuner.clone();

        assert!(tuner.set_workload_type("gaming").is_err());
        assert!(tuner.set_total_memory("lots").is_err());
        assert!(tuner.set_connections("-5").is_err());
        assert!(tuner.set_cpus("four").is_err());
        assert_eq!(tuner, before);
    }

    #[test]
    fn test_generic_set() {
        let mut tuner = web_13();
        tuner.set(ProfileField::WorkloadType, "DW").unwrap();
        assert_eq!(tuner.profile().workload_type, WorkloadType::Dw);
        assert_eq!(tuner.get_memory_setting("maintenance_work_mem").unwrap(), "2GB");
        assert_eq!(tuner.get_string_setting("default_statistics_target").unwrap(), "500");
    }

    #[test]
    fn test_all_settings_covers_every_derived_parameter() {
        let tuner = web_13();
        let all = tuner.all_settings();
        assert_eq!(all.len(), tuner.tables().len());
        assert_eq!(all["shared_buffers"], "4GB");
        assert_eq!(all["random_page_cost"], "1.1");
        assert!(!all.contains_key("nonexistent_key"));
        assert!(!all.contains_key("checkpoint_segments"));
        assert!(all.values().all(|v| !v.is_empty()));
    }

    #[test]
    fn test_all_settings_sorted_by_name() {
        let keys: Vec<_> = web_13().all_settings().into_keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
