//! Per-category value tables.
//!
//! Every derived parameter is keyed by exactly one axis: the workload type or
//! the storage class. The tables are fixed-size arrays indexed by the enum, so
//! a table always has a value for every member of its axis.

use std::ops::Index;

use crate::profile::{StorageClass, WorkloadType};

/// One value per workload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByWorkload<T>([T; WorkloadType::COUNT]);

impl<T> ByWorkload<T> {
    /// Values in `WorkloadType::all()` order: web, oltp, dw, mixed, desktop.
    pub const fn new(values: [T; WorkloadType::COUNT]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(WorkloadType) -> T) -> Self {
        let all = WorkloadType::all();
        Self(std::array::from_fn(|i| f(all[i])))
    }

    pub fn get(&self, workload_type: WorkloadType) -> &T {
        &self.0[workload_type.index()]
    }

    pub fn map<U>(&self, mut f: impl FnMut(WorkloadType, &T) -> U) -> ByWorkload<U> {
        ByWorkload::from_fn(|wt| f(wt, self.get(wt)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkloadType, &T)> {
        WorkloadType::all().iter().copied().zip(self.0.iter())
    }
}

impl<T: Clone> ByWorkload<T> {
    /// The same value for every workload type.
    pub fn uniform(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T: ToString> ByWorkload<T> {
    pub fn to_strings(&self) -> ByWorkload<String> {
        self.map(|_, v| v.to_string())
    }
}

impl<T> Index<WorkloadType> for ByWorkload<T> {
    type Output = T;

    fn index(&self, workload_type: WorkloadType) -> &T {
        self.get(workload_type)
    }
}

/// One value per storage class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByStorage<T>([T; StorageClass::COUNT]);

impl<T> ByStorage<T> {
    /// Values in `StorageClass::all()` order: ssd, hdd, san.
    pub const fn new(values: [T; StorageClass::COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, storage: StorageClass) -> &T {
        &self.0[storage.index()]
    }

    pub fn map<U>(&self, mut f: impl FnMut(StorageClass, &T) -> U) -> ByStorage<U> {
        let all = StorageClass::all();
        ByStorage(std::array::from_fn(|i| f(all[i], &self.0[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StorageClass, &T)> {
        StorageClass::all().iter().copied().zip(self.0.iter())
    }
}

impl<T: ToString> ByStorage<T> {
    pub fn to_strings(&self) -> ByStorage<String> {
        self.map(|_, v| v.to_string())
    }
}

impl<T> Index<StorageClass> for ByStorage<T> {
    type Output = T;

    fn index(&self, storage: StorageClass) -> &T {
        self.get(storage)
    }
}

/// A derived parameter's values, keyed by a single axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryTable<T> {
    Workload(ByWorkload<T>),
    Storage(ByStorage<T>),
}

impl<T> CategoryTable<T> {
    /// Pick the value for the active profile.
    ///
    /// Workload-keyed tables answer for the workload type; storage-keyed tables
    /// answer for the storage class.
    pub fn resolve(&self, workload_type: WorkloadType, storage: StorageClass) -> &T {
        match self {
            CategoryTable::Workload(table) => table.get(workload_type),
            CategoryTable::Storage(table) => table.get(storage),
        }
    }

    pub fn by_workload(&self) -> Option<&ByWorkload<T>> {
        match self {
            CategoryTable::Workload(table) => Some(table),
            CategoryTable::Storage(_) => None,
        }
    }

    pub fn by_storage(&self) -> Option<&ByStorage<T>> {
        match self {
            CategoryTable::Workload(_) => None,
            CategoryTable::Storage(table) => Some(table),
        }
    }
}

impl<T> From<ByWorkload<T>> for CategoryTable<T> {
    fn from(table: ByWorkload<T>) -> Self {
        CategoryTable::Workload(table)
    }
}

impl<T> From<ByStorage<T>> for CategoryTable<T> {
    fn from(table: ByStorage<T>) -> Self {
        CategoryTable::Storage(table)
    }
}
