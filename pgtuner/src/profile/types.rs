//! Closed value sets for the profile axes.

use std::fmt;
use std::str::FromStr;

/// Intended usage pattern of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadType {
    /// Web application
    Web,
    /// Online transaction processing
    Oltp,
    /// Data warehouse
    Dw,
    /// Mixed web and reporting
    Mixed,
    /// Developer desktop
    Desktop,
}

impl WorkloadType {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [WorkloadType; Self::COUNT] {
        &[
            WorkloadType::Web,
            WorkloadType::Oltp,
            WorkloadType::Dw,
            WorkloadType::Mixed,
            WorkloadType::Desktop,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadType::Web => "web",
            WorkloadType::Oltp => "oltp",
            WorkloadType::Dw => "dw",
            WorkloadType::Mixed => "mixed",
            WorkloadType::Desktop => "desktop",
        }
    }

    /// Position in [`WorkloadType::all`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WorkloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadType {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web" => Ok(WorkloadType::Web),
            "oltp" => Ok(WorkloadType::Oltp),
            "dw" => Ok(WorkloadType::Dw),
            "mixed" => Ok(WorkloadType::Mixed),
            "desktop" => Ok(WorkloadType::Desktop),
            _ => Err(()),
        }
    }
}

/// Supported PostgreSQL major versions, in release order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DbVersion {
    V9_4,
    V9_5,
    V9_6,
    V10,
    V11,
    V12,
    V13,
    V14,
}

impl DbVersion {
    /// The newest supported version.
    pub const LATEST: DbVersion = DbVersion::V14;

    pub fn all() -> &'static [DbVersion] {
        &[
            DbVersion::V9_4,
            DbVersion::V9_5,
            DbVersion::V9_6,
            DbVersion::V10,
            DbVersion::V11,
            DbVersion::V12,
            DbVersion::V13,
            DbVersion::V14,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DbVersion::V9_4 => "9.4",
            DbVersion::V9_5 => "9.5",
            DbVersion::V9_6 => "9.6",
            DbVersion::V10 => "10",
            DbVersion::V11 => "11",
            DbVersion::V12 => "12",
            DbVersion::V13 => "13",
            DbVersion::V14 => "14",
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            DbVersion::V9_4 => 9.4,
            DbVersion::V9_5 => 9.5,
            DbVersion::V9_6 => 9.6,
            DbVersion::V10 => 10.0,
            DbVersion::V11 => 11.0,
            DbVersion::V12 => 12.0,
            DbVersion::V13 => 13.0,
            DbVersion::V14 => 14.0,
        }
    }
}

impl fmt::Display for DbVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbVersion {
    type Err = ();

    /// Exact match against the supported version strings ("10", not "10.0").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DbVersion::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// Operating system the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    pub fn all() -> &'static [Platform] {
        &[Platform::Linux, Platform::Darwin, Platform::Windows]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "darwin" => Ok(Platform::Darwin),
            "windows" => Ok(Platform::Windows),
            _ => Err(()),
        }
    }
}

/// Disk medium backing the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Solid state drive
    Ssd,
    /// Spinning hard drive
    Hdd,
    /// Storage area network
    San,
}

impl StorageClass {
    pub const COUNT: usize = 3;

    pub fn all() -> &'static [StorageClass; Self::COUNT] {
        &[StorageClass::Ssd, StorageClass::Hdd, StorageClass::San]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Ssd => "ssd",
            StorageClass::Hdd => "hdd",
            StorageClass::San => "san",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageClass {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ssd" => Ok(StorageClass::Ssd),
            "hdd" => Ok(StorageClass::Hdd),
            "san" => Ok(StorageClass::San),
            _ => Err(()),
        }
    }
}
