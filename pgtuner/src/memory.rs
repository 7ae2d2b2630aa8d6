//! Byte quantities with unit suffixes (e.g., "16GB", "512mb", "1024k").

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// One kibibyte in bytes.
pub const KB: u64 = 1024;
/// One mebibyte in bytes.
pub const MB: u64 = 1024 * KB;
/// One gibibyte in bytes.
pub const GB: u64 = 1024 * MB;

/// Error parsing a memory string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("can't parse memory unit: '{input}' - expected format like '16GB', '512MB', or '1024KB'")]
pub struct MemoryParseError {
    input: String,
}

impl MemoryParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Memory string grammar, matched against the lower-cased input.
fn memory_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Literal pattern, always compiles.
        Regex::new(r"^([0-9]+)([kmg]?b?)$").unwrap()
    })
}

/// A non-negative byte count.
///
/// Parsed from strings of the form `<integer><unit>`, where the unit is one of
/// `b`, `k`/`kb`, `m`/`mb`, `g`/`gb` or empty (bytes), case-insensitive.
/// Formatting picks the largest unit that divides the byte count evenly.
///
/// # Examples
///
/// ```
/// use pgtuner::memory::Memory;
///
/// let mem: Memory = "16GB".parse().unwrap();
/// assert_eq!(mem.gigabytes(), 16);
/// assert_eq!(mem.to_string(), "16GB");
///
/// let odd = Memory::from_bytes(1000);
/// assert_eq!(odd.to_string(), "1000");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Memory(u64);

impl Memory {
    /// Parse a memory string such as "16GB" or "512m".
    pub fn parse(s: &str) -> Result<Self, MemoryParseError> {
        let lower = s.to_lowercase();
        let caps = memory_pattern()
            .captures(&lower)
            .ok_or_else(|| MemoryParseError::new(s))?;

        let num: u64 = caps[1].parse().map_err(|_| MemoryParseError::new(s))?;
        let multiplier = match caps[2].chars().next() {
            Some('k') => KB,
            Some('m') => MB,
            Some('g') => GB,
            _ => 1,
        };

        num.checked_mul(multiplier)
            .map(Memory)
            .ok_or_else(|| MemoryParseError::new(s))
    }

    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn from_mb(mb: u64) -> Self {
        Self(mb * MB)
    }

    pub const fn from_gb(gb: u64) -> Self {
        Self(gb * GB)
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }

    pub const fn kilobytes(self) -> u64 {
        self.0 / KB
    }

    pub const fn megabytes(self) -> u64 {
        self.0 / MB
    }

    pub const fn gigabytes(self) -> u64 {
        self.0 / GB
    }

    /// Canonical string form: `<n>GB`, `<n>MB`, `<n>KB`, or raw bytes.
    pub fn format(self) -> String {
        if self.0 % GB == 0 {
            format!("{}GB", self.0 / GB)
        } else if self.0 % MB == 0 {
            format!("{}MB", self.0 / MB)
        } else if self.0 % KB == 0 {
            format!("{}KB", self.0 / KB)
        } else {
            self.0.to_string()
        }
    }

    /// Truncate down to a whole number of kibibytes.
    pub const fn floor_kb(self) -> Self {
        Self(self.0 / KB * KB)
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Memory {
    type Err = MemoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Memory::parse(s)
    }
}
