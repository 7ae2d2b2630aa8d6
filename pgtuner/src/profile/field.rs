//! Field-level access to a [`Profile`] with validation.
//!
//! Each [`ProfileField`] knows how to parse, validate and store its raw string
//! value, and how to render the stored value back. The profile constructor and
//! every setter go through here, so a field is validated the same way whether it
//! arrives at construction time or later.

use std::str::FromStr;
use thiserror::Error;

use super::Profile;
use crate::memory::{Memory, MemoryParseError};

/// Errors raised while validating profile input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not acceptable for the field.
    #[error("invalid {field}: '{value}' - {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The total memory string could not be parsed.
    #[error(transparent)]
    Memory(#[from] MemoryParseError),

    /// The field name is not a profile field.
    #[error("unknown profile field '{0}'")]
    UnknownField(String),
}

/// The seven profile inputs, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    WorkloadType,
    Version,
    Platform,
    TotalMemory,
    Connections,
    Storage,
    Cpus,
}

impl FromStr for ProfileField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type" => Ok(ProfileField::WorkloadType),
            "version" => Ok(ProfileField::Version),
            "platform" => Ok(ProfileField::Platform),
            "memory" => Ok(ProfileField::TotalMemory),
            "connections" => Ok(ProfileField::Connections),
            "storage" => Ok(ProfileField::Storage),
            "cpu" => Ok(ProfileField::Cpus),
            _ => Err(ValidationError::UnknownField(s.to_string())),
        }
    }
}

impl ProfileField {
    /// All fields in the order the constructor validates them.
    pub fn all() -> &'static [ProfileField] {
        &[
            ProfileField::WorkloadType,
            ProfileField::Version,
            ProfileField::Platform,
            ProfileField::TotalMemory,
            ProfileField::Connections,
            ProfileField::Storage,
            ProfileField::Cpus,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::WorkloadType => "type",
            ProfileField::Version => "version",
            ProfileField::Platform => "platform",
            ProfileField::TotalMemory => "memory",
            ProfileField::Connections => "connections",
            ProfileField::Storage => "storage",
            ProfileField::Cpus => "cpu",
        }
    }

    /// Render the stored value. Unspecified counts render as an empty string.
    pub fn get(&self, profile: &Profile) -> String {
        match self {
            ProfileField::WorkloadType => profile.workload_type.to_string(),
            ProfileField::Version => profile.version.to_string(),
            ProfileField::Platform => profile.platform.to_string(),
            ProfileField::TotalMemory => profile.total_memory.to_string(),
            ProfileField::Connections => optional_count_display(profile.connections),
            ProfileField::Storage => profile.storage.to_string(),
            ProfileField::Cpus => optional_count_display(profile.cpus),
        }
    }

    /// Validate `value` and store it. On error the profile is left untouched.
    pub fn set(&self, profile: &mut Profile, value: &str) -> Result<(), ValidationError> {
        match self {
            ProfileField::WorkloadType => {
                profile.workload_type = self.parse_choice(value, &WORKLOAD_CHOICES)?;
            }
            ProfileField::Version => {
                profile.version = self.parse_choice(value, &VERSION_CHOICES)?;
            }
            ProfileField::Platform => {
                profile.platform = self.parse_choice(value, &PLATFORM_CHOICES)?;
            }
            ProfileField::TotalMemory => {
                profile.total_memory = Memory::parse(value)?;
            }
            ProfileField::Connections => {
                if let Some(n) = self.parse_optional_count(value)? {
                    profile.connections = n;
                }
            }
            ProfileField::Storage => {
                profile.storage = self.parse_choice(value, &STORAGE_CHOICES)?;
            }
            ProfileField::Cpus => {
                if let Some(n) = self.parse_optional_count(value)? {
                    profile.cpus = n;
                }
            }
        }
        Ok(())
    }

    fn parse_choice<T: FromStr>(
        &self,
        value: &str,
        choices: &[&'static str],
    ) -> Result<T, ValidationError> {
        value
            .parse::<T>()
            .map_err(|_| self.invalid(value, format!("must be one of: {}", choices.join(", "))))
    }

    /// Empty means "leave unspecified".
    fn parse_optional_count(&self, value: &str) -> Result<Option<u32>, ValidationError> {
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| self.invalid(value, "must be a non-negative integer".to_string()))
    }

    fn invalid(&self, value: &str, reason: String) -> ValidationError {
        ValidationError::InvalidValue {
            field: self.name(),
            value: value.to_string(),
            reason,
        }
    }
}

const WORKLOAD_CHOICES: [&str; 5] = ["web", "oltp", "dw", "mixed", "desktop"];
const VERSION_CHOICES: [&str; 8] = ["9.4", "9.5", "9.6", "10", "11", "12", "13", "14"];
const PLATFORM_CHOICES: [&str; 3] = ["linux", "darwin", "windows"];
const STORAGE_CHOICES: [&str; 3] = ["ssd", "hdd", "san"];

fn optional_count_display(n: u32) -> String {
    if n == 0 {
        String::new()
    } else {
        n.to_string()
    }
}
