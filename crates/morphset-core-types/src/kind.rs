//! The kind tag carried by every synthesized settings instance

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavioral contract of a settings instance, fixed for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsKind {
    /// Plain mutable record, no observation
    Copy,
    /// Immutable after construction
    Read,
    /// Observable: raises a change notification per effective write
    Inpc,
    /// Observable and authoritative: the instance a provider persists
    Real,
}

impl SettingsKind {
    /// All kinds, in declaration order
    pub const ALL: [SettingsKind; 4] = [
        SettingsKind::Copy,
        SettingsKind::Read,
        SettingsKind::Inpc,
        SettingsKind::Real,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsKind::Copy => "copy",
            SettingsKind::Read => "read",
            SettingsKind::Inpc => "inpc",
            SettingsKind::Real => "real",
        }
    }

    /// Returns true for kinds that raise change notifications
    pub fn is_observable(&self) -> bool {
        matches!(self, SettingsKind::Inpc | SettingsKind::Real)
    }

    /// Returns true for kinds whose values may change after construction
    pub fn is_writable(&self) -> bool {
        !matches!(self, SettingsKind::Read)
    }
}

impl fmt::Display for SettingsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown kind name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown settings kind '{}' (expected copy, read, inpc or real)",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for SettingsKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
