//! Identity types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process-unique identity of a resolved settings schema
///
/// A fresh id is minted every time a schema is built, so two schemas with the
/// same name but different property sets never share cached variant factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaId(Uuid);

impl SchemaId {
    /// Mint a new id using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SchemaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
