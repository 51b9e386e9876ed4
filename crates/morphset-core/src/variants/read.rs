use morphset_core_types::SettingsKind;

use super::record::Record;
use super::{Settings, Variant};
use crate::collection::ObservableList;
use crate::dict::SettingsDict;
use crate::errors::{MorphsetError, Result};
use crate::model::Value;

/// Immutable after construction
///
/// Every mutator fails with `ReadOnlyViolation` and leaves the values as
/// they were; this includes `copy`, whatever the source.
#[derive(Debug)]
pub struct ReadSettings {
    record: Record,
}

impl ReadSettings {
    pub(crate) fn from_record(record: Record) -> Self {
        Self { record }
    }

    fn refuse(&self, target: &str) -> MorphsetError {
        tracing::debug!(
            schema = self.record.schema().name(),
            property = target,
            "write to read-only instance refused"
        );
        MorphsetError::ReadOnlyViolation {
            schema: self.record.schema().name().to_string(),
            target: target.to_string(),
        }
    }
}

impl Variant for ReadSettings {
    const KIND: SettingsKind = SettingsKind::Read;
}

impl Settings for ReadSettings {
    record_accessors!();

    fn set(&mut self, property: &str, _value: Value) -> Result<()> {
        self.record.position(property)?;
        Err(self.refuse(property))
    }

    fn list_mut(&mut self, property: &str) -> Result<&mut ObservableList> {
        self.record.list(property)?;
        Err(self.refuse(property))
    }

    fn dict_mut(&mut self, property: &str) -> Result<&mut SettingsDict> {
        self.record.dict(property)?;
        Err(self.refuse(property))
    }

    fn copy(&mut self, _source: Option<&dyn Settings>) -> Result<()> {
        Err(self.refuse("contents"))
    }

    fn copy_untyped(&mut self, _source: Option<&dyn std::any::Any>) -> Result<()> {
        Err(self.refuse("contents"))
    }
}
