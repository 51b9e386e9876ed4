use morphset_core_types::SettingsKind;

use super::record::Record;
use super::{Settings, Variant};

/// Plain mutable record
///
/// Copy-constructed instances own fresh, unobserved collections; nothing is
/// shared with the source.
#[derive(Debug)]
pub struct CopySettings {
    record: Record,
}

impl CopySettings {
    pub(crate) fn from_record(record: Record) -> Self {
        Self { record }
    }
}

impl Variant for CopySettings {
    const KIND: SettingsKind = SettingsKind::Copy;
}

impl Settings for CopySettings {
    record_accessors!();
    record_mutators!();
}
