use morphset_core_types::SettingsKind;

use super::record::Record;
use super::{Settings, Variant};

/// Observable record
///
/// Writing a value equal to the current one does nothing; any other write
/// raises exactly one notification naming the property. Lists and
/// dictionaries are bound to this instance's own notifier, including after
/// copy construction.
#[derive(Debug)]
pub struct InpcSettings {
    record: Record,
}

/// The authoritative observable instance a provider persists
///
/// Behaves exactly like [`InpcSettings`]; only the kind differs.
#[derive(Debug)]
pub struct RealSettings {
    record: Record,
}

impl InpcSettings {
    pub(crate) fn from_record(record: Record) -> Self {
        Self { record }
    }
}

impl RealSettings {
    pub(crate) fn from_record(record: Record) -> Self {
        Self { record }
    }
}

impl Variant for InpcSettings {
    const KIND: SettingsKind = SettingsKind::Inpc;
}

impl Variant for RealSettings {
    const KIND: SettingsKind = SettingsKind::Real;
}

impl Settings for InpcSettings {
    record_accessors!();
    record_mutators!();
}

impl Settings for RealSettings {
    record_accessors!();
    record_mutators!();
}
