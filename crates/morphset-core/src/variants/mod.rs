//! The four behavioral shapes produced for every schema
//!
//! | kind | writes | notifications |
//! |------|--------|---------------|
//! | [`CopySettings`] | yes | none |
//! | [`ReadSettings`] | never after construction | none |
//! | [`InpcSettings`] | yes, equal values skipped | one per effective write |
//! | [`RealSettings`] | as Inpc | as Inpc |
//!
//! All four implement [`Settings`] and are produced by the
//! [`SynthesisEngine`](crate::engine::SynthesisEngine).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use morphset_core_types::{SchemaId, SettingsKind};

use crate::collection::ObservableList;
use crate::dict::SettingsDict;
use crate::errors::{MorphsetError, Result};
use crate::model::{SettingsSchema, Value};
use crate::observe::{ChangeCallback, ChangeNotifier, SubscriptionId};
use crate::provider::ProviderLink;

#[macro_use]
mod macros;
mod copy;
mod observable;
mod read;
pub(crate) mod record;

pub use copy::CopySettings;
pub use observable::{InpcSettings, RealSettings};
pub use read::ReadSettings;

/// Contract shared by every synthesized instance
pub trait Settings: Any + Send + Sync + fmt::Debug {
    fn schema(&self) -> &Arc<SettingsSchema>;

    fn kind(&self) -> SettingsKind;

    /// Identity of this instance's concrete shape
    fn shape(&self) -> ShapeId {
        ShapeId::new(self.schema(), self.kind())
    }

    /// Current value of a property
    ///
    /// Collections read as `Value::List`, dictionaries as a `Value::Map`
    /// snapshot.
    ///
    /// # Errors
    ///
    /// `UnknownProperty` if the schema has no such property.
    fn get(&self, property: &str) -> Result<Value>;

    /// Assign a property
    ///
    /// # Errors
    ///
    /// * `ReadOnlyViolation` - On Read instances
    /// * `UnknownProperty` / `TypeMismatch` - Bad name or ill-typed value
    /// * `PropertyShapeMismatch` - The property is a dictionary
    fn set(&mut self, property: &str, value: Value) -> Result<()>;

    /// # Errors
    ///
    /// `UnknownProperty` or `PropertyShapeMismatch`.
    fn list(&self, property: &str) -> Result<&ObservableList>;

    /// # Errors
    ///
    /// As [`Settings::list`], plus `ReadOnlyViolation` on Read instances.
    fn list_mut(&mut self, property: &str) -> Result<&mut ObservableList>;

    /// # Errors
    ///
    /// `UnknownProperty` or `PropertyShapeMismatch`.
    fn dict(&self, property: &str) -> Result<&SettingsDict>;

    /// # Errors
    ///
    /// As [`Settings::dict`], plus `ReadOnlyViolation` on Read instances.
    fn dict_mut(&mut self, property: &str) -> Result<&mut SettingsDict>;

    /// Every property as one `Value::Object` named after the schema
    fn snapshot(&self) -> Value;

    /// Bring every property to the source's values
    ///
    /// # Errors
    ///
    /// * `ReadOnlyViolation` - On Read instances, whatever the source
    /// * `NullSource` - If `source` is `None`
    /// * `SchemaMismatch` - If the source is neither this schema nor derived from it
    fn copy(&mut self, source: Option<&dyn Settings>) -> Result<()>;

    /// [`Settings::copy`] from a value of unknown type
    ///
    /// Accepts any of the four variant types or a `Box<dyn Settings>`.
    ///
    /// # Errors
    ///
    /// As [`Settings::copy`]; `SchemaMismatch` if `source` is not a settings
    /// instance at all.
    fn copy_untyped(&mut self, source: Option<&dyn Any>) -> Result<()> {
        let source = match source {
            None => None,
            Some(any) => Some(downcast_settings(any).ok_or_else(|| {
                MorphsetError::SchemaMismatch {
                    expected: self.schema().name().to_string(),
                    actual: "a value that is not a settings instance".to_string(),
                }
            })?),
        };
        self.copy(source)
    }

    /// Notification channel, present on Inpc and Real instances
    fn notifier(&self) -> Option<&Arc<ChangeNotifier>>;

    /// # Errors
    ///
    /// `NotObservable` on Copy and Read instances.
    fn subscribe(&self, callback: ChangeCallback) -> Result<SubscriptionId>;

    /// Returns false if `id` was not subscribed
    ///
    /// # Errors
    ///
    /// `NotObservable` on Copy and Read instances.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool>;

    fn provider(&self) -> Option<&ProviderLink>;

    fn set_provider(&mut self, link: Option<ProviderLink>);

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// A concrete variant type, addressable by its kind
pub trait Variant: Settings + Sized {
    const KIND: SettingsKind;
}

/// Identity of one concrete shape: a schema paired with a kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeId {
    schema: SchemaId,
    schema_name: Arc<str>,
    kind: SettingsKind,
}

impl ShapeId {
    pub fn new(schema: &SettingsSchema, kind: SettingsKind) -> Self {
        Self {
            schema: schema.id(),
            schema_name: Arc::from(schema.name()),
            kind,
        }
    }

    pub fn schema_id(&self) -> SchemaId {
        self.schema
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn kind(&self) -> SettingsKind {
        self.kind
    }

    /// Type name such as `SimpleCopy` or `ListyInpc`
    pub fn type_name(&self) -> String {
        let suffix = match self.kind {
            SettingsKind::Copy => "Copy",
            SettingsKind::Read => "Read",
            SettingsKind::Inpc => "Inpc",
            SettingsKind::Real => "Real",
        };
        format!("{}{}", self.schema_name, suffix)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// View an untyped value as a settings instance, if it is one
pub fn downcast_settings(any: &dyn Any) -> Option<&dyn Settings> {
    if let Some(s) = any.downcast_ref::<CopySettings>() {
        return Some(s);
    }
    if let Some(s) = any.downcast_ref::<ReadSettings>() {
        return Some(s);
    }
    if let Some(s) = any.downcast_ref::<InpcSettings>() {
        return Some(s);
    }
    if let Some(s) = any.downcast_ref::<RealSettings>() {
        return Some(s);
    }
    any.downcast_ref::<Box<dyn Settings>>().map(|b| b.as_ref())
}
