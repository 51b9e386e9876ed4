//! Storage shared by the four variants
//!
//! A record holds one slot per schema property. Observable records own a
//! notifier and bind their lists and dictionaries to it; the variant types
//! decide which operations are allowed on top of it.

use std::sync::Arc;

use morphset_core_types::SettingsKind;

use super::Settings;
use crate::blueprint::Blueprint;
use crate::collection::ObservableList;
use crate::dict::SettingsDict;
use crate::engine::SynthesisEngine;
use crate::errors::{MorphsetError, Result};
use crate::model::{ObjectValue, PropertyType, SettingsSchema, Value, ValueType};
use crate::observe::{ChangeCallback, ChangeNotifier, OwnerBinding, SubscriptionId};
use crate::provider::ProviderLink;

#[derive(Debug)]
pub(crate) enum Slot {
    Scalar(Value),
    List(ObservableList),
    Dict(SettingsDict),
}

impl Slot {
    fn shape(&self) -> &'static str {
        match self {
            Slot::Scalar(_) => "value",
            Slot::List(_) => "collection",
            Slot::Dict(_) => "dictionary",
        }
    }
}

#[derive(Debug)]
pub(crate) struct Record {
    blueprint: Arc<Blueprint>,
    kind: SettingsKind,
    slots: Vec<Slot>,
    notifier: Option<Arc<ChangeNotifier>>,
    provider: Option<ProviderLink>,
}

impl Record {
    /// Default construction: run every property's initializer
    pub(crate) fn with_defaults(
        engine: &SynthesisEngine,
        blueprint: Arc<Blueprint>,
        kind: SettingsKind,
    ) -> Self {
        let notifier = kind.is_observable().then(ChangeNotifier::new);
        let schema = Arc::clone(blueprint.schema());
        let schema_name: Arc<str> = Arc::from(schema.name());

        let slots = schema
            .properties()
            .iter()
            .enumerate()
            .map(|(i, property)| {
                let name = Arc::clone(blueprint.name(i));
                let binding = notifier
                    .as_ref()
                    .map(|n| OwnerBinding::new(Arc::clone(&name), Arc::clone(n)));
                match property.property_type() {
                    PropertyType::Dict(nested) => Slot::Dict(
                        SettingsDict::new(engine.clone(), Arc::clone(nested), kind, name)
                            .bind(binding),
                    ),
                    PropertyType::Value(ty @ ValueType::List(item)) => {
                        let items = match blueprint.initializer(i).produce(ty) {
                            Value::List(items) => items,
                            _ => Vec::new(),
                        };
                        Slot::List(
                            ObservableList::new(
                                Arc::clone(&schema_name),
                                name,
                                (**item).clone(),
                                items,
                            )
                            .bind(binding),
                        )
                    }
                    PropertyType::Value(ty) => Slot::Scalar(blueprint.initializer(i).produce(ty)),
                }
            })
            .collect();

        Self {
            blueprint,
            kind,
            slots,
            notifier,
            provider: None,
        }
    }

    /// Copy construction: fresh storage holding a deep copy of `source`
    ///
    /// Runs before anyone can subscribe, so it is always silent.
    pub(crate) fn copied_from(
        engine: &SynthesisEngine,
        blueprint: Arc<Blueprint>,
        kind: SettingsKind,
        source: &dyn Settings,
    ) -> Result<Self> {
        let mut record = Self::with_defaults(engine, blueprint, kind);
        record.assign_from(source)?;
        Ok(record)
    }

    pub(crate) fn schema(&self) -> &Arc<SettingsSchema> {
        self.blueprint.schema()
    }

    pub(crate) fn kind(&self) -> SettingsKind {
        self.kind
    }

    pub(crate) fn position(&self, property: &str) -> Result<usize> {
        self.schema()
            .position(property)
            .ok_or_else(|| MorphsetError::UnknownProperty {
                schema: self.schema().name().to_string(),
                property: property.to_string(),
            })
    }

    pub(crate) fn get(&self, property: &str) -> Result<Value> {
        Ok(match &self.slots[self.position(property)?] {
            Slot::Scalar(v) => v.clone(),
            Slot::List(list) => Value::List(list.to_vec()),
            Slot::Dict(dict) => dict.snapshot(),
        })
    }

    pub(crate) fn list(&self, property: &str) -> Result<&ObservableList> {
        match &self.slots[self.position(property)?] {
            Slot::List(list) => Ok(list),
            other => Err(self.shape_mismatch(property, "collection", other.shape())),
        }
    }

    pub(crate) fn list_mut(&mut self, property: &str) -> Result<&mut ObservableList> {
        let i = self.position(property)?;
        let err = self.shape_mismatch(property, "collection", self.slots[i].shape());
        match &mut self.slots[i] {
            Slot::List(list) => Ok(list),
            _ => Err(err),
        }
    }

    pub(crate) fn dict(&self, property: &str) -> Result<&SettingsDict> {
        match &self.slots[self.position(property)?] {
            Slot::Dict(dict) => Ok(dict),
            other => Err(self.shape_mismatch(property, "dictionary", other.shape())),
        }
    }

    pub(crate) fn dict_mut(&mut self, property: &str) -> Result<&mut SettingsDict> {
        let i = self.position(property)?;
        let err = self.shape_mismatch(property, "dictionary", self.slots[i].shape());
        match &mut self.slots[i] {
            Slot::Dict(dict) => Ok(dict),
            _ => Err(err),
        }
    }

    pub(crate) fn snapshot(&self) -> Value {
        let mut object = ObjectValue::new(self.schema().name());
        for (i, slot) in self.slots.iter().enumerate() {
            let value = match slot {
                Slot::Scalar(v) => v.clone(),
                Slot::List(list) => Value::List(list.to_vec()),
                Slot::Dict(dict) => dict.snapshot(),
            };
            object.fields.insert(self.blueprint.name(i).to_string(), value);
        }
        Value::Object(object)
    }

    /// Write one property
    ///
    /// Observable records skip equal values and notify once per effective
    /// write; collection properties are reconciled in place.
    pub(crate) fn write(&mut self, property: &str, value: Value) -> Result<()> {
        let i = self.position(property)?;
        let blueprint = Arc::clone(&self.blueprint);
        let schema = blueprint.schema();
        let declared = &schema.properties()[i];

        match &mut self.slots[i] {
            Slot::Scalar(current) => {
                let ty = declared
                    .value_type()
                    .ok_or_else(|| MorphsetError::Internal {
                        message: format!("scalar slot without a value type: {}", property),
                    })?;
                let actual = value.describe();
                let value = ty.coerce(value).ok_or_else(|| MorphsetError::TypeMismatch {
                    schema: schema.name().to_string(),
                    property: property.to_string(),
                    expected: ty.name(),
                    actual,
                })?;

                match &self.notifier {
                    Some(_) if *current == value => {}
                    Some(notifier) => {
                        *current = value;
                        notifier.notify(blueprint.name(i));
                    }
                    None => *current = value,
                }
                Ok(())
            }
            Slot::List(list) => match value {
                Value::List(items) => list.reconcile(&items).map(|_| ()),
                other => Err(MorphsetError::TypeMismatch {
                    schema: schema.name().to_string(),
                    property: property.to_string(),
                    expected: declared.property_type().name(),
                    actual: other.describe(),
                }),
            },
            Slot::Dict(_) => Err(self.shape_mismatch(property, "value", "dictionary")),
        }
    }

    /// Bring every property to `source`'s value
    ///
    /// `source` must be an instance of this record's schema or of a schema
    /// derived from it.
    pub(crate) fn assign_from(&mut self, source: &dyn Settings) -> Result<()> {
        if !source.schema().is_a(self.schema().id()) {
            return Err(MorphsetError::SchemaMismatch {
                expected: self.schema().name().to_string(),
                actual: source.schema().name().to_string(),
            });
        }

        let blueprint = Arc::clone(&self.blueprint);
        for i in 0..self.slots.len() {
            let name = blueprint.name(i);
            if let Slot::Dict(dict) = &mut self.slots[i] {
                dict.assign_from(source.dict(name)?)?;
            } else {
                self.write(name, source.get(name)?)?;
            }
        }
        Ok(())
    }

    pub(crate) fn notifier(&self) -> Option<&Arc<ChangeNotifier>> {
        self.notifier.as_ref()
    }

    pub(crate) fn subscribe(&self, callback: ChangeCallback) -> Result<SubscriptionId> {
        Ok(self.observable()?.attach(callback))
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> Result<bool> {
        Ok(self.observable()?.unsubscribe(id))
    }

    pub(crate) fn provider(&self) -> Option<&ProviderLink> {
        self.provider.as_ref()
    }

    pub(crate) fn set_provider(&mut self, link: Option<ProviderLink>) {
        self.provider = link;
    }

    fn observable(&self) -> Result<&Arc<ChangeNotifier>> {
        self.notifier
            .as_ref()
            .ok_or_else(|| MorphsetError::NotObservable {
                schema: self.schema().name().to_string(),
                kind: self.kind,
            })
    }

    fn shape_mismatch(&self, property: &str, expected: &str, actual: &str) -> MorphsetError {
        MorphsetError::PropertyShapeMismatch {
            schema: self.schema().name().to_string(),
            property: property.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
