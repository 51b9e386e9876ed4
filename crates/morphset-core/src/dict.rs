//! Keyed collection of nested settings instances
//!
//! Entries are instances of the nested schema with the owner's kind. For
//! observable owners, structural changes and every entry's own changes are
//! reported as a change of the dictionary property.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use morphset_core_types::SettingsKind;

use crate::engine::SynthesisEngine;
use crate::errors::{MorphsetError, Result};
use crate::model::{SettingsSchema, Value};
use crate::observe::{OwnerBinding, PropertyChanged, SubscriptionId};
use crate::variants::Settings;

struct DictEntry {
    instance: Box<dyn Settings>,
    forwarder: Option<SubscriptionId>,
}

pub struct SettingsDict {
    engine: SynthesisEngine,
    schema: Arc<SettingsSchema>,
    kind: SettingsKind,
    property: Arc<str>,
    entries: BTreeMap<String, DictEntry>,
    binding: Option<OwnerBinding>,
}

impl SettingsDict {
    pub(crate) fn new(
        engine: SynthesisEngine,
        schema: Arc<SettingsSchema>,
        kind: SettingsKind,
        property: Arc<str>,
    ) -> Self {
        Self {
            engine,
            schema,
            kind,
            property,
            entries: BTreeMap::new(),
            binding: None,
        }
    }

    pub(crate) fn bind(mut self, binding: Option<OwnerBinding>) -> Self {
        self.binding = binding;
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// Schema of the entries
    pub fn schema(&self) -> &Arc<SettingsSchema> {
        &self.schema
    }

    /// Kind of the entries, always the owner's kind
    pub fn kind(&self) -> SettingsKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Settings)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), e.instance.as_ref()))
    }

    pub fn get(&self, key: &str) -> Option<&dyn Settings> {
        self.entries.get(key).map(|e| e.instance.as_ref())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut dyn Settings> {
        match self.entries.get_mut(key) {
            Some(e) => Some(e.instance.as_mut()),
            None => None,
        }
    }

    /// Add a default-constructed entry under `key`
    ///
    /// # Errors
    ///
    /// * `DuplicateKey` - If `key` is already present
    /// * Any generation error of the nested schema
    pub fn add_new(&mut self, key: impl Into<String>) -> Result<&mut dyn Settings> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(MorphsetError::DuplicateKey {
                property: self.property.to_string(),
                key,
            });
        }

        let entry = self.make_entry(None)?;
        tracing::debug!(property = &*self.property, key = %key, "dictionary entry added");
        self.entries.insert(key.clone(), entry);
        self.changed();
        let property = Arc::clone(&self.property);
        match self.entries.get_mut(&key) {
            Some(entry) => Ok(entry.instance.as_mut()),
            None => Err(MorphsetError::Internal {
                message: format!("entry {} vanished from {}", key, property),
            }),
        }
    }

    /// Remove `key`; returns false if it was absent
    pub fn delete(&mut self, key: &str) -> bool {
        if !self.detach(key) {
            return false;
        }
        tracing::debug!(property = &*self.property, key, "dictionary entry deleted");
        self.changed();
        true
    }

    /// Reconcile keys and values with `source`
    ///
    /// Keys absent from `source` are deleted, missing keys are added, and
    /// every matching entry is deep-copied in place so existing entry
    /// instances (and their observers) survive. Structural changes raise a
    /// single notification, also when a later entry copy fails.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` if `source` holds entries of an unrelated schema;
    /// the dictionary is left untouched.
    pub fn assign_from(&mut self, source: &SettingsDict) -> Result<()> {
        if !source.schema.is_a(self.schema.id()) {
            return Err(MorphsetError::SchemaMismatch {
                expected: self.schema.name().to_string(),
                actual: source.schema.name().to_string(),
            });
        }

        let mut structural = false;
        let result = self.merge_entries(source, &mut structural);
        if structural {
            self.changed();
        }
        result
    }

    fn merge_entries(&mut self, source: &SettingsDict, structural: &mut bool) -> Result<()> {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|k| !source.entries.contains_key(*k))
            .cloned()
            .collect();
        for key in stale {
            *structural |= self.detach(&key);
        }

        for (key, theirs) in &source.entries {
            match self.entries.get_mut(key) {
                Some(ours) => ours.instance.copy(Some(theirs.instance.as_ref()))?,
                None => {
                    let entry = self.make_entry(Some(theirs.instance.as_ref()))?;
                    self.entries.insert(key.clone(), entry);
                    *structural = true;
                }
            }
        }
        Ok(())
    }

    /// Key to entry snapshot
    pub fn snapshot(&self) -> Value {
        Value::Map(
            self.entries
                .iter()
                .map(|(k, e)| (k.clone(), e.instance.snapshot()))
                .collect(),
        )
    }

    fn make_entry(&self, source: Option<&dyn Settings>) -> Result<DictEntry> {
        let instance = self.engine.create(&self.schema, self.kind, source)?;
        let forwarder = match &self.binding {
            Some(binding) => {
                let binding = binding.clone();
                Some(instance.subscribe(Arc::new(move |_: &PropertyChanged| binding.notify()))?)
            }
            None => None,
        };
        Ok(DictEntry {
            instance,
            forwarder,
        })
    }

    fn detach(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                if let Some(id) = entry.forwarder {
                    entry.instance.unsubscribe(id).ok();
                }
                true
            }
            None => false,
        }
    }

    fn changed(&self) {
        if let Some(binding) = &self.binding {
            binding.notify();
        }
    }
}

impl fmt::Debug for SettingsDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsDict")
            .field("property", &self.property)
            .field("schema", &self.schema.name())
            .field("kind", &self.kind)
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
