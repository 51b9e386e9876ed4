//! Ordered collection owned by a settings instance
//!
//! Lists of Inpc/Real instances are bound to their owner: every effective
//! mutation raises exactly one change notification naming the owning
//! property. Lists of Copy/Read instances are unbound and silent.

use std::fmt;
use std::sync::Arc;

use crate::errors::{MorphsetError, Result};
use crate::model::{Value, ValueType};
use crate::observe::OwnerBinding;
use crate::reconcile::{reconcile, ReconcileOutcome};

pub struct ObservableList {
    schema: Arc<str>,
    property: Arc<str>,
    item_type: ValueType,
    items: Vec<Value>,
    binding: Option<OwnerBinding>,
}

impl ObservableList {
    pub(crate) fn new(
        schema: Arc<str>,
        property: Arc<str>,
        item_type: ValueType,
        items: Vec<Value>,
    ) -> Self {
        Self {
            schema,
            property,
            item_type,
            items,
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

    pub fn item_type(&self) -> &ValueType {
        &self.item_type
    }

    /// True if mutations notify an owning instance
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Append one item
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `value` is not an item of this list's type.
    pub fn push(&mut self, value: Value) -> Result<()> {
        let value = self.conform(value)?;
        self.items.push(value);
        self.changed();
        Ok(())
    }

    /// Insert one item at `index`, shifting later items right
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index > len`; `TypeMismatch` for an ill-typed item.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_range(index));
        }
        let value = self.conform(value)?;
        self.items.insert(index, value);
        self.changed();
        Ok(())
    }

    /// Remove the item at `index`
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if there is no item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.items.remove(index);
        self.changed();
        Ok(removed)
    }

    /// Remove every item; an already empty list stays silent
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.changed();
    }

    /// Bring the list to `target` in place
    ///
    /// Raises at most one notification, and none if the contents already
    /// equal `target`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if any target item is not of this list's type; the list
    /// is left untouched.
    pub fn reconcile(&mut self, target: &[Value]) -> Result<ReconcileOutcome> {
        let target = target
            .iter()
            .cloned()
            .map(|v| self.conform(v))
            .collect::<Result<Vec<_>>>()?;

        let outcome = reconcile(&mut self.items, &target, |a, b| a == b);
        if outcome.changed() {
            tracing::debug!(
                property = &*self.property,
                removed = outcome.removed,
                appended = outcome.appended,
                "collection reconciled"
            );
            self.changed();
        }
        Ok(outcome)
    }

    fn conform(&self, value: Value) -> Result<Value> {
        let actual = value.describe();
        self.item_type
            .coerce(value)
            .ok_or_else(|| MorphsetError::TypeMismatch {
                schema: self.schema.to_string(),
                property: self.property.to_string(),
                expected: self.item_type.name(),
                actual,
            })
    }

    fn out_of_range(&self, index: usize) -> MorphsetError {
        MorphsetError::IndexOutOfRange {
            property: self.property.to_string(),
            index,
            len: self.items.len(),
        }
    }

    fn changed(&self) {
        if let Some(binding) = &self.binding {
            binding.notify();
        }
    }
}

impl fmt::Debug for ObservableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableList")
            .field("property", &self.property)
            .field("items", &self.items)
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<'a> IntoIterator for &'a ObservableList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
