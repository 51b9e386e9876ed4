use std::collections::HashMap;
use std::sync::Arc;

use morphset_core_types::SchemaId;

use super::strategy::DefaultValueStrategy;
use super::types::ValueType;
use crate::errors::{MorphsetError, Result};

/// Shape of a property
#[derive(Debug, Clone)]
pub enum PropertyType {
    /// A scalar, enum, value-object or ordered collection (`ValueType::List`)
    Value(ValueType),
    /// String-keyed map of nested settings instances of the owner's kind
    Dict(Arc<SettingsSchema>),
}

impl PropertyType {
    pub fn name(&self) -> String {
        match self {
            PropertyType::Value(ty) => ty.name(),
            PropertyType::Dict(schema) => format!("dict<{}>", schema.name()),
        }
    }

    /// Shape label used in accessor errors
    pub fn shape(&self) -> &'static str {
        match self {
            PropertyType::Value(ValueType::List(_)) => "collection",
            PropertyType::Value(_) => "value",
            PropertyType::Dict(_) => "dictionary",
        }
    }
}

/// One property of a settings schema
#[derive(Debug, Clone)]
pub struct PropertySchema {
    name: String,
    ty: PropertyType,
    defaults: Vec<DefaultValueStrategy>,
}

impl PropertySchema {
    /// A value property (scalar, enum, value-object, or collection)
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty: PropertyType::Value(ty),
            defaults: Vec::new(),
        }
    }

    /// An ordered collection of `item`
    pub fn list(name: impl Into<String>, item: ValueType) -> Self {
        Self::new(name, ValueType::list_of(item))
    }

    /// A keyed dictionary of nested `schema` instances
    pub fn dict(name: impl Into<String>, schema: &Arc<SettingsSchema>) -> Self {
        Self {
            name: name.into(),
            ty: PropertyType::Dict(Arc::clone(schema)),
            defaults: Vec::new(),
        }
    }

    /// Declare a default-value strategy
    ///
    /// Declarations accumulate exactly as the schema source supplies them;
    /// more than one is rejected when the schema is synthesized.
    pub fn with_default(mut self, strategy: DefaultValueStrategy) -> Self {
        self.defaults.push(strategy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.ty
    }

    /// The value type, or `None` for dictionary properties
    pub fn value_type(&self) -> Option<&ValueType> {
        match &self.ty {
            PropertyType::Value(ty) => Some(ty),
            PropertyType::Dict(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(&self.ty, PropertyType::Value(ty) if ty.is_collection())
    }

    pub fn defaults(&self) -> &[DefaultValueStrategy] {
        &self.defaults
    }
}

/// A resolved settings schema: its own properties after all inherited ones
///
/// Immutable once built. Each build mints a fresh [`SchemaId`], the key the
/// synthesis engine caches variant factories under.
#[derive(Debug)]
pub struct SettingsSchema {
    id: SchemaId,
    name: String,
    base: Option<Arc<SettingsSchema>>,
    properties: Vec<PropertySchema>,
    index: HashMap<String, usize>,
}

impl SettingsSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            base: None,
            properties: Vec::new(),
        }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Arc<SettingsSchema>> {
        self.base.as_ref()
    }

    /// Inherited properties first, in declaration order
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// True if this schema is `id` or inherits from it
    pub fn is_a(&self, id: SchemaId) -> bool {
        let mut current = Some(self);
        while let Some(schema) = current {
            if schema.id == id {
                return true;
            }
            current = schema.base.as_deref();
        }
        false
    }

    /// Nested schemas referenced by dictionary properties
    pub fn nested_schemas(&self) -> impl Iterator<Item = &Arc<SettingsSchema>> {
        self.properties.iter().filter_map(|p| match p.property_type() {
            PropertyType::Dict(schema) => Some(schema),
            PropertyType::Value(_) => None,
        })
    }
}

/// Builder for [`SettingsSchema`]
pub struct SchemaBuilder {
    name: String,
    base: Option<Arc<SettingsSchema>>,
    properties: Vec<PropertySchema>,
}

impl SchemaBuilder {
    /// Inherit every property of `base`
    pub fn extends(mut self, base: &Arc<SettingsSchema>) -> Self {
        self.base = Some(Arc::clone(base));
        self
    }

    pub fn property(mut self, property: PropertySchema) -> Self {
        self.properties.push(property);
        self
    }

    /// Resolve the ordered property union
    ///
    /// # Errors
    ///
    /// * `InvalidSchema` - If the schema or a property name is empty
    /// * `DuplicateProperty` - If a name repeats anywhere in the inheritance chain
    pub fn build(self) -> Result<Arc<SettingsSchema>> {
        if self.name.trim().is_empty() {
            return Err(MorphsetError::InvalidSchema {
                reason: "Schema name cannot be empty".to_string(),
            });
        }

        let mut properties: Vec<PropertySchema> = self
            .base
            .as_ref()
            .map(|b| b.properties.clone())
            .unwrap_or_default();
        properties.extend(self.properties);

        let mut index = HashMap::with_capacity(properties.len());
        for (i, property) in properties.iter().enumerate() {
            if property.name.trim().is_empty() {
                return Err(MorphsetError::InvalidSchema {
                    reason: format!("Property #{} of {} has an empty name", i, self.name),
                });
            }
            if index.insert(property.name.clone(), i).is_some() {
                return Err(MorphsetError::DuplicateProperty {
                    schema: self.name,
                    property: property.name.clone(),
                });
            }
        }

        Ok(Arc::new(SettingsSchema {
            id: SchemaId::new(),
            name: self.name,
            base: self.base,
            properties,
            index,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Arc<SettingsSchema> {
        SettingsSchema::builder("Base")
            .property(PropertySchema::new("title", ValueType::Str))
            .build()
            .unwrap()
    }

    #[test]
    fn test_inherited_properties_come_first() {
        let base = base();
        let derived = SettingsSchema::builder("Derived")
            .extends(&base)
            .property(PropertySchema::new("count", ValueType::Int))
            .build()
            .unwrap();

        let names: Vec<_> = derived.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["title", "count"]);
        assert_eq!(derived.position("count"), Some(1));
        assert!(derived.is_a(base.id()));
        assert!(!base.is_a(derived.id()));
    }

    #[test]
    fn test_duplicate_across_inheritance_rejected() {
        let base = base();
        let err = SettingsSchema::builder("Derived")
            .extends(&base)
            .property(PropertySchema::new("title", ValueType::Int))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            MorphsetError::DuplicateProperty {
                schema: "Derived".to_string(),
                property: "title".to_string(),
            }
        );
    }

    #[test]
    fn test_each_build_mints_new_identity() {
        assert_ne!(base().id(), base().id());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            SettingsSchema::builder(" ").build(),
            Err(MorphsetError::InvalidSchema { .. })
        ));
    }
}
