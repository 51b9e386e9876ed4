//! Per-schema resolved form shared by every variant of a schema

use std::sync::Arc;

use crate::defaults::{self, Initializer};
use crate::errors::{MorphsetError, Result};
use crate::model::{PropertyType, SettingsSchema, TypeCatalog};

/// A schema with one resolved initializer per property
#[derive(Debug)]
pub struct Blueprint {
    schema: Arc<SettingsSchema>,
    names: Vec<Arc<str>>,
    initializers: Vec<Initializer>,
}

impl Blueprint {
    /// Resolve every property's default-value strategy
    ///
    /// # Errors
    ///
    /// The first generation error raised by [`defaults::resolve`].
    pub fn resolve(schema: &Arc<SettingsSchema>, catalog: &TypeCatalog) -> Result<Self> {
        let initializers = schema
            .properties()
            .iter()
            .map(|p| defaults::resolve(schema, p, catalog))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            schema: Arc::clone(schema),
            names: schema
                .properties()
                .iter()
                .map(|p| Arc::from(p.name()))
                .collect(),
            initializers,
        })
    }

    pub fn schema(&self) -> &Arc<SettingsSchema> {
        &self.schema
    }

    pub(crate) fn name(&self, position: usize) -> &Arc<str> {
        &self.names[position]
    }

    pub(crate) fn initializer(&self, position: usize) -> &Initializer {
        &self.initializers[position]
    }
}

/// First property whose value type cannot be compared for equality
///
/// Observable variants suppress equal writes, so such a property rules them
/// out while plain and read-only variants remain available.
pub fn missing_equality(schema: &SettingsSchema) -> Option<MorphsetError> {
    schema.properties().iter().find_map(|p| match p.property_type() {
        PropertyType::Value(ty) => {
            ty.find_missing_equality()
                .map(|missing| MorphsetError::MissingEquality {
                    schema: schema.name().to_string(),
                    property: p.name().to_string(),
                    type_name: missing.name().to_string(),
                })
        }
        PropertyType::Dict(_) => None,
    })
}
