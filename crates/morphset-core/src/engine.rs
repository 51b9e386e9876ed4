//! Synthesis engine
//!
//! Maps a schema identity to its four variant factories. A schema is
//! resolved on first use, together with every schema nested in its
//! dictionary properties, and the result (success or generation error) is
//! cached for the lifetime of the engine.
//!
//! ## Cache
//!
//! Readers load an immutable snapshot of the cache without locking. A miss
//! takes the resolve lock, checks again in case another thread won the race,
//! resolves into a copy of the snapshot and publishes it with a single swap.
//! Readers never observe a partially resolved entry.
//!
//! ## Logging
//!
//! The engine owns boundary logging: `synthesize` when a schema is resolved
//! and `reset_to_defaults`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use morphset_core_types::{SchemaId, SettingsKind};
use parking_lot::Mutex;

use crate::blueprint::{self, Blueprint};
use crate::errors::{MorphsetError, Result};
use crate::model::{SettingsSchema, TypeCatalog};
use crate::variants::record::Record;
use crate::variants::{
    CopySettings, InpcSettings, ReadSettings, RealSettings, Settings, ShapeId, Variant,
};
use crate::{log_op_end, log_op_error, log_op_start};

/// Outcome of resolving one schema
#[derive(Debug)]
struct Resolution {
    blueprint: Result<Arc<Blueprint>>,
    /// Raised for Inpc/Real only; Copy/Read stay available
    observable: Option<MorphsetError>,
}

impl Resolution {
    fn blueprint_for(&self, kind: SettingsKind) -> Result<Arc<Blueprint>> {
        let blueprint = self.blueprint.clone()?;
        match &self.observable {
            Some(err) if kind.is_observable() => Err(err.clone()),
            _ => Ok(blueprint),
        }
    }
}

type Cache = HashMap<SchemaId, Arc<Resolution>>;

struct EngineInner {
    catalog: TypeCatalog,
    cache: ArcSwap<Cache>,
    resolve_lock: Mutex<()>,
}

/// Cloneable handle to a shared synthesis engine
#[derive(Clone)]
pub struct SynthesisEngine {
    inner: Arc<EngineInner>,
}

impl SynthesisEngine {
    /// Create an engine whose default-value strategies may reference the
    /// types in `catalog`
    pub fn new(catalog: TypeCatalog) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                catalog,
                cache: ArcSwap::from_pointee(HashMap::new()),
                resolve_lock: Mutex::new(()),
            }),
        }
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.inner.catalog
    }

    /// True once `schema` has been resolved (successfully or not)
    pub fn is_resolved(&self, schema: &SettingsSchema) -> bool {
        self.inner.cache.load().contains_key(&schema.id())
    }

    /// Number of schemas resolved so far, nested ones included
    pub fn resolved_count(&self) -> usize {
        self.inner.cache.load().len()
    }

    /// Factory for one kind of `schema`
    ///
    /// # Errors
    ///
    /// The schema's generation error, identical on every call.
    pub fn factory(
        &self,
        schema: &Arc<SettingsSchema>,
        kind: SettingsKind,
    ) -> Result<VariantFactory> {
        let blueprint = self.resolution(schema).blueprint_for(kind)?;
        Ok(VariantFactory {
            engine: self.clone(),
            blueprint,
            kind,
        })
    }

    /// Build an instance
    ///
    /// Without a source the instance is default-constructed; with one it is
    /// a deep copy of the source.
    ///
    /// # Errors
    ///
    /// * Any generation error of the schema
    /// * `SchemaMismatch` - If `source` is not an instance of `schema` or a derived schema
    pub fn create(
        &self,
        schema: &Arc<SettingsSchema>,
        kind: SettingsKind,
        source: Option<&dyn Settings>,
    ) -> Result<Box<dyn Settings>> {
        self.factory(schema, kind)?.create(source)
    }

    /// [`SynthesisEngine::create`] returning the concrete variant type
    ///
    /// # Errors
    ///
    /// As [`SynthesisEngine::create`].
    pub fn create_as<V: Variant>(
        &self,
        schema: &Arc<SettingsSchema>,
        source: Option<&dyn Settings>,
    ) -> Result<V> {
        let instance = self.create(schema, V::KIND, source)?;
        instance
            .into_any()
            .downcast::<V>()
            .map(|boxed| *boxed)
            .map_err(|_| MorphsetError::Internal {
                message: format!("{} factory produced another type", V::KIND),
            })
    }

    /// Concrete shape of `kind` for `schema`, without constructing an instance
    ///
    /// # Errors
    ///
    /// Any generation error of the schema.
    pub fn type_of(&self, schema: &Arc<SettingsSchema>, kind: SettingsKind) -> Result<ShapeId> {
        self.factory(schema, kind).map(|f| f.shape())
    }

    /// Restore every property of `target` to its default value
    ///
    /// Defaults always come from a freshly built Read instance, never from a
    /// Real one.
    ///
    /// # Errors
    ///
    /// `ReadOnlyViolation` if `target` is itself a Read instance.
    pub fn reset_to_defaults(&self, target: &mut dyn Settings) -> Result<()> {
        let schema = Arc::clone(target.schema());
        log_op_start!("reset_to_defaults", schema = schema.name(), kind = %target.kind());
        let start = std::time::Instant::now();

        let result = self
            .create(&schema, SettingsKind::Read, None)
            .and_then(|defaults| target.copy(Some(defaults.as_ref())));

        match &result {
            Ok(()) => {
                log_op_end!(
                    "reset_to_defaults",
                    duration_ms = start.elapsed().as_millis() as u64,
                    schema = schema.name()
                );
            }
            Err(e) => {
                log_op_error!(
                    "reset_to_defaults",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    schema = schema.name()
                );
            }
        }
        result
    }

    fn resolution(&self, schema: &Arc<SettingsSchema>) -> Arc<Resolution> {
        if let Some(hit) = self.inner.cache.load().get(&schema.id()) {
            return Arc::clone(hit);
        }

        let _guard = self.inner.resolve_lock.lock();
        let current = self.inner.cache.load_full();
        if let Some(hit) = current.get(&schema.id()) {
            return Arc::clone(hit);
        }

        log_op_start!("synthesize", schema = schema.name());
        let start = std::time::Instant::now();

        let mut staged: Cache = (*current).clone();
        let resolution = self.resolve_into(schema, &mut staged);
        let resolved_count = staged.len() - current.len();
        self.inner.cache.store(Arc::new(staged));

        match (&resolution.blueprint, &resolution.observable) {
            (Err(e), _) => {
                log_op_error!(
                    "synthesize",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    schema = schema.name()
                );
            }
            (Ok(_), observable) => {
                if let Some(e) = observable {
                    tracing::warn!(
                        schema = schema.name(),
                        error = %e,
                        "observable variants unavailable"
                    );
                }
                log_op_end!(
                    "synthesize",
                    duration_ms = start.elapsed().as_millis() as u64,
                    schema = schema.name(),
                    property_count = schema.properties().len() as u64,
                    resolved_count = resolved_count as u64
                );
            }
        }
        resolution
    }

    /// Resolve `schema` and its nested schemas into `staged`
    ///
    /// A nested schema's failure is the owner's failure: no owner variant is
    /// produced whose dictionaries could not build their entries.
    fn resolve_into(&self, schema: &Arc<SettingsSchema>, staged: &mut Cache) -> Arc<Resolution> {
        if let Some(done) = staged.get(&schema.id()) {
            return Arc::clone(done);
        }

        let nested: Vec<Arc<Resolution>> = schema
            .nested_schemas()
            .map(|n| self.resolve_into(n, staged))
            .collect();

        let mut resolution = Resolution {
            blueprint: Blueprint::resolve(schema, &self.inner.catalog).map(Arc::new),
            observable: blueprint::missing_equality(schema),
        };
        for inner in nested {
            if resolution.blueprint.is_ok() {
                if let Err(e) = &inner.blueprint {
                    resolution.blueprint = Err(e.clone());
                }
            }
            if resolution.observable.is_none() {
                resolution.observable = inner.observable.clone();
            }
        }

        tracing::debug!(
            schema = schema.name(),
            ok = resolution.blueprint.is_ok(),
            "schema resolved"
        );
        let resolution = Arc::new(resolution);
        staged.insert(schema.id(), Arc::clone(&resolution));
        resolution
    }
}

impl Default for SynthesisEngine {
    fn default() -> Self {
        Self::new(TypeCatalog::new())
    }
}

impl fmt::Debug for SynthesisEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesisEngine")
            .field("catalog_types", &self.inner.catalog.len())
            .field("resolved", &self.resolved_count())
            .finish()
    }
}

/// Builds instances of one kind of one schema
#[derive(Clone)]
pub struct VariantFactory {
    engine: SynthesisEngine,
    blueprint: Arc<Blueprint>,
    kind: SettingsKind,
}

impl VariantFactory {
    pub fn kind(&self) -> SettingsKind {
        self.kind
    }

    pub fn schema(&self) -> &Arc<SettingsSchema> {
        self.blueprint.schema()
    }

    pub fn shape(&self) -> ShapeId {
        ShapeId::new(self.blueprint.schema(), self.kind)
    }

    /// Default-construct, or copy-construct from `source`
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` if `source` is not an instance of this schema or a
    /// derived one.
    pub fn create(&self, source: Option<&dyn Settings>) -> Result<Box<dyn Settings>> {
        let blueprint = Arc::clone(&self.blueprint);
        let record = match source {
            None => Record::with_defaults(&self.engine, blueprint, self.kind),
            Some(source) => Record::copied_from(&self.engine, blueprint, self.kind, source)?,
        };
        let instance: Box<dyn Settings> = match self.kind {
            SettingsKind::Copy => Box::new(CopySettings::from_record(record)),
            SettingsKind::Read => Box::new(ReadSettings::from_record(record)),
            SettingsKind::Inpc => Box::new(InpcSettings::from_record(record)),
            SettingsKind::Real => Box::new(RealSettings::from_record(record)),
        };
        Ok(instance)
    }
}

impl fmt::Debug for VariantFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantFactory")
            .field("shape", &self.shape())
            .finish()
    }
}
