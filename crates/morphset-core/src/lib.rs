//! Morphset Core - schema-driven settings variant synthesis
//!
//! This crate turns a declarative settings schema into four concrete
//! variants differing in mutability and observability:
//! - Copy: plain mutable record
//! - Read: immutable after construction
//! - Inpc: observable, one notification per effective write
//! - Real: observable, the instance a provider treats as authoritative
//!
//! It also provides the default-value strategy interpreter, the in-place
//! collection reconciler used by observable variants, keyed dictionaries of
//! nested instances, and the caching synthesis engine tying them together.

pub use morphset_core_types as core_types;

pub mod blueprint;
pub mod collection;
pub mod defaults;
pub mod dict;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod observe;
pub mod provider;
pub mod reconcile;
pub mod variants;

// Re-export commonly used types
pub use collection::ObservableList;
pub use core_types::{SchemaId, SettingsKind};
pub use dict::SettingsDict;
pub use engine::{SynthesisEngine, VariantFactory};
pub use errors::{ExError, ExErrorKind, MorphsetError, Result};
pub use model::{
    DefaultValueStrategy, EnumType, ObjectType, ObjectValue, PropertySchema, SettingsSchema,
    TypeCatalog, Value, ValueType,
};
pub use observe::{ChangeCallback, ChangeNotifier, PropertyChanged, SubscriptionId};
pub use provider::{ProviderLink, SettingsProvider};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use variants::{
    CopySettings, InpcSettings, ReadSettings, RealSettings, Settings, ShapeId, Variant,
};
