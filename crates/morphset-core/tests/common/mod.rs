//! Shared schemas, catalog and helpers for morphset-core integration tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use morphset_core::model::{
    DefaultValueStrategy, EnumType, ObjectType, ObjectValue, PropertySchema, SettingsSchema,
    TypeCatalog, Value, ValueType,
};
use morphset_core::{
    CopySettings, PropertyChanged, ProviderLink, RealSettings, Settings, SettingsProvider,
    SubscriptionId, SynthesisEngine,
};

/// `Simple { text: string = "Hello World!" }`
#[allow(dead_code)]
pub fn simple_schema() -> Arc<SettingsSchema> {
    SettingsSchema::builder("Simple")
        .property(
            PropertySchema::new("text", ValueType::Str)
                .with_default(DefaultValueStrategy::constant("Hello World!")),
        )
        .build()
        .expect("Simple schema should build")
}

/// `Listy { lines: list<string>, populated by Presets.Fill("Homura", "Madoka") }`
#[allow(dead_code)]
pub fn listy_schema() -> Arc<SettingsSchema> {
    SettingsSchema::builder("Listy")
        .property(
            PropertySchema::list("lines", ValueType::Str).with_default(
                DefaultValueStrategy::static_call(
                    "Presets",
                    "Fill",
                    vec![Value::from("Homura"), Value::from("Madoka")],
                ),
            ),
        )
        .build()
        .expect("Listy schema should build")
}

#[allow(dead_code)]
pub fn color_type() -> Arc<EnumType> {
    EnumType::new("Color", [("Red", 0), ("Green", 1), ("Blue", 2)])
}

/// Value-object with equality and two constructors
#[allow(dead_code)]
pub fn point_type() -> Arc<ObjectType> {
    ObjectType::builder("Point")
        .constructor(vec![], |_| {
            Value::from(ObjectValue::new("Point").with_field("x", 0).with_field("y", 0))
        })
        .constructor(vec![ValueType::Int, ValueType::Int], |args| {
            Value::from(
                ObjectValue::new("Point")
                    .with_field("x", args[0].clone())
                    .with_field("y", args[1].clone()),
            )
        })
        .static_returning("Origin", vec![], None, |_| {
            Value::from(ObjectValue::new("Point").with_field("x", 0).with_field("y", 0))
        })
        .build()
}

/// Value-object without equality: fine for Copy/Read, fatal for Inpc/Real
#[allow(dead_code)]
pub fn handle_type() -> Arc<ObjectType> {
    ObjectType::builder("Handle")
        .without_equality()
        .constructor(vec![], |_| Value::from(ObjectValue::new("Handle")))
        .build()
}

/// Abstract type: collections of it cannot be materialized
#[allow(dead_code)]
pub fn shape_type() -> Arc<ObjectType> {
    ObjectType::builder("Shape").abstract_type().build()
}

/// Static-method host used by StaticCall strategies
#[allow(dead_code)]
pub fn presets_type() -> Arc<ObjectType> {
    let strings = ValueType::list_of(ValueType::Str);
    ObjectType::builder("Presets")
        .static_in_place("Fill", vec![ValueType::Str, ValueType::Str], Some(strings.clone()), |current, args| {
            if let Some(items) = current.as_list_mut() {
                items.extend(args.iter().cloned());
            }
        })
        .static_returning("Fill", vec![ValueType::Str, ValueType::Str], Some(strings), |args| {
            Value::List(args.iter().rev().cloned().collect())
        })
        .static_returning("Greeting", vec![], Some(ValueType::Str), |_| Value::from("Hi there"))
        .static_returning("Greeting", vec![ValueType::Str], Some(ValueType::Str), |args| {
            Value::from(format!("Hi {}", args[0].as_str().unwrap_or_default()))
        })
        .static_returning("Scale", vec![ValueType::Int], Some(ValueType::Float), |args| {
            Value::Float(args[0].as_f64().unwrap_or_default() * 1.5)
        })
        .static_returning("Twin", vec![ValueType::Float], Some(ValueType::Str), |_| Value::from("float"))
        .static_returning("Twin", vec![ValueType::Float], Some(ValueType::Str), |_| Value::from("again"))
        .build()
}

#[allow(dead_code)]
pub fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with(point_type())
        .with(handle_type())
        .with(shape_type())
        .with(presets_type())
}

#[allow(dead_code)]
pub fn engine() -> SynthesisEngine {
    SynthesisEngine::new(catalog())
}

/// `Entry { label: string = "untitled", weight: int }` used as a dictionary value
#[allow(dead_code)]
pub fn entry_schema() -> Arc<SettingsSchema> {
    SettingsSchema::builder("Entry")
        .property(
            PropertySchema::new("label", ValueType::Str)
                .with_default(DefaultValueStrategy::constant("untitled")),
        )
        .property(PropertySchema::new("weight", ValueType::Int))
        .build()
        .expect("Entry schema should build")
}

/// `Profile { name: string, entries: dict<Entry> }`
#[allow(dead_code)]
pub fn profile_schema() -> Arc<SettingsSchema> {
    let entry = entry_schema();
    SettingsSchema::builder("Profile")
        .property(PropertySchema::new("name", ValueType::Str))
        .property(PropertySchema::dict("entries", &entry))
        .build()
        .expect("Profile schema should build")
}

/// A schema touching every value shape
#[allow(dead_code)]
pub fn rich_schema() -> Arc<SettingsSchema> {
    SettingsSchema::builder("Rich")
        .property(
            PropertySchema::new("enabled", ValueType::Bool)
                .with_default(DefaultValueStrategy::constant(true)),
        )
        .property(
            PropertySchema::new("count", ValueType::Int)
                .with_default(DefaultValueStrategy::constant(7)),
        )
        .property(
            PropertySchema::new("ratio", ValueType::Float)
                .with_default(DefaultValueStrategy::constant(2)),
        )
        .property(
            PropertySchema::new("color", ValueType::Enum(color_type()))
                .with_default(DefaultValueStrategy::constant("Green")),
        )
        .property(
            PropertySchema::new("origin", ValueType::Object(point_type())).with_default(
                DefaultValueStrategy::construct("Point", vec![Value::Int(3), Value::Int(4)]),
            ),
        )
        .property(PropertySchema::list("tags", ValueType::Str))
        .build()
        .expect("Rich schema should build")
}

/// Counts notifications per property name
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
    total: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `instance`, panicking if it is not observable
    pub fn attach(&self, instance: &dyn Settings) -> SubscriptionId {
        let events = Arc::clone(&self.events);
        let total = Arc::clone(&self.total);
        instance
            .subscribe(Arc::new(move |e: &PropertyChanged| {
                events.lock().unwrap().push(e.property.to_string());
                total.fetch_add(1, Ordering::SeqCst);
            }))
            .expect("instance should be observable")
    }

    pub fn count(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn properties(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

/// In-memory persistence provider: stores Copy snapshots of Real instances
///
/// Follows the durability recipe: snapshot a Real into a Copy, restore by
/// copying the stored Copy back into a Real.
#[allow(dead_code)]
pub struct MemoryProvider {
    engine: SynthesisEngine,
    stored: Mutex<HashMap<String, CopySettings>>,
}

#[allow(dead_code)]
impl MemoryProvider {
    pub fn new(engine: SynthesisEngine) -> Arc<Self> {
        Arc::new(Self {
            engine,
            stored: Mutex::new(HashMap::new()),
        })
    }

    /// Create the authoritative Real instance for `key`, linked to this provider
    pub fn open(
        self: &Arc<Self>,
        schema: &Arc<SettingsSchema>,
        key: &str,
    ) -> morphset_core::Result<RealSettings> {
        let mut real: RealSettings = self.engine.create_as(schema, None)?;
        if let Some(saved) = self.stored.lock().unwrap().get(key) {
            real.copy(Some(saved))?;
        }
        let provider: Arc<dyn SettingsProvider> = self.clone();
        real.set_provider(Some(ProviderLink::new(&provider, Some(key.to_string()))));
        Ok(real)
    }

    pub fn save(&self, real: &RealSettings) -> morphset_core::Result<()> {
        let key = real
            .provider()
            .and_then(|link| link.key().map(str::to_string))
            .unwrap_or_default();
        let snapshot: CopySettings = self.engine.create_as(real.schema(), Some(real))?;
        self.stored.lock().unwrap().insert(key, snapshot);
        Ok(())
    }
}

impl SettingsProvider for MemoryProvider {
    fn provider_name(&self) -> &str {
        "memory"
    }
}
