//! Built-in demo schemas and the type catalog they reference

use std::sync::Arc;

use morphset_core::{
    DefaultValueStrategy, EnumType, MorphsetError, ObjectType, ObjectValue, PropertySchema,
    SettingsSchema, TypeCatalog, Value, ValueType,
};

/// Demo schema names, in listing order
pub const NAMES: [&str; 5] = ["Simple", "Listy", "Window", "Profile", "Gadget"];

pub fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with(point_type())
        .with(presets_type())
        .with(handle_type())
}

/// Build the demo schema called `name` (case-insensitive)
pub fn schema(name: &str) -> Result<Arc<SettingsSchema>, MorphsetError> {
    match name.to_ascii_lowercase().as_str() {
        "simple" => simple(),
        "listy" => listy(),
        "window" => window(),
        "profile" => profile(),
        "gadget" => gadget(),
        _ => Err(MorphsetError::InvalidSchema {
            reason: format!(
                "no demo schema named '{}' (available: {})",
                name,
                NAMES.join(", ")
            ),
        }),
    }
}

fn point_type() -> Arc<ObjectType> {
    fn point(x: Value, y: Value) -> Value {
        Value::from(ObjectValue::new("Point").with_field("x", x).with_field("y", y))
    }
    ObjectType::builder("Point")
        .constructor(vec![], |_| point(Value::Int(0), Value::Int(0)))
        .constructor(vec![ValueType::Int, ValueType::Int], |args| {
            point(args[0].clone(), args[1].clone())
        })
        .build()
}

fn presets_type() -> Arc<ObjectType> {
    ObjectType::builder("Presets")
        .static_in_place(
            "Fill",
            vec![ValueType::Str, ValueType::Str],
            Some(ValueType::list_of(ValueType::Str)),
            |current, args| {
                if let Some(items) = current.as_list_mut() {
                    items.extend(args.iter().cloned());
                }
            },
        )
        .build()
}

fn handle_type() -> Arc<ObjectType> {
    ObjectType::builder("Handle")
        .without_equality()
        .constructor(vec![], |_| Value::from(ObjectValue::new("Handle")))
        .build()
}

fn simple() -> Result<Arc<SettingsSchema>, MorphsetError> {
    SettingsSchema::builder("Simple")
        .property(
            PropertySchema::new("text", ValueType::Str)
                .with_default(DefaultValueStrategy::constant("Hello World!")),
        )
        .build()
}

fn listy() -> Result<Arc<SettingsSchema>, MorphsetError> {
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
}

fn window() -> Result<Arc<SettingsSchema>, MorphsetError> {
    let theme = EnumType::new("Theme", [("Light", 0), ("Dark", 1)]);
    SettingsSchema::builder("Window")
        .property(
            PropertySchema::new("maximized", ValueType::Bool)
                .with_default(DefaultValueStrategy::constant(false)),
        )
        .property(
            PropertySchema::new("theme", ValueType::Enum(theme))
                .with_default(DefaultValueStrategy::constant("Dark")),
        )
        .property(
            PropertySchema::new("origin", ValueType::Object(point_type())).with_default(
                DefaultValueStrategy::construct("Point", vec![Value::Int(40), Value::Int(30)]),
            ),
        )
        .property(
            PropertySchema::new("zoom", ValueType::Float)
                .with_default(DefaultValueStrategy::constant(1)),
        )
        .build()
}

fn profile() -> Result<Arc<SettingsSchema>, MorphsetError> {
    let entry = SettingsSchema::builder("Entry")
        .property(
            PropertySchema::new("label", ValueType::Str)
                .with_default(DefaultValueStrategy::constant("untitled")),
        )
        .build()?;
    SettingsSchema::builder("Profile")
        .property(PropertySchema::new("name", ValueType::Str))
        .property(PropertySchema::dict("entries", &entry))
        .build()
}

/// Holds a value without equality, so only Copy and Read are available
fn gadget() -> Result<Arc<SettingsSchema>, MorphsetError> {
    SettingsSchema::builder("Gadget")
        .property(PropertySchema::new("handle", ValueType::Object(handle_type())))
        .build()
}
