//! Default-value strategies resolved through the engine
mod common;

use std::sync::Arc;

use common::{catalog, color_type, engine, entry_schema, handle_type, point_type, rich_schema, shape_type};
use morphset_core::model::{EnumValue, ObjectType, ObjectValue};
use morphset_core::{
    DefaultValueStrategy, MorphsetError, PropertySchema, SettingsKind, SettingsSchema,
    SynthesisEngine, TypeCatalog, Value, ValueType,
};

fn single(property: PropertySchema) -> Arc<SettingsSchema> {
    SettingsSchema::builder("Probe")
        .property(property)
        .build()
        .unwrap()
}

fn default_of(property: PropertySchema) -> Value {
    engine()
        .create(&single(property), SettingsKind::Copy, None)
        .unwrap()
        .get("value")
        .unwrap()
}

fn generation_error(property: PropertySchema) -> MorphsetError {
    engine()
        .create(&single(property), SettingsKind::Copy, None)
        .unwrap_err()
}

#[test]
fn test_zero_values_without_strategy() {
    let instance = engine()
        .create(
            &SettingsSchema::builder("Zeros")
                .property(PropertySchema::new("b", ValueType::Bool))
                .property(PropertySchema::new("i", ValueType::Int))
                .property(PropertySchema::new("f", ValueType::Float))
                .property(PropertySchema::new("s", ValueType::Str))
                .property(PropertySchema::new("e", ValueType::Enum(color_type())))
                .property(PropertySchema::new("o", ValueType::Object(point_type())))
                .property(PropertySchema::list("l", ValueType::Int))
                .property(PropertySchema::dict("d", &entry_schema()))
                .build()
                .unwrap(),
            SettingsKind::Read,
            None,
        )
        .unwrap();

    assert_eq!(instance.get("b").unwrap(), Value::Bool(false));
    assert_eq!(instance.get("i").unwrap(), Value::Int(0));
    assert_eq!(instance.get("f").unwrap(), Value::Float(0.0));
    assert_eq!(instance.get("s").unwrap(), Value::from(""));
    assert_eq!(
        instance.get("e").unwrap(),
        Value::Enum(EnumValue {
            type_name: "Color".to_string(),
            ordinal: 0
        })
    );
    assert_eq!(instance.get("o").unwrap(), Value::Null);
    assert_eq!(instance.get("l").unwrap(), Value::List(vec![]));
    assert!(instance.dict("d").unwrap().is_empty());
}

#[test]
fn test_constants_hold_on_every_kind() {
    let engine = engine();
    let schema = rich_schema();

    for kind in SettingsKind::ALL {
        let instance = engine.create(&schema, kind, None).unwrap();
        assert_eq!(instance.get("enabled").unwrap(), Value::Bool(true));
        assert_eq!(instance.get("count").unwrap(), Value::Int(7));
        // int constant widened to the float property
        assert_eq!(instance.get("ratio").unwrap(), Value::Float(2.0));
        assert_eq!(
            instance.get("color").unwrap(),
            Value::Enum(EnumValue {
                type_name: "Color".to_string(),
                ordinal: 1
            })
        );
    }
}

#[test]
fn test_constructor_call_picks_overload_by_arity() {
    let value = default_of(
        PropertySchema::new("value", ValueType::Object(point_type())).with_default(
            DefaultValueStrategy::construct("Point", vec![Value::Int(3), Value::Int(4)]),
        ),
    );
    assert_eq!(
        value,
        Value::from(ObjectValue::new("Point").with_field("x", 3).with_field("y", 4))
    );

    let value = default_of(
        PropertySchema::new("value", ValueType::Object(point_type()))
            .with_default(DefaultValueStrategy::construct("Point", vec![])),
    );
    assert_eq!(
        value,
        Value::from(ObjectValue::new("Point").with_field("x", 0).with_field("y", 0))
    );
}

#[test]
fn test_static_call_returning_shape_for_scalars() {
    let greeting = default_of(
        PropertySchema::new("value", ValueType::Str)
            .with_default(DefaultValueStrategy::static_call("Presets", "Greeting", vec![])),
    );
    assert_eq!(greeting, Value::from("Hi there"));

    let named = default_of(
        PropertySchema::new("value", ValueType::Str).with_default(
            DefaultValueStrategy::static_call("Presets", "Greeting", vec![Value::from("Madoka")]),
        ),
    );
    assert_eq!(named, Value::from("Hi Madoka"));

    let scaled = default_of(
        PropertySchema::new("value", ValueType::Float).with_default(
            DefaultValueStrategy::static_call("Presets", "Scale", vec![Value::Int(2)]),
        ),
    );
    assert_eq!(scaled, Value::Float(3.0));
}

#[test]
fn test_static_call_on_own_type_without_catalog_entry() {
    let engine = SynthesisEngine::default();
    let schema = single(
        PropertySchema::new("value", ValueType::Object(point_type()))
            .with_default(DefaultValueStrategy::static_call("Point", "Origin", vec![])),
    );
    let instance = engine.create(&schema, SettingsKind::Copy, None).unwrap();
    assert_eq!(
        instance.get("value").unwrap(),
        Value::from(ObjectValue::new("Point").with_field("x", 0).with_field("y", 0))
    );
}

#[test]
fn test_collections_prefer_in_place_and_fall_back_to_returning() {
    // Presets.Fill has both shapes: the in-place one appends in order
    let in_place = default_of(PropertySchema::list("value", ValueType::Str).with_default(
        DefaultValueStrategy::static_call(
            "Presets",
            "Fill",
            vec![Value::from("a"), Value::from("b")],
        ),
    ));
    assert_eq!(in_place, Value::str_list(["a", "b"]));

    // A host with only a returning overload is still accepted
    let host = ObjectType::builder("Seeds")
        .static_returning(
            "Make",
            vec![],
            Some(ValueType::list_of(ValueType::Int)),
            |_| Value::List(vec![Value::Int(1), Value::Int(2)]),
        )
        .build();
    let engine = SynthesisEngine::new(TypeCatalog::new().with(host));
    let schema = single(
        PropertySchema::list("value", ValueType::Int)
            .with_default(DefaultValueStrategy::static_call("Seeds", "Make", vec![])),
    );
    let instance = engine.create(&schema, SettingsKind::Copy, None).unwrap();
    assert_eq!(
        instance.get("value").unwrap(),
        Value::List(vec![Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn test_unresolvable_static_call_names_type_and_method() {
    let err = generation_error(
        PropertySchema::new("value", ValueType::Str)
            .with_default(DefaultValueStrategy::static_call("Presets", "Missing", vec![])),
    );
    assert_eq!(err.to_string(), "default-value resolution failed: Presets.Missing");
    assert!(err.is_generation_error());
}

#[test]
fn test_static_call_with_wrong_value_type_fails() {
    // Greeting returns a string; the property is an int
    let err = generation_error(
        PropertySchema::new("value", ValueType::Int)
            .with_default(DefaultValueStrategy::static_call("Presets", "Greeting", vec![])),
    );
    assert!(matches!(err, MorphsetError::DefaultResolutionFailed { .. }));
}

#[test]
fn test_ambiguous_static_call_fails() {
    let err = generation_error(
        PropertySchema::new("value", ValueType::Str).with_default(
            DefaultValueStrategy::static_call("Presets", "Twin", vec![Value::Float(1.0)]),
        ),
    );
    assert_eq!(err.to_string(), "default-value resolution failed: Presets.Twin");
}

#[test]
fn test_multiple_strategies_conflict() {
    let err = generation_error(
        PropertySchema::new("value", ValueType::Str)
            .with_default(DefaultValueStrategy::constant("a"))
            .with_default(DefaultValueStrategy::constant("b")),
    );
    assert!(matches!(
        err,
        MorphsetError::ConflictingDefaults { count: 2, .. }
    ));
    assert!(err
        .to_string()
        .starts_with("conflicting default-value declarations"));
}

#[test]
fn test_unconvertible_constant_fails() {
    let err = generation_error(
        PropertySchema::new("value", ValueType::Int)
            .with_default(DefaultValueStrategy::constant("seven")),
    );
    assert!(matches!(err, MorphsetError::ConstantNotConvertible { .. }));

    let err = generation_error(
        PropertySchema::new("value", ValueType::Enum(color_type()))
            .with_default(DefaultValueStrategy::constant(9)),
    );
    assert!(matches!(err, MorphsetError::ConstantNotConvertible { .. }));
}

#[test]
fn test_constructor_errors() {
    let err = generation_error(
        PropertySchema::new("value", ValueType::Object(point_type()))
            .with_default(DefaultValueStrategy::construct("Nowhere", vec![])),
    );
    assert!(matches!(err, MorphsetError::UnknownType { .. }));

    let err = generation_error(
        PropertySchema::new("value", ValueType::Object(point_type()))
            .with_default(DefaultValueStrategy::construct("Point", vec![Value::Int(1)])),
    );
    assert!(matches!(
        err,
        MorphsetError::ConstructorResolutionFailed { arity: 1, .. }
    ));
}

#[test]
fn test_collection_of_abstract_items_is_unconstructible() {
    let err = generation_error(PropertySchema::list(
        "value",
        ValueType::Object(shape_type()),
    ));
    assert!(matches!(
        err,
        MorphsetError::UnconstructibleCollection { .. }
    ));
}

#[test]
fn test_default_on_dictionary_is_rejected() {
    let err = generation_error(
        PropertySchema::dict("value", &entry_schema())
            .with_default(DefaultValueStrategy::constant("x")),
    );
    assert!(matches!(err, MorphsetError::UnsupportedDefault { .. }));
}

#[test]
fn test_missing_equality_only_blocks_observable_kinds() {
    let engine = SynthesisEngine::new(catalog());
    let schema = single(
        PropertySchema::new("value", ValueType::Object(handle_type()))
            .with_default(DefaultValueStrategy::construct("Handle", vec![])),
    );

    assert!(engine.create(&schema, SettingsKind::Copy, None).is_ok());
    assert!(engine.create(&schema, SettingsKind::Read, None).is_ok());
    for kind in [SettingsKind::Inpc, SettingsKind::Real] {
        let err = engine.create(&schema, kind, None).unwrap_err();
        assert!(matches!(err, MorphsetError::MissingEquality { .. }), "{}", kind);
    }
}

#[test]
fn test_missing_equality_in_list_items_blocks_observable_kinds() {
    let engine = SynthesisEngine::new(catalog());
    let schema = single(PropertySchema::list("value", ValueType::Object(handle_type())));
    assert!(engine.create(&schema, SettingsKind::Copy, None).is_ok());
    assert!(matches!(
        engine.create(&schema, SettingsKind::Inpc, None),
        Err(MorphsetError::MissingEquality { .. })
    ));
}
