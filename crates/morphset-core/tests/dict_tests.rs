//! Keyed dictionaries of nested instances
mod common;

use common::{engine, profile_schema, Recorder};
use morphset_core::{
    CopySettings, InpcSettings, MorphsetError, RealSettings, Settings, SettingsKind, Value,
};

#[test]
fn test_add_new_builds_an_entry_of_the_owner_kind() {
    for kind in [SettingsKind::Copy, SettingsKind::Inpc, SettingsKind::Real] {
        let engine = engine();
        let mut profile = engine.create(&profile_schema(), kind, None).unwrap();

        let entry = profile.dict_mut("entries").unwrap().add_new("first").unwrap();
        assert_eq!(entry.kind(), kind);
        assert_eq!(entry.get("label").unwrap(), Value::from("untitled"));

        let dict = profile.dict("entries").unwrap();
        assert_eq!(dict.len(), 1);
        assert!(dict.contains_key("first"));
        assert_eq!(dict.kind(), kind);
    }
}

#[test]
fn test_add_new_and_delete_notify_once_each() {
    // GIVEN an observed Inpc owner
    let engine = engine();
    let mut profile: InpcSettings = engine.create_as(&profile_schema(), None).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&profile);

    // WHEN adding then deleting a key
    let entries = profile.dict_mut("entries").unwrap();
    entries.add_new("a").unwrap();
    assert!(entries.delete("a"));

    // THEN each raised exactly one notification for the dictionary property
    assert_eq!(recorder.properties(), vec!["entries", "entries"]);
}

#[test]
fn test_add_new_with_existing_key_is_duplicate_key() {
    let engine = engine();
    let mut profile = engine
        .create(&profile_schema(), SettingsKind::Copy, None)
        .unwrap();
    let entries = profile.dict_mut("entries").unwrap();
    entries.add_new("a").unwrap();

    let err = entries.add_new("a").map(|_| ()).unwrap_err();
    assert!(matches!(err, MorphsetError::DuplicateKey { .. }));
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_deleting_an_absent_key_reports_false_silently() {
    let engine = engine();
    let mut profile: RealSettings = engine.create_as(&profile_schema(), None).unwrap();
    let recorder = Recorder::new();
    recorder.attach(&profile);

    assert!(!profile.dict_mut("entries").unwrap().delete("ghost"));
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_entry_changes_are_forwarded_as_dictionary_changes() {
    let engine = engine();
    let mut profile: InpcSettings = engine.create_as(&profile_schema(), None).unwrap();
    profile.dict_mut("entries").unwrap().add_new("a").unwrap();

    let recorder = Recorder::new();
    recorder.attach(&profile);
    profile
        .dict_mut("entries")
        .unwrap()
        .get_mut("a")
        .unwrap()
        .set("weight", Value::Int(5))
        .unwrap();

    assert_eq!(recorder.properties(), vec!["entries"]);
}

#[test]
fn test_deleted_entry_no_longer_forwards() {
    let engine = engine();
    let mut profile: InpcSettings = engine.create_as(&profile_schema(), None).unwrap();
    let entry_notifier = {
        let entry = profile.dict_mut("entries").unwrap().add_new("a").unwrap();
        std::sync::Arc::clone(entry.notifier().unwrap())
    };
    assert_eq!(entry_notifier.subscriber_count(), 1);

    profile.dict_mut("entries").unwrap().delete("a");

    assert_eq!(entry_notifier.subscriber_count(), 0);
}

#[test]
fn test_assign_from_reconciles_keys_and_values() {
    // GIVEN a source with keys {a, b} and an observed target with keys {b, c}
    let engine = engine();
    let schema = profile_schema();
    let mut source: CopySettings = engine.create_as(&schema, None).unwrap();
    {
        let entries = source.dict_mut("entries").unwrap();
        entries.add_new("a").unwrap().set("weight", Value::Int(1)).unwrap();
        entries.add_new("b").unwrap().set("weight", Value::Int(2)).unwrap();
    }

    let mut target: RealSettings = engine.create_as(&schema, None).unwrap();
    {
        let entries = target.dict_mut("entries").unwrap();
        entries.add_new("b").unwrap();
        entries.add_new("c").unwrap();
    }
    let b_notifier = std::sync::Arc::clone(
        target
            .dict("entries")
            .unwrap()
            .get("b")
            .unwrap()
            .notifier()
            .unwrap(),
    );

    // WHEN assigning the source's dictionary
    target.copy(Some(&source)).unwrap();

    // THEN the keys match and values were deep-copied
    let entries = target.dict("entries").unwrap();
    assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(entries.get("a").unwrap().get("weight").unwrap(), Value::Int(1));
    assert_eq!(entries.get("b").unwrap().get("weight").unwrap(), Value::Int(2));

    // AND the surviving entry is the same instance, still forwarding
    assert!(std::sync::Arc::ptr_eq(
        &b_notifier,
        entries.get("b").unwrap().notifier().unwrap()
    ));
    assert_eq!(b_notifier.subscriber_count(), 1);
}

#[test]
fn test_assign_from_equal_dictionary_is_silent() {
    let engine = engine();
    let schema = profile_schema();
    let mut inpc: InpcSettings = engine.create_as(&schema, None).unwrap();
    inpc.dict_mut("entries").unwrap().add_new("a").unwrap();
    let twin: CopySettings = engine.create_as(&schema, Some(&inpc)).unwrap();

    let recorder = Recorder::new();
    recorder.attach(&inpc);
    inpc.copy(Some(&twin)).unwrap();

    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_copy_construction_deep_copies_entries() {
    let engine = engine();
    let schema = profile_schema();
    let mut original: CopySettings = engine.create_as(&schema, None).unwrap();
    original
        .dict_mut("entries")
        .unwrap()
        .add_new("a")
        .unwrap()
        .set("label", Value::from("kept"))
        .unwrap();

    let read = engine
        .create(&schema, SettingsKind::Read, Some(&original))
        .unwrap();
    original
        .dict_mut("entries")
        .unwrap()
        .get_mut("a")
        .unwrap()
        .set("label", Value::from("changed"))
        .unwrap();

    let entry = read.dict("entries").unwrap().get("a").unwrap();
    assert_eq!(entry.kind(), SettingsKind::Read);
    assert_eq!(entry.get("label").unwrap(), Value::from("kept"));
}

#[test]
fn test_read_owner_rejects_dictionary_mutation() {
    let engine = engine();
    let mut read = engine
        .create(&profile_schema(), SettingsKind::Read, None)
        .unwrap();
    assert!(matches!(
        read.dict_mut("entries"),
        Err(MorphsetError::ReadOnlyViolation { .. })
    ));
}

#[test]
fn test_get_and_snapshot_render_the_dictionary_as_a_map() {
    let engine = engine();
    let mut profile = engine
        .create(&profile_schema(), SettingsKind::Copy, None)
        .unwrap();
    profile.dict_mut("entries").unwrap().add_new("a").unwrap();

    let value = profile.get("entries").unwrap();
    let Value::Map(map) = value else {
        panic!("expected a map, got {:?}", value);
    };
    assert_eq!(map.len(), 1);
    assert_eq!(
        map["a"].as_object().unwrap().field("label"),
        Some(&Value::from("untitled"))
    );
    assert!(matches!(
        profile.set("entries", Value::Map(Default::default())),
        Err(MorphsetError::PropertyShapeMismatch { .. })
    ));
}

#[test]
fn test_assign_from_unrelated_entry_schema_leaves_dictionary_untouched() {
    // GIVEN an observed Real holding key `a`
    let engine = engine();
    let mut target: RealSettings = engine.create_as(&profile_schema(), None).unwrap();
    target.dict_mut("entries").unwrap().add_new("a").unwrap();
    let recorder = Recorder::new();
    recorder.attach(&target);

    // AND a dictionary from a separately built Profile holding key `b`
    let mut other: CopySettings = engine.create_as(&profile_schema(), None).unwrap();
    other.dict_mut("entries").unwrap().add_new("b").unwrap();

    // WHEN assigning across the unrelated entry schemas
    let err = target
        .dict_mut("entries")
        .unwrap()
        .assign_from(other.dict("entries").unwrap())
        .unwrap_err();

    // THEN nothing changed and nothing was announced
    assert!(matches!(err, MorphsetError::SchemaMismatch { .. }));
    let keys: Vec<_> = target.dict("entries").unwrap().keys().collect();
    assert_eq!(keys, vec!["a"]);
    assert_eq!(recorder.count(), 0);
}
