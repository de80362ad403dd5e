use pathquill::syntax::{ContainerKind, PrefixKind, SeparatorKind};
use pathquill::{Options, PathToolkit, SimpleMode, SyntaxError, Value, ValueRef};

fn fixture() -> ValueRef {
    let data: Value = serde_json::from_value(serde_json::json!({
        "top": {
            "middle": {"bottom": "core", "other": "edge"},
            "list": [1, 2, 3]
        },
        "label": "top"
    }))
    .unwrap();
    data.into_ref()
}

#[test]
fn test_malformed_paths_are_invalid() {
    let tk = PathToolkit::new();

    assert!(!tk.is_valid("a.(unclosed"));
    assert!(!tk.is_valid("a.'unclosed"));
    assert!(!tk.is_valid("a.<"));
    assert!(!tk.is_valid("~"));
    assert!(!tk.is_valid("a.b\\"));
    assert!(tk.is_valid("a.b"));
    assert!(tk.is_valid("a.<b"));
}

#[test]
fn test_malformed_path_get_is_none_not_panic() {
    let tk = PathToolkit::new();
    let data = fixture();

    assert!(tk.get(&data, "top.(middle").is_none());
    assert!(tk.get(&data, "top.middle.<").is_none());
}

#[test]
fn test_rebind_property_separator() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    tk.set_separator(SeparatorKind::Property, '/').unwrap();
    let found = tk.get(&data, "top/middle/bottom").unwrap();
    assert_eq!(*found.borrow(), Value::from("core"));

    // The old separator is now an ordinary character.
    assert!(tk.get(&data, "top.middle.bottom").is_none());
    assert!(tk.set(&data, "dotted.name", "kept"));
    assert_eq!(
        *tk.get(&data, "dotted.name").unwrap().borrow(),
        Value::from("kept")
    );
}

#[test]
fn test_rebind_collection_separator() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    tk.set_separator(SeparatorKind::Collection, ';').unwrap();
    let pair = tk.get(&data, "top.middle.bottom;other").unwrap();
    match &*pair.borrow() {
        Value::Array(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(*items[0].borrow(), Value::from("core"));
            assert_eq!(*items[1].borrow(), Value::from("edge"));
        }
        other => panic!("expected array, got {:?}", other),
    };
}

#[test]
fn test_rebind_prefix() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    tk.set_prefix(PrefixKind::Root, '^').unwrap();
    let found = tk.get(&data, "top.middle.^label").unwrap();
    assert_eq!(*found.borrow(), Value::from("top"));
    // The old root prefix no longer parses as one.
    assert!(tk.get(&data, "top.middle.~label").is_none());
}

#[test]
fn test_rebind_container() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    tk.set_container(ContainerKind::EvalProperty, '$', '$')
        .unwrap();
    let found = tk.get(&data, "$label$.middle.bottom").unwrap();
    assert_eq!(*found.borrow(), Value::from("core"));
}

#[test]
fn test_conflicting_bind_is_rejected() {
    let mut tk = PathToolkit::new();

    // '<' is the parent prefix.
    assert!(matches!(
        tk.set_separator(SeparatorKind::Property, '<'),
        Err(SyntaxError::ValueInUse { .. })
    ));
    // Wildcard and escape can never be bound.
    assert!(matches!(
        tk.set_prefix(PrefixKind::Context, '*'),
        Err(SyntaxError::InvalidValue { .. })
    ));
    assert!(matches!(
        tk.set_container(ContainerKind::Call, '\\', ')'),
        Err(SyntaxError::InvalidValue { .. })
    ));

    // Failed binds leave the grammar working.
    let data = fixture();
    assert!(tk.get(&data, "top.middle.bottom").is_some());
}

#[test]
fn test_escape_follows_grammar() {
    let mut tk = PathToolkit::new();

    let default_escaped = tk.escape("a.b<c");
    assert_eq!(default_escaped, "a\\.b\\<c");

    tk.set_separator(SeparatorKind::Property, '/').unwrap();
    let slash_escaped = tk.escape("a/b.c");
    assert_eq!(slash_escaped, "a\\/b.c");
}

#[test]
fn test_simple_mode_round_trip() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    tk.set_simple(SimpleMode::Separator('|'));
    let found = tk.get(&data, "top|middle|bottom").unwrap();
    assert_eq!(*found.borrow(), Value::from("core"));
    // Collections do not exist in simple mode.
    assert!(tk.get(&data, "top|middle|bottom,other").is_none());

    tk.set_simple(SimpleMode::Flag(false));
    let found = tk.get(&data, "top.middle.bottom").unwrap();
    assert_eq!(*found.borrow(), Value::from("core"));
}

#[test]
fn test_options_bundle() {
    let options: Options = serde_json::from_value(serde_json::json!({
        "prefixes": {"^": "root", "!": "parent", "%": "placeholder", "@": "context"},
        "separators": {"/": "property", ";": "collection"},
        "force": true,
    }))
    .unwrap();
    let tk = PathToolkit::with_options(&options).unwrap();
    let data = fixture();

    let found = tk.get(&data, "top/middle/^label").unwrap();
    assert_eq!(*found.borrow(), Value::from("top"));
    assert!(tk.set(&data, "brand/new/leaf", "grown"));
}

#[test]
fn test_options_bundle_rejects_conflicts() {
    let options: Options = serde_json::from_value(serde_json::json!({
        // Collides with the default '<' prefix.
        "separators": {"<": "property"},
    }))
    .unwrap();
    assert!(PathToolkit::with_options(&options).is_err());
}

#[test]
fn test_reset_restores_defaults() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    tk.set_separator(SeparatorKind::Property, '/').unwrap();
    tk.set_force(true);
    tk.reset_options();

    assert!(tk.get(&data, "top.middle.bottom").is_some());
    // Force survives a grammar reset.
    assert!(tk.set(&data, "fresh.branch", "leaf"));
}
