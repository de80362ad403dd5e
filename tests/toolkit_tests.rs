use pathquill::value::{self, ValueRef};
use pathquill::{PathToolkit, Value};

fn fixture() -> ValueRef {
    let data: Value = serde_json::from_value(serde_json::json!({
        "propA": "one",
        "propB": "two",
        "propC": "three",
        "accounts": [
            {"ary": [9, 8, 7, 6]},
            {
                "checking": {"balance": 123.0, "id": "12345", "repeat": "propA"},
                "savX": "X", "savY": "Y", "savZ": "Z",
                "savAa": "aa", "savAb": "ab", "savAc": "ac"
            },
            {"deep": {"list": ["a", "b", "c"]}}
        ]
    }))
    .unwrap();
    data.into_ref()
}

fn as_strings(result: &ValueRef) -> Vec<String> {
    match &*result.borrow() {
        Value::Array(items) => items
            .iter()
            .map(|item| match &*item.borrow() {
                Value::String(s) => s.clone(),
                Value::Number(n) => format!("{}", n),
                _ => panic!("expected leaf value"),
            })
            .collect(),
        _ => panic!("expected array result"),
    }
}

#[test]
fn test_get_walks_objects_and_arrays() {
    let tk = PathToolkit::new();
    let data = fixture();

    let id = tk.get(&data, "accounts.1.checking.id").expect("path should resolve");
    assert_eq!(*id.borrow(), Value::from("12345"));

    let third = tk.get(&data, "accounts.2.deep.list.2").expect("index should resolve");
    assert_eq!(*third.borrow(), Value::from("c"));
}

#[test]
fn test_get_missing_member_is_none() {
    let tk = PathToolkit::new();
    let data = fixture();

    assert!(tk.get(&data, "missing").is_none());
    assert!(tk.get(&data, "accounts.7").is_none());
    assert!(tk.get(&data, "accounts.1.checking.nope").is_none());
    assert!(tk.get(&data, "propA.tooDeep").is_none());
}

#[test]
fn test_fast_and_full_lane_agree() {
    let tk = PathToolkit::new();
    let data = fixture();

    // The same walk phrased three ways: plain, grouped, quoted.
    let plain = tk.get(&data, "accounts.1.checking.balance").unwrap();
    let grouped = tk.get(&data, "accounts.1[checking]balance").unwrap();
    let quoted = tk.get(&data, "accounts.1.'checking'.balance").unwrap();

    assert_eq!(*plain.borrow(), Value::Number(123.0));
    assert_eq!(*plain.borrow(), *grouped.borrow());
    assert_eq!(*plain.borrow(), *quoted.borrow());
}

#[test]
fn test_compiled_path_matches_text_path() {
    let tk = PathToolkit::new();
    let data = fixture();

    let compiled = tk.get_tokens("accounts.1.savA*").expect("path should compile");
    let by_text = tk.get(&data, "accounts.1.savA*").unwrap();
    let by_tokens = tk.get(&data, &compiled).unwrap();
    assert_eq!(*by_text.borrow(), *by_tokens.borrow());
    assert_eq!(as_strings(&by_tokens), vec!["aa", "ab", "ac"]);
}

#[test]
fn test_cache_on_and_off_agree() {
    let mut tk = PathToolkit::new();
    let data = fixture();
    let path = "accounts.1.savX,savY,savZ";

    let cached = tk.get(&data, path).unwrap();
    // Second evaluation comes from the cache.
    let cached_again = tk.get(&data, path).unwrap();
    tk.set_cache(false);
    let uncached = tk.get(&data, path).unwrap();

    assert_eq!(as_strings(&cached), vec!["X", "Y", "Z"]);
    assert_eq!(*cached.borrow(), *cached_again.borrow());
    assert_eq!(*cached.borrow(), *uncached.borrow());
}

#[test]
fn test_wildcard_get() {
    let tk = PathToolkit::new();
    let data = fixture();

    let all = tk.get(&data, "accounts.0.ary.*").unwrap();
    assert_eq!(as_strings(&all), vec!["9", "8", "7", "6"]);

    let tail = tk.get(&data, "accounts.1.sav*a,sav*b").unwrap();
    assert_eq!(as_strings(&tail), vec!["aa", "ab"]);
}

#[test]
fn test_wildcard_set_fans_out() {
    let tk = PathToolkit::new();
    let data = fixture();

    assert!(tk.set(&data, "accounts.1.sav*", "flat"));
    let all = tk.get(&data, "accounts.1.sav*").unwrap();
    assert_eq!(as_strings(&all), vec!["flat"; 6]);
}

#[test]
fn test_collection_set_fans_out() {
    let tk = PathToolkit::new();
    let data = fixture();

    assert!(tk.set(&data, "propA,propC", "both"));
    assert_eq!(*tk.get(&data, "propA").unwrap().borrow(), Value::from("both"));
    assert_eq!(*tk.get(&data, "propC").unwrap().borrow(), Value::from("both"));
    // Untouched sibling keeps its value.
    assert_eq!(*tk.get(&data, "propB").unwrap().borrow(), Value::from("two"));
}

#[test]
fn test_set_array_element_and_extension() {
    let tk = PathToolkit::new();
    let data = fixture();

    assert!(tk.set(&data, "accounts.0.ary.1", 80.0));
    assert_eq!(
        *tk.get(&data, "accounts.0.ary.1").unwrap().borrow(),
        Value::Number(80.0)
    );

    // Writing past the end pads the gap with nulls.
    assert!(tk.set(&data, "accounts.0.ary.5", 5.0));
    assert_eq!(*tk.get(&data, "accounts.0.ary.4").unwrap().borrow(), Value::Null);
    assert_eq!(
        *tk.get(&data, "accounts.0.ary.5").unwrap().borrow(),
        Value::Number(5.0)
    );
}

#[test]
fn test_force_creates_missing_intermediates() {
    let mut tk = PathToolkit::new();
    let data = fixture();

    assert!(!tk.set(&data, "zoo.pen.animal", "capuchin"));
    assert!(tk.get(&data, "zoo").is_none());

    tk.set_force(true);
    assert!(tk.set(&data, "zoo.pen.animal", "capuchin"));
    assert_eq!(
        *tk.get(&data, "zoo.pen.animal").unwrap().borrow(),
        Value::from("capuchin")
    );
}

#[test]
fn test_parent_and_root_references() {
    let tk = PathToolkit::new();
    let data = fixture();

    let sibling = tk.get(&data, "accounts.1.checking.<savX").unwrap();
    assert_eq!(*sibling.borrow(), Value::from("X"));

    let from_root = tk.get(&data, "accounts.1.checking.~propB").unwrap();
    assert_eq!(*from_root.borrow(), Value::from("two"));
}

#[test]
fn test_computed_property_name() {
    let tk = PathToolkit::new();
    let data = fixture();

    // checking.repeat holds "propA"; braces resolve it into a name.
    let result = tk.get(&data, "{accounts.1.checking.repeat}").unwrap();
    assert_eq!(*result.borrow(), Value::from("one"));
}

#[test]
fn test_call_into_data() {
    let tk = PathToolkit::new();
    let data = fixture();

    let checking = tk.get(&data, "accounts.1.checking").unwrap();
    let doubled = Value::func(|recv, _| {
        let recv = recv?;
        let balance = value::get_member(recv, "balance")?;
        let n = match &*balance.borrow() {
            Value::Number(n) => *n,
            _ => return None,
        };
        Some(Value::Number(n * 2.0).into_ref())
    });
    value::set_member(&checking, "doubled", doubled.into_ref());

    let result = tk.get(&data, "accounts.1.checking.doubled()").unwrap();
    assert_eq!(*result.borrow(), Value::Number(246.0));
}

#[test]
fn test_placeholder_and_context_arguments() {
    let tk = PathToolkit::new();
    let data = fixture();

    let args = [Value::from(1.0).into_ref(), Value::from("checking").into_ref()];
    let id = tk.get_with(&data, "accounts.%1.%2.id", &args).unwrap();
    assert_eq!(*id.borrow(), Value::from("12345"));

    let injected = Value::from("swapped").into_ref();
    let result = tk
        .get_with(&data, "accounts.@1", &[injected.clone()])
        .unwrap();
    assert!(ValueRef::ptr_eq(&result, &injected));
}

#[test]
fn test_set_with_placeholder_target() {
    let tk = PathToolkit::new();
    let data = fixture();

    let args = [Value::from("propB").into_ref()];
    assert!(tk.set_with(&data, "%1", "replaced", &args));
    assert_eq!(
        *tk.get(&data, "propB").unwrap().borrow(),
        Value::from("replaced")
    );
}

#[test]
fn test_find_reports_resolvable_path() {
    let tk = PathToolkit::new();
    let data = fixture();

    let target = Value::from("ac").into_ref();
    let path = tk.find(&data, &target).expect("value should be found");
    assert_eq!(path, "accounts.1.savAc");
    let back = tk.get(&data, &path).unwrap();
    assert_eq!(*back.borrow(), *target.borrow());
}

#[test]
fn test_find_quoted_key_resolves_back() {
    let tk = PathToolkit::new();
    let data = fixture();
    assert!(tk.set(&data, "plain", Value::empty_object()));
    let awkward = tk.escape("a.b,c");
    assert!(tk.set(&data, &format!("plain.{}", awkward), "buried"));

    let target = Value::from("buried").into_ref();
    let path = tk.find(&data, &target).expect("value should be found");
    assert_eq!(path, "plain.'a.b,c'");
    let back = tk.get(&data, &path).unwrap();
    assert_eq!(*back.borrow(), *target.borrow());
}

#[test]
fn test_find_all_and_miss() {
    let tk = PathToolkit::new();
    let data = fixture();
    tk.set(&data, "propB", "one");

    let target = Value::from("one").into_ref();
    let all = tk.find_all(&data, &target);
    assert_eq!(all, vec!["propA", "propB"]);
    assert!(tk.find(&data, &Value::from("absent").into_ref()).is_none());
}
