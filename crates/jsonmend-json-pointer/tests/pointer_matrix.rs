use jsonmend_json_pointer::{
    format_json_pointer, parse_json_pointer, validate_json_pointer, Pointer, PointerError,
    ReferenceKey,
};
use serde_json::json;

fn ptr(s: &str) -> Pointer {
    Pointer::parse(s).expect("valid pointer")
}

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = [
        "",
        "/",
        "/foo",
        "/foo/bar",
        "/a~0b/c~1d",
        "/arr/0",
        "/~0/~1",
        "//",
    ];

    for pointer in cases {
        let path = parse_json_pointer(pointer).expect("parse ok");
        let out = format_json_pointer(&path);
        assert_eq!(out, pointer);
    }
}

/// The examples from RFC 6901 section 5.
#[test]
fn pointer_rfc6901_document_matrix() {
    let doc = json!({
        "foo": ["bar", "baz"],
        "": 0,
        "a/b": 1,
        "c%d": 2,
        "e^f": 3,
        "g|h": 4,
        "i\\j": 5,
        "k\"l": 6,
        " ": 7,
        "m~n": 8
    });

    let cases = [
        ("", doc.clone()),
        ("/foo", json!(["bar", "baz"])),
        ("/foo/0", json!("bar")),
        ("/", json!(0)),
        ("/a~1b", json!(1)),
        ("/c%d", json!(2)),
        ("/e^f", json!(3)),
        ("/g|h", json!(4)),
        ("/i\\j", json!(5)),
        ("/k\"l", json!(6)),
        ("/ ", json!(7)),
        ("/m~0n", json!(8)),
    ];

    for (pointer, expected) in cases {
        assert_eq!(ptr(pointer).get(&doc).expect(pointer), expected, "{pointer}");
    }
}

#[test]
fn pointer_find_and_get_matrix() {
    let doc = json!({"foo": {"bar": [10, 20, null]}});

    assert_eq!(ptr("/foo/bar/0").get(&doc), Ok(json!(10)));
    assert!(ptr("/foo/bar/3").get(&doc).is_err());

    let r = ptr("/foo/bar/1").resolve(&doc).expect("resolve ok");
    assert_eq!(r.value, Some(json!(20)));
    assert_eq!(r.key, Some(ReferenceKey::Index(1)));

    let r = ptr("/foo/bar/2").resolve(&doc).expect("resolve null ok");
    assert_eq!(r.value, Some(json!(null)));
}

#[test]
fn pointer_validation_and_relationships() {
    assert!(validate_json_pointer("/foo/bar").is_ok());
    assert!(validate_json_pointer("foo/bar").is_err());

    let p = ptr("/foo/bar");
    let q = ptr("/foo/bar/baz");
    assert!(p.is_ancestor_of(&q));
    assert_eq!(p.parent(), Some(ptr("/foo")));
}

#[test]
fn pointer_error_on_invalid_array_index() {
    let doc = json!({"arr": [1, 2, 3]});
    let result = ptr("/arr/-1").resolve(&doc);
    assert!(matches!(result, Err(PointerError::InvalidIndex { .. })));
}

#[test]
fn pointer_edits_never_touch_the_input() {
    let doc = json!({"arr": [1, 2, 3], "obj": {"k": "v"}});
    let snapshot = doc.clone();

    let added = ptr("/arr/1").add(&doc, json!(9)).unwrap();
    let replaced = ptr("/obj/k").replace(&doc, json!("w")).unwrap();
    let removed = ptr("/arr/0").remove(&doc).unwrap();

    assert_eq!(doc, snapshot);
    assert_eq!(added, json!({"arr": [1, 9, 2, 3], "obj": {"k": "v"}}));
    assert_eq!(replaced, json!({"arr": [1, 2, 3], "obj": {"k": "w"}}));
    assert_eq!(removed, json!({"arr": [2, 3], "obj": {"k": "v"}}));
}

#[test]
fn pointer_empty_key_components() {
    let doc = json!({"": {"": "deep"}, "foo": {"": 1}});

    assert_eq!(ptr("/").get(&doc), Ok(json!({"": "deep"})));
    assert_eq!(ptr("//").get(&doc), Ok(json!("deep")));
    assert_eq!(ptr("/foo/").get(&doc), Ok(json!(1)));

    let out = ptr("/foo/").add(&doc, json!(2)).unwrap();
    assert_eq!(out["foo"][""], json!(2));
}

#[test]
fn pointer_scalar_documents() {
    let doc = json!("text");
    assert_eq!(Pointer::root().get(&doc), Ok(json!("text")));
    assert!(matches!(
        ptr("/0").get(&doc),
        Err(PointerError::PathThroughLeaf { .. })
    ));
    assert!(matches!(
        ptr("/0").add(&doc, json!(1)),
        Err(PointerError::PathThroughLeaf { .. })
    ));
}
