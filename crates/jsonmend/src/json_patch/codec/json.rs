//! JSON codec for JSON Patch operations.
//!
//! Converts operations to and from `serde_json::Value` in RFC 6902 format.
//! Unknown members on an operation object are ignored.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use jsonmend_json_pointer::Pointer;

use crate::json_patch::types::{JsonPatch, Op, PatchError};

// ── Field helpers ─────────────────────────────────────────────────────────

fn malformed(msg: impl Into<String>) -> PatchError {
    PatchError::MalformedPatchDocument(msg.into())
}

fn decode_pointer(obj: &Map<String, Value>, op: &str, key: &str) -> Result<Pointer, PatchError> {
    let raw = obj
        .get(key)
        .ok_or_else(|| malformed(format!("{op} requires '{key}'")))?
        .as_str()
        .ok_or_else(|| malformed(format!("'{key}' must be a string")))?;
    Pointer::parse(raw).map_err(|e| malformed(format!("'{key}': {e}")))
}

fn decode_value(obj: &Map<String, Value>, op: &str) -> Result<Value, PatchError> {
    obj.get("value")
        .cloned()
        .ok_or_else(|| malformed(format!("{op} requires 'value'")))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": path.as_str(),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": path.as_str()
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": path.as_str(),
            "value": value
        }),
        Op::Move { from, path } => json!({
            "op": "move",
            "from": from.as_str(),
            "path": path.as_str()
        }),
        Op::Copy { from, path } => json!({
            "op": "copy",
            "from": from.as_str(),
            "path": path.as_str()
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": path.as_str(),
            "value": value
        }),
    }
}

/// Serialize a whole patch to a JSON array.
pub fn to_json_patch(patch: &JsonPatch) -> Value {
    Value::Array(patch.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Decode one operation object.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| malformed("operation must be an object"))?;
    let op_str = obj
        .get("op")
        .ok_or_else(|| malformed("missing 'op' field"))?
        .as_str()
        .ok_or_else(|| malformed("'op' must be a string"))?;

    match op_str {
        "add" => Ok(Op::Add {
            path: decode_pointer(obj, op_str, "path")?,
            value: decode_value(obj, op_str)?,
        }),
        "remove" => Ok(Op::Remove {
            path: decode_pointer(obj, op_str, "path")?,
        }),
        "replace" => Ok(Op::Replace {
            path: decode_pointer(obj, op_str, "path")?,
            value: decode_value(obj, op_str)?,
        }),
        "move" => Ok(Op::Move {
            from: decode_pointer(obj, op_str, "from")?,
            path: decode_pointer(obj, op_str, "path")?,
        }),
        "copy" => Ok(Op::Copy {
            from: decode_pointer(obj, op_str, "from")?,
            path: decode_pointer(obj, op_str, "path")?,
        }),
        "test" => Ok(Op::Test {
            path: decode_pointer(obj, op_str, "path")?,
            value: decode_value(obj, op_str)?,
        }),
        other => Err(PatchError::UnknownOperation(other.to_string())),
    }
}

/// Decode a JSON array of operation objects.
pub fn from_json_patch(v: &Value) -> Result<JsonPatch, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| malformed("patch must be an array"))?;
    arr.iter().map(from_json).collect()
}

// ── serde ─────────────────────────────────────────────────────────────────

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        from_json(&v).map_err(D::Error::custom)
    }
}

impl Serialize for JsonPatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json_patch(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonPatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        from_json_patch(&v).map_err(D::Error::custom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn decode_all_standard_ops() {
        let patch = from_json_patch(&json!([
            {"op": "add", "path": "/a", "value": 1},
            {"op": "remove", "path": "/a"},
            {"op": "replace", "path": "/b", "value": [1]},
            {"op": "move", "from": "/b", "path": "/c"},
            {"op": "copy", "from": "/c", "path": "/d"},
            {"op": "test", "path": "/d", "value": null}
        ]))
        .unwrap();
        assert_eq!(
            patch.ops(),
            &[
                Op::Add { path: ptr("/a"), value: json!(1) },
                Op::Remove { path: ptr("/a") },
                Op::Replace { path: ptr("/b"), value: json!([1]) },
                Op::Move { from: ptr("/b"), path: ptr("/c") },
                Op::Copy { from: ptr("/c"), path: ptr("/d") },
                Op::Test { path: ptr("/d"), value: json!(null) },
            ]
        );
    }

    #[test]
    fn encode_matches_rfc_shape() {
        let op = Op::Move { from: ptr("/a~1b"), path: ptr("/c") };
        assert_eq!(to_json(&op), json!({"op": "move", "from": "/a~1b", "path": "/c"}));
        let v = serde_json::to_string(&to_json(&Op::Remove { path: ptr("/x") })).unwrap();
        assert_eq!(v, r#"{"op":"remove","path":"/x"}"#);
    }

    #[test]
    fn null_value_is_present() {
        let op = from_json(&json!({"op": "add", "path": "/a", "value": null})).unwrap();
        assert_eq!(op, Op::Add { path: ptr("/a"), value: Value::Null });
    }

    #[test]
    fn unknown_op_is_rejected() {
        let err = from_json(&json!({"op": "inc", "path": "/a", "inc": 1})).unwrap_err();
        assert_eq!(err, PatchError::UnknownOperation("inc".into()));
    }

    #[test]
    fn malformed_documents() {
        let cases = [
            json!({"op": "add", "path": "/a"}),
            json!({"op": "move", "path": "/a"}),
            json!({"op": "remove"}),
            json!({"op": "remove", "path": 5}),
            json!({"op": "remove", "path": "a"}),
            json!({"op": "remove", "path": "/~2"}),
            json!({"path": "/a"}),
            json!({"op": 1, "path": "/a"}),
            json!("add"),
        ];
        for case in cases {
            assert!(
                matches!(from_json(&case), Err(PatchError::MalformedPatchDocument(_))),
                "{case}"
            );
        }
        assert!(matches!(
            from_json_patch(&json!({"op": "add"})),
            Err(PatchError::MalformedPatchDocument(_))
        ));
    }

    #[test]
    fn serde_roundtrip_through_text() {
        let text = r#"[{"op":"add","path":"/a/-","value":{"k":true}},{"op":"copy","from":"/a","path":"/b"}]"#;
        let patch: JsonPatch = serde_json::from_str(text).unwrap();
        assert_eq!(patch.len(), 2);
        assert_eq!(serde_json::to_string(&patch).unwrap(), text);
    }

    #[test]
    fn serde_reports_codec_errors() {
        let err = serde_json::from_str::<Op>(r#"{"op":"flip","path":"/a"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown operation 'flip'"));
    }
}
