//! JSON Patch diff: generate a JSON Patch from two document values.
//!
//! The differ walks both documents in lockstep. Objects are compared member
//! by member, arrays position by position; every other unequal pair becomes
//! a `replace`. Array elements are never matched out of position, so
//! reorders and mid-array inserts produce more operations than strictly
//! needed. The only guarantee is that applying the result to `src` yields
//! `dst`.

use serde_json::{Map, Value};
use tracing::trace;

use jsonmend_json_pointer::Pointer;

use crate::json_patch::types::{JsonPatch, Op};

// ── Public API ────────────────────────────────────────────────────────────

/// Generate a JSON Patch that transforms `src` into `dst`.
///
/// ```
/// use jsonmend::json_patch_diff::diff;
/// use serde_json::json;
///
/// let src = json!({"a": 1, "b": [1, 2, 3]});
/// let dst = json!({"a": 2, "b": [1]});
/// let patch = diff(&src, &dst);
/// assert_eq!(patch.apply(&src).unwrap(), dst);
/// ```
pub fn diff(src: &Value, dst: &Value) -> JsonPatch {
    let mut ops = Vec::new();
    diff_at_path(&mut ops, &Pointer::root(), src, dst);
    JsonPatch(ops)
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn diff_at_path(ops: &mut Vec<Op>, path: &Pointer, src: &Value, dst: &Value) {
    if src == dst {
        return;
    }
    trace!(path = %path, "diffing");
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d),
        _ => ops.push(Op::Replace {
            path: path.clone(),
            value: dst.clone(),
        }),
    }
}

fn diff_obj(ops: &mut Vec<Op>, path: &Pointer, src: &Map<String, Value>, dst: &Map<String, Value>) {
    for (key, src_val) in src {
        let p = path.push(key);
        match dst.get(key) {
            Some(dst_val) => diff_at_path(ops, &p, src_val, dst_val),
            None => ops.push(Op::Remove { path: p }),
        }
    }
    for (key, dst_val) in dst {
        if !src.contains_key(key) {
            ops.push(Op::Add {
                path: path.push(key),
                value: dst_val.clone(),
            });
        }
    }
}

fn diff_arr(ops: &mut Vec<Op>, path: &Pointer, src: &[Value], dst: &[Value]) {
    // Source-only elements sit past the end of `dst`; each removal shifts
    // the next one down by a position.
    let mut removed = 0usize;
    for i in 0..src.len().max(dst.len()) {
        match (src.get(i), dst.get(i)) {
            (Some(s), Some(d)) => diff_at_path(ops, &path.push(&i.to_string()), s, d),
            (None, Some(d)) => ops.push(Op::Add {
                path: path.push(&i.to_string()),
                value: d.clone(),
            }),
            (Some(_), None) => {
                ops.push(Op::Remove {
                    path: path.push(&(i - removed).to_string()),
                });
                removed += 1;
            }
            (None, None) => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(patch: &JsonPatch) -> Vec<(&'static str, String)> {
        patch
            .iter()
            .map(|op| (op.op_name(), op.path().to_string()))
            .collect()
    }

    fn assert_diff_apply(src: Value, dst: Value) {
        let patch = diff(&src, &dst);
        let result = patch.apply(&src).expect("apply failed");
        assert_eq!(result, dst, "diff apply mismatch");
    }

    #[test]
    fn diff_equal_docs() {
        assert!(diff(&json!({"a": 1}), &json!({"a": 1})).is_empty());
        assert!(diff(&json!(null), &json!(null)).is_empty());
    }

    #[test]
    fn diff_replace_scalar() {
        let patch = diff(&json!(1), &json!(2));
        assert_eq!(patch.ops(), &[Op::Replace { path: Pointer::root(), value: json!(2) }]);
    }

    #[test]
    fn diff_container_kind_change() {
        let patch = diff(&json!({"a": {"b": 1}}), &json!({"a": [1]}));
        assert_eq!(names(&patch), [("replace", "/a".to_string())]);
    }

    #[test]
    fn diff_object_order() {
        let patch = diff(
            &json!({"keep": 1, "gone": 2, "change": 3}),
            &json!({"new": 0, "keep": 1, "change": 4}),
        );
        assert_eq!(
            names(&patch),
            [
                ("remove", "/gone".to_string()),
                ("replace", "/change".to_string()),
                ("add", "/new".to_string()),
            ]
        );
    }

    #[test]
    fn diff_escapes_keys() {
        let src = json!({"a/b": 1, "m~n": {"x": 1}});
        let dst = json!({"a/b": 2, "m~n": {"x": 2}});
        let patch = diff(&src, &dst);
        assert_eq!(
            names(&patch),
            [("replace", "/a~1b".to_string()), ("replace", "/m~0n/x".to_string())]
        );
        assert_eq!(patch.apply(&src).unwrap(), dst);
    }

    #[test]
    fn diff_array_shrink_uses_running_offset() {
        let patch = diff(&json!([1, 2, 3, 4]), &json!([1]));
        assert_eq!(
            names(&patch),
            [
                ("remove", "/1".to_string()),
                ("remove", "/1".to_string()),
                ("remove", "/1".to_string()),
            ]
        );
    }

    #[test]
    fn diff_array_grow() {
        let patch = diff(&json!([1]), &json!([1, 2, 3]));
        assert_eq!(names(&patch), [("add", "/1".to_string()), ("add", "/2".to_string())]);
    }

    #[test]
    fn diff_array_positional_not_minimal() {
        // A front insertion rewrites every position instead of one add.
        let patch = diff(&json!(["b", "c"]), &json!(["a", "b", "c"]));
        assert_eq!(patch.len(), 3);
        assert_diff_apply(json!(["b", "c"]), json!(["a", "b", "c"]));
    }

    #[test]
    fn diff_nested() {
        assert_diff_apply(
            json!({"a": {"b": [1, {"c": 2}], "d": "x"}}),
            json!({"a": {"b": [1, {"c": 3}, 4], "e": null}}),
        );
    }

    #[test]
    fn diff_root_kind_change() {
        assert_diff_apply(json!([1, 2]), json!({"a": 1}));
        assert_diff_apply(json!("s"), json!([]));
    }
}
