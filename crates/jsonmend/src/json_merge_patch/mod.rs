//! RFC 7396 JSON Merge Patch.
//!
//! - Objects merge recursively
//! - `null` in the patch deletes the key from the target
//! - Arrays and scalars in the patch replace the target value
//!
//! Existing keys keep their position; new keys are appended.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// Apply `patch` to `target`, returning the merged document.
///
/// ```
/// use jsonmend::json_merge_patch::merge_patch;
/// use serde_json::json;
///
/// let target = json!({"a": 1, "b": {"c": 2}});
/// let patch = json!({"b": {"d": 3}, "a": null});
/// assert_eq!(merge_patch(&target, &patch), json!({"b": {"c": 2, "d": 3}}));
/// ```
pub fn merge_patch(target: &Value, patch: &Value) -> Value {
    if !patch.is_object() {
        return patch.clone();
    }
    let mut out = target.clone();
    merge_patch_in_place(&mut out, patch);
    out
}

/// Apply `patch` to a document the caller owns.
pub fn merge_patch_in_place(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_map) = target else {
        return;
    };
    for (key, value) in patch_map {
        if value.is_null() {
            if target_map.shift_remove(key).is_some() {
                debug!(key = %key, "merge patch removed key");
            }
            continue;
        }
        let slot = target_map.entry(key.clone()).or_insert(Value::Null);
        merge_patch_in_place(slot, value);
    }
}

/// A merge patch document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonMergePatch(pub Value);

impl JsonMergePatch {
    pub fn new(patch: Value) -> Self {
        Self(patch)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Apply to `target`, returning the merged document.
    pub fn apply(&self, target: &Value) -> Value {
        merge_patch(target, &self.0)
    }
}

impl From<Value> for JsonMergePatch {
    fn from(patch: Value) -> Self {
        Self(patch)
    }
}

impl Serialize for JsonMergePatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonMergePatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self)
    }
}
