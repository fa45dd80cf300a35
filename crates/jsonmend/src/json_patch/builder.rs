//! Fluent construction of JSON Patch documents.

use serde_json::Value;

use jsonmend_json_pointer::{Pointer, PointerError};

use super::types::{JsonPatch, Op, PatchError};

/// Accumulates operations from pointer strings.
///
/// Every method takes the target `path` first. Pointer strings are parsed
/// eagerly but the first failure is held back and reported by [`build`] or
/// [`apply`], so calls can be chained without intermediate `?`.
///
/// ```
/// use jsonmend::json_patch::JsonPatchBuilder;
/// use serde_json::json;
///
/// let doc = JsonPatchBuilder::new()
///     .add("/tags/-", "new")
///     .replace("/count", 2)
///     .apply(&json!({"tags": [], "count": 1}))
///     .unwrap();
/// assert_eq!(doc, json!({"tags": ["new"], "count": 2}));
/// ```
///
/// [`build`]: JsonPatchBuilder::build
/// [`apply`]: JsonPatchBuilder::apply
#[derive(Debug, Clone, Default)]
pub struct JsonPatchBuilder {
    ops: Vec<Op>,
    error: Option<PatchError>,
}

impl JsonPatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the operations of an existing patch.
    pub fn from_patch(patch: JsonPatch) -> Self {
        Self {
            ops: patch.0,
            error: None,
        }
    }

    pub fn add(self, path: &str, value: impl Into<Value>) -> Self {
        let op = Pointer::parse(path).map(|path| Op::Add {
            path,
            value: value.into(),
        });
        self.push(op)
    }

    pub fn remove(self, path: &str) -> Self {
        let op = Pointer::parse(path).map(|path| Op::Remove { path });
        self.push(op)
    }

    pub fn replace(self, path: &str, value: impl Into<Value>) -> Self {
        let op = Pointer::parse(path).map(|path| Op::Replace {
            path,
            value: value.into(),
        });
        self.push(op)
    }

    /// Move the value at `from` to `path`.
    pub fn move_value(self, path: &str, from: &str) -> Self {
        let op = parse_pair(path, from).map(|(path, from)| Op::Move { from, path });
        self.push(op)
    }

    /// Copy the value at `from` to `path`.
    pub fn copy(self, path: &str, from: &str) -> Self {
        let op = parse_pair(path, from).map(|(path, from)| Op::Copy { from, path });
        self.push(op)
    }

    pub fn test(self, path: &str, value: impl Into<Value>) -> Self {
        let op = Pointer::parse(path).map(|path| Op::Test {
            path,
            value: value.into(),
        });
        self.push(op)
    }

    /// Number of operations accumulated so far.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The accumulated patch, or the first pointer that failed to parse.
    pub fn build(self) -> Result<JsonPatch, PatchError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(JsonPatch(self.ops)),
        }
    }

    /// Build and apply to `doc` in one step.
    pub fn apply(self, doc: &Value) -> Result<Value, PatchError> {
        self.build()?.apply(doc)
    }

    fn push(mut self, op: Result<Op, PointerError>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match op {
            Ok(op) => self.ops.push(op),
            Err(err) => self.error = Some(err.into()),
        }
        self
    }
}

fn parse_pair(path: &str, from: &str) -> Result<(Pointer, Pointer), PointerError> {
    Ok((Pointer::parse(path)?, Pointer::parse(from)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_ops_in_order() {
        assert!(JsonPatchBuilder::new().is_empty());
        let patch = JsonPatchBuilder::new()
            .add("/a", 1)
            .remove("/b")
            .replace("/c", "x")
            .move_value("/d", "/a")
            .copy("/e", "/d")
            .test("/e", true)
            .build()
            .unwrap();
        let names: Vec<_> = patch.iter().map(Op::op_name).collect();
        assert_eq!(names, ["add", "remove", "replace", "move", "copy", "test"]);
        assert_eq!(patch.ops()[3].from().map(Pointer::as_str), Some("/a"));
        assert_eq!(patch.ops()[3].path().as_str(), "/d");
    }

    #[test]
    fn first_bad_pointer_wins() {
        let builder = JsonPatchBuilder::new()
            .add("/ok", 1)
            .remove("missing-slash")
            .copy("/x", "/~9");
        assert_eq!(builder.len(), 1);
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            PatchError::InvalidPointer(PointerError::InvalidPointer { ref pointer, .. })
                if pointer == "missing-slash"
        ));
    }

    #[test]
    fn bad_from_is_reported() {
        for builder in [
            JsonPatchBuilder::new().move_value("/a", "b"),
            JsonPatchBuilder::new().copy("/a", "b"),
        ] {
            assert!(builder.is_empty());
            let err = builder.build().unwrap_err();
            assert!(matches!(
                err,
                PatchError::InvalidPointer(PointerError::InvalidPointer { ref pointer, .. })
                    if pointer == "b"
            ));
        }
    }

    #[test]
    fn move_and_copy_keep_both_pointers() {
        let patch = JsonPatchBuilder::new()
            .move_value("/to", "/from")
            .copy("/dup", "/to")
            .build()
            .unwrap();
        assert_eq!(
            patch.ops(),
            &[
                Op::Move {
                    from: Pointer::parse("/from").unwrap(),
                    path: Pointer::parse("/to").unwrap(),
                },
                Op::Copy {
                    from: Pointer::parse("/to").unwrap(),
                    path: Pointer::parse("/dup").unwrap(),
                },
            ]
        );
    }

    #[test]
    fn extends_existing_patch() {
        let base = JsonPatchBuilder::new().add("/a", 1).build().unwrap();
        let doc = JsonPatchBuilder::from_patch(base)
            .add("/b", json!([1, 2]))
            .apply(&json!({}))
            .unwrap();
        assert_eq!(doc, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn apply_surfaces_test_failure() {
        let err = JsonPatchBuilder::new()
            .test("/a", 2)
            .apply(&json!({"a": 1}))
            .unwrap_err();
        assert!(matches!(err, PatchError::ValueMismatch { index: 0, .. }));
    }
}
