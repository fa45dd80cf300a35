//! JSON Patch apply logic.
//!
//! Operations run strictly in order. Each one reads the document produced by
//! the previous step and hands back a new one; the caller's document is
//! never modified. The first failing operation aborts the batch and no
//! partial result is returned.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use jsonmend_json_pointer::{Pointer, PointerError};

use super::types::{ApplyPatchOptions, JsonPatch, MoveMode, Op, OpResult, PatchError, PatchResult};

/// The document produced by one step and the value it displaced.
/// `doc` is `None` when the step leaves the document unchanged.
struct Step {
    doc: Option<Value>,
    old: Option<Value>,
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &Value, path: &Pointer, value: Value) -> Result<Step, PointerError> {
    let old = displaced_by_add(doc, path);
    Ok(Step {
        doc: Some(path.add(doc, value)?),
        old,
    })
}

fn apply_remove(doc: &Value, path: &Pointer) -> Result<Step, PointerError> {
    let old = path.get_ref(doc).cloned();
    Ok(Step {
        doc: Some(path.remove(doc)?),
        old,
    })
}

fn apply_replace(doc: &Value, path: &Pointer, value: Value) -> Result<Step, PointerError> {
    let old = path.get_ref(doc).cloned();
    Ok(Step {
        doc: Some(path.replace(doc, value)?),
        old,
    })
}

fn apply_copy(doc: &Value, path: &Pointer, from: &Pointer) -> Result<Step, PointerError> {
    let value = from.get(doc)?;
    apply_add(doc, path, value)
}

fn apply_move(
    doc: &Value,
    path: &Pointer,
    from: &Pointer,
    mode: MoveMode,
) -> Result<Step, PointerError> {
    let value = from.get(doc)?;
    let moved = match mode {
        MoveMode::Relocate => {
            let removed = from.remove(doc)?;
            path.add(&removed, value)?
        }
        MoveMode::AddThenRemove => {
            let added = path.add(doc, value)?;
            from.remove(&added)?
        }
    };
    Ok(Step {
        doc: Some(moved),
        old: None,
    })
}

/// The value an `add` overwrites: an existing object member or the root.
/// Array insertion never overwrites.
fn displaced_by_add(doc: &Value, path: &Pointer) -> Option<Value> {
    match path.parent() {
        None => Some(doc.clone()),
        Some(parent) => match parent.get_ref(doc) {
            Some(Value::Object(_)) => path.get_ref(doc).cloned(),
            _ => None,
        },
    }
}

fn apply_step(
    doc: &Value,
    index: usize,
    op: &Op,
    options: &ApplyPatchOptions,
) -> Result<Step, PatchError> {
    let failed = |source: PointerError| PatchError::ApplicationFailed {
        index,
        op: op.op_name(),
        source,
    };
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()).map_err(failed),
        Op::Remove { path } => apply_remove(doc, path).map_err(failed),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()).map_err(failed),
        Op::Copy { from, path } => apply_copy(doc, path, from).map_err(failed),
        Op::Move { from, path } => {
            if from == path {
                return Ok(Step { doc: None, old: None });
            }
            if from.is_ancestor_of(path) {
                return Err(PatchError::MoveIntoChild {
                    index,
                    from: from.clone(),
                    path: path.clone(),
                });
            }
            apply_move(doc, path, from, options.move_mode).map_err(failed)
        }
        Op::Test { path, value } => {
            let actual = path.get(doc).map_err(failed)?;
            if actual != *value {
                return Err(PatchError::ValueMismatch {
                    index,
                    path: path.clone(),
                });
            }
            Ok(Step { doc: None, old: None })
        }
    }
}

// ── Main apply functions ──────────────────────────────────────────────────

/// Apply a single operation, returning the new document and the value the
/// operation displaced.
pub fn apply_op(doc: &Value, op: &Op, options: &ApplyPatchOptions) -> Result<OpResult, PatchError> {
    let step = apply_step(doc, 0, op, options)?;
    Ok(OpResult {
        doc: step.doc.unwrap_or_else(|| doc.clone()),
        old: step.old,
    })
}

/// Apply every operation in `patch` with default options.
///
/// # Example
///
/// ```
/// use jsonmend::json_patch::{apply_patch, from_json_patch};
/// use serde_json::json;
///
/// let patch = from_json_patch(&json!([
///     {"op": "add", "path": "/b", "value": 2},
///     {"op": "remove", "path": "/a"},
/// ])).unwrap();
/// let doc = apply_patch(&json!({"a": 1}), &patch).unwrap();
/// assert_eq!(doc, json!({"b": 2}));
/// ```
pub fn apply_patch(doc: &Value, patch: &JsonPatch) -> Result<Value, PatchError> {
    apply_patch_with(doc, patch, &ApplyPatchOptions::default()).map(|r| r.doc)
}

/// Apply every operation in `patch`, honouring `options`.
pub fn apply_patch_with(
    doc: &Value,
    patch: &JsonPatch,
    options: &ApplyPatchOptions,
) -> Result<PatchResult, PatchError> {
    let mut current = Cow::Borrowed(doc);
    let mut steps = Vec::with_capacity(if options.keep_snapshots { patch.len() } else { 0 });
    for (index, op) in patch.iter().enumerate() {
        debug!(index, op = %op, "applying patch operation");
        let step = apply_step(&current, index, op, options).inspect_err(|e| {
            debug!(index, error = %e, "patch operation failed");
        })?;
        if let Some(next) = step.doc {
            current = Cow::Owned(next);
        }
        if options.keep_snapshots {
            steps.push(OpResult {
                doc: current.clone().into_owned(),
                old: step.old,
            });
        }
    }
    Ok(PatchResult {
        doc: current.into_owned(),
        steps,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────
