//! Core types for the JSON Patch module: the operation model, errors, and
//! apply options.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub use jsonmend_json_pointer::Pointer;
use jsonmend_json_pointer::PointerError;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("malformed patch document: {0}")]
    MalformedPatchDocument(String),
    #[error(transparent)]
    InvalidPointer(#[from] PointerError),
    #[error("operation {index}: test failed, value at '{path}' does not match")]
    ValueMismatch { index: usize, path: Pointer },
    #[error("operation {index}: cannot move '{from}' into its own child '{path}'")]
    MoveIntoChild {
        index: usize,
        from: Pointer,
        path: Pointer,
    },
    #[error("operation {index} ({op}) failed: {source}")]
    ApplicationFailed {
        index: usize,
        op: &'static str,
        #[source]
        source: PointerError,
    },
}

impl PatchError {
    /// Position of the failing operation in its batch, if the error came
    /// from applying one.
    pub fn index(&self) -> Option<usize> {
        match self {
            PatchError::ValueMismatch { index, .. }
            | PatchError::MoveIntoChild { index, .. }
            | PatchError::ApplicationFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch operation (RFC 6902 section 4).
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Value },
}

impl Op {
    /// The `op` member of the wire form.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// The target location of the operation.
    pub fn path(&self) -> &Pointer {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// The source location of `move` and `copy`.
    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// The value carried by `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from() {
            Some(from) => write!(f, "{} {} -> {}", self.op_name(), from, self.path()),
            None => write!(f, "{} {}", self.op_name(), self.path()),
        }
    }
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// An ordered batch of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonPatch(pub Vec<Op>);

impl JsonPatch {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn ops(&self) -> &[Op] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Op> {
        self.0.iter()
    }

    pub fn push(&mut self, op: Op) {
        self.0.push(op);
    }

    /// Apply every operation in order, returning the new document.
    pub fn apply(&self, doc: &Value) -> Result<Value, PatchError> {
        super::apply::apply_patch(doc, self)
    }

    /// The patch that turns `src` into `dst`.
    pub fn diff(src: &Value, dst: &Value) -> Self {
        crate::json_patch_diff::diff(src, dst)
    }
}

impl From<Vec<Op>> for JsonPatch {
    fn from(ops: Vec<Op>) -> Self {
        Self(ops)
    }
}

impl FromIterator<Op> for JsonPatch {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Op> for JsonPatch {
    fn extend<I: IntoIterator<Item = Op>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for JsonPatch {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonPatch {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Result types ──────────────────────────────────────────────────────────

/// Result of applying a single operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OpResult {
    /// The document after applying the operation.
    pub doc: Value,
    /// The value the operation displaced or removed, if any.
    pub old: Option<Value>,
}

/// Result of applying a full patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchResult {
    pub doc: Value,
    /// One entry per operation when [`ApplyPatchOptions::keep_snapshots`] is set.
    pub steps: Vec<OpResult>,
}

// ── Options ───────────────────────────────────────────────────────────────

/// How `move` orders its removal and insertion.
///
/// The two differ only when `from` and `path` address the same array and
/// the insertion shifts the source element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveMode {
    /// Remove at `from`, then add at `path` on the result (RFC 6902 4.4).
    #[default]
    Relocate,
    /// Add at `path` first, then remove `from` evaluated against the
    /// post-insertion document. Kept for compatibility with processors that
    /// implement move this way.
    AddThenRemove,
}

/// Options for [`apply_patch_with`](super::apply::apply_patch_with).
#[derive(Debug, Clone, Default)]
pub struct ApplyPatchOptions {
    /// Record an independent snapshot of the document after every step.
    pub keep_snapshots: bool,
    pub move_mode: MoveMode,
}

impl ApplyPatchOptions {
    pub fn with_snapshots(mut self) -> Self {
        self.keep_snapshots = true;
        self
    }

    pub fn with_move_mode(mut self, move_mode: MoveMode) -> Self {
        self.move_mode = move_mode;
        self
    }
}
