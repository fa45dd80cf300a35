//! JSON Patch implementation (RFC 6902).
//!
//! # Operations
//!
//! All standard RFC 6902 operations are supported:
//! `add`, `remove`, `replace`, `copy`, `move`, `test`.
//!
//! A patch is applied to a borrowed document and produces a new one. The
//! batch stops at the first failing operation; the error carries its
//! position.

pub mod types;
pub mod apply;
pub mod builder;
pub mod codec;

pub use types::{
    ApplyPatchOptions, JsonPatch, MoveMode, Op, OpResult, PatchError, PatchResult, Pointer,
};
pub use apply::{apply_op, apply_patch, apply_patch_with};
pub use builder::JsonPatchBuilder;
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
