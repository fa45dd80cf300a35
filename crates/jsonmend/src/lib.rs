//! jsonmend: JSON Patch (RFC 6902) and JSON Merge Patch (RFC 7396) over
//! `serde_json` documents.
//!
//! Documents are never modified in place. Applying a patch borrows the input
//! and returns a new document, so the input stays valid if a batch fails
//! part way through.
//!
//! Pointer addressing lives in the `jsonmend-json-pointer` crate and is
//! re-exported here.
//!
//! # Example
//!
//! ```
//! use jsonmend::json_patch::JsonPatch;
//! use serde_json::json;
//!
//! let src = json!({"name": "a", "tags": ["x"]});
//! let dst = json!({"name": "b", "tags": ["x", "y"]});
//! let patch = JsonPatch::diff(&src, &dst);
//! assert_eq!(patch.apply(&src).unwrap(), dst);
//! ```

pub use jsonmend_json_pointer as json_pointer;
pub use jsonmend_json_pointer::{Pointer, PointerError};

pub mod json_patch;
pub mod json_patch_diff;
pub mod json_merge_patch;
pub mod json_cli;
