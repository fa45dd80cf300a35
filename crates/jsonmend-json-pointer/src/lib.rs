//! JSON Pointer (RFC 6901) utilities.
//!
//! This crate parses [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901)
//! strings and uses them to read and edit `serde_json` documents without
//! mutating them: every edit returns a new document.
//!
//! # Example
//!
//! ```
//! use jsonmend_json_pointer::{format_json_pointer, parse_json_pointer, Pointer};
//! use serde_json::json;
//!
//! // Parse a JSON pointer string into path components
//! let path = parse_json_pointer("/foo/bar").unwrap();
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! // Format path components back to a JSON pointer string
//! assert_eq!(format_json_pointer(&path), "/foo/bar");
//!
//! // Read and edit a document
//! let doc = json!({"foo": {"bar": 42}});
//! let ptr = Pointer::parse("/foo/bar").unwrap();
//! assert_eq!(ptr.get(&doc).unwrap(), json!(42));
//! assert_eq!(ptr.remove(&doc).unwrap(), json!({"foo": {}}));
//! ```

use thiserror::Error;

mod pointer;
mod shadow;

pub mod types;
pub use types::{Reference, ReferenceKey};

pub mod validate;
pub use validate::{validate_json_pointer, ValidationError};

pub use pointer::Pointer;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("no-escapes"), "no-escapes");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped path components.
///
/// # Errors
///
/// Returns [`PointerError::InvalidPointer`] if the string does not match the
/// RFC 6901 grammar.
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/").unwrap(), vec![""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
/// assert!(parse_json_pointer("foo").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, PointerError> {
    Ok(Pointer::parse(pointer)?.tokens().to_vec())
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path (empty components).
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["foo".to_string(), "bar".to_string()]), "/foo/bar");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a string is an RFC 6901 array index: `0`, or digits without a
/// leading zero.
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("invalid JSON pointer '{pointer}': {reason}")]
    InvalidPointer {
        pointer: String,
        reason: ValidationError,
    },
    #[error("no such element at '{pointer}'")]
    NoSuchElement { pointer: String },
    #[error("array index {index} is out of bounds (length {len})")]
    OutOfBounds { index: usize, len: usize },
    #[error("'{token}' is not a valid array index")]
    InvalidIndex { token: String },
    #[error("array index '{token}' is too large")]
    IndexTooLarge { token: String },
    #[error("cannot descend past missing location '{token}'")]
    IntermediateMissing { token: String },
    #[error("cannot descend into scalar value with '{token}'")]
    PathThroughLeaf { token: String },
}
