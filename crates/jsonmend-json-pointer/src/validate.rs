//! Grammar validation for JSON Pointer strings.

use thiserror::Error;

/// Why a string is not a JSON Pointer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a non-empty pointer must start with '/'")]
    MissingLeadingSlash,
    #[error("'~' at byte {offset} is not followed by an escape digit")]
    DanglingTilde { offset: usize },
    #[error("'~{found}' at byte {offset} is not a valid escape (expected '~0' or '~1')")]
    BadEscape { offset: usize, found: char },
}

/// Validate a JSON Pointer string against the RFC 6901 grammar:
///
/// ```text
/// json-pointer    = *( "/" reference-token )
/// reference-token = *( unescaped / escaped )
/// escaped         = "~" ( "0" / "1" )
/// ```
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();  // Root is valid
/// validate_json_pointer("/foo/bar").unwrap();
/// validate_json_pointer("/a~1b").unwrap();
/// validate_json_pointer("foo").unwrap_err();  // Missing leading /
/// validate_json_pointer("/a~2").unwrap_err();  // Unknown escape
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(ValidationError::MissingLeadingSlash);
    }
    let mut chars = pointer.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c != '~' {
            continue;
        }
        match chars.next() {
            Some((_, '0' | '1')) => {}
            Some((_, found)) => return Err(ValidationError::BadEscape { offset, found }),
            None => return Err(ValidationError::DanglingTilde { offset }),
        }
    }
    Ok(())
}
