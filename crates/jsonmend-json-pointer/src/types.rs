//! Type definitions for resolved JSON Pointer locations.

use serde_json::Value;

use crate::Pointer;

/// How a location is addressed from its parent container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKey {
    /// An existing array element.
    Index(usize),
    /// One past the last array element (`-`, or an index equal to the length).
    Append,
    /// An object member, present or not.
    Key(String),
}

/// A located reference into a JSON document.
///
/// Produced by [`Pointer::resolve`]. A reference may point at a location
/// that does not exist yet (a new object key, or the array append slot);
/// such locations are valid insertion points for [`Pointer::add`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The target value. `None` if nothing exists at the location.
    pub value: Option<Value>,
    /// Pointer to the containing array or object. `None` for the root.
    pub parent: Option<Pointer>,
    /// Key or index used to reach the target from `parent`.
    pub key: Option<ReferenceKey>,
}

impl Reference {
    /// Whether a value exists at the location.
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// Whether the location is the document root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this reference points into an array.
    pub fn is_array_reference(&self) -> bool {
        matches!(
            self.key,
            Some(ReferenceKey::Index(_)) | Some(ReferenceKey::Append)
        )
    }

    /// Check if this reference points to an object member.
    pub fn is_object_reference(&self) -> bool {
        matches!(self.key, Some(ReferenceKey::Key(_)))
    }

    /// Get the numeric index if this is an existing array element.
    pub fn index(&self) -> Option<usize> {
        match self.key {
            Some(ReferenceKey::Index(i)) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_is_array() {
        let r = Reference {
            value: Some(json!(2)),
            parent: Some(Pointer::root()),
            key: Some(ReferenceKey::Index(1)),
        };
        assert!(r.is_array_reference());
        assert!(!r.is_object_reference());
        assert_eq!(r.index(), Some(1));
        assert!(r.exists());
    }

    #[test]
    fn test_reference_is_object() {
        let r = Reference {
            value: None,
            parent: Some(Pointer::root()),
            key: Some(ReferenceKey::Key("foo".to_string())),
        };
        assert!(r.is_object_reference());
        assert!(!r.is_array_reference());
        assert_eq!(r.index(), None);
        assert!(!r.exists());
    }

    #[test]
    fn test_reference_append() {
        let r = Reference {
            value: None,
            parent: Some(Pointer::root()),
            key: Some(ReferenceKey::Append),
        };
        assert!(r.is_array_reference());
        assert_eq!(r.index(), None);
    }

    #[test]
    fn test_reference_root() {
        let r = Reference {
            value: Some(json!({})),
            parent: None,
            key: None,
        };
        assert!(r.is_root());
        assert!(!r.is_array_reference());
    }
}
