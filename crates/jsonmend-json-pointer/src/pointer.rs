//! The validated [`Pointer`] type and its document operations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::shadow::ShadowTree;
use crate::{escape_component, is_valid_index, unescape_component, validate_json_pointer};
use crate::{PointerError, Reference};

/// An RFC 6901 JSON Pointer.
///
/// Construction validates the grammar, so every `Pointer` is well formed.
/// Decoded tokens are computed on first use and cached. Equality, hashing,
/// and ordering use the canonical string.
///
/// Every mutating method borrows the document and returns a new one; the
/// input is never modified.
///
/// # Example
///
/// ```
/// use jsonmend_json_pointer::Pointer;
/// use serde_json::json;
///
/// let doc = json!({"foo": [1, 2]});
/// let ptr = Pointer::parse("/foo/-").unwrap();
/// let doc2 = ptr.add(&doc, json!(3)).unwrap();
/// assert_eq!(doc2, json!({"foo": [1, 2, 3]}));
/// assert_eq!(doc, json!({"foo": [1, 2]}));
/// ```
#[derive(Clone)]
pub struct Pointer {
    raw: String,
    tokens: OnceLock<Vec<String>>,
}

impl Pointer {
    /// Parse and validate a pointer string.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        validate_json_pointer(pointer).map_err(|reason| PointerError::InvalidPointer {
            pointer: pointer.to_string(),
            reason,
        })?;
        Ok(Self::from_raw(pointer.to_string()))
    }

    /// The empty pointer, addressing the whole document.
    pub fn root() -> Self {
        Self::from_raw(String::new())
    }

    /// Build a pointer from unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut raw = String::new();
        for token in &tokens {
            raw.push('/');
            raw.push_str(&escape_component(token));
        }
        let cell = OnceLock::new();
        let _ = cell.set(tokens);
        Self { raw, tokens: cell }
    }

    fn from_raw(raw: String) -> Self {
        Self {
            raw,
            tokens: OnceLock::new(),
        }
    }

    /// The canonical (escaped) pointer string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Decoded reference tokens, left to right.
    pub fn tokens(&self) -> &[String] {
        self.tokens.get_or_init(|| {
            if self.raw.is_empty() {
                return Vec::new();
            }
            self.raw[1..].split('/').map(unescape_component).collect()
        })
    }

    pub fn is_root(&self) -> bool {
        self.raw.is_empty()
    }

    /// The pointer to the containing location. `None` for the root.
    pub fn parent(&self) -> Option<Pointer> {
        let cut = self.raw.rfind('/')?;
        Some(Self::from_raw(self.raw[..cut].to_string()))
    }

    /// The last decoded token. `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.tokens().last().map(String::as_str)
    }

    /// A new pointer one level deeper.
    pub fn push(&self, token: &str) -> Pointer {
        let mut raw = String::with_capacity(self.raw.len() + token.len() + 1);
        raw.push_str(&self.raw);
        raw.push('/');
        raw.push_str(&escape_component(token));
        Self::from_raw(raw)
    }

    /// Whether `self` is a token-wise prefix of `other` (or equal to it).
    pub fn starts_with(&self, other: &Pointer) -> bool {
        let (mine, theirs) = (self.tokens(), other.tokens());
        mine.len() >= theirs.len() && mine[..theirs.len()] == theirs[..]
    }

    /// Whether `other` lies strictly inside the location named by `self`.
    pub fn is_ancestor_of(&self, other: &Pointer) -> bool {
        other.tokens().len() > self.tokens().len() && other.starts_with(self)
    }

    /// Locate the target of this pointer.
    ///
    /// Succeeds for existing values and for valid insertion points (a missing
    /// final object key, `-`, or an index equal to the array length).
    pub fn resolve(&self, doc: &Value) -> Result<Reference, PointerError> {
        let mut tree = ShadowTree::new(doc);
        let node = tree.resolve(self.tokens())?;
        Ok(Reference {
            value: tree.value_of(node),
            parent: self.parent(),
            key: tree.reference_key(node),
        })
    }

    /// The value at this location.
    pub fn get(&self, doc: &Value) -> Result<Value, PointerError> {
        let mut tree = ShadowTree::new(doc);
        let node = tree.resolve(self.tokens())?;
        tree.value_of(node).ok_or_else(|| self.no_such_element())
    }

    /// Borrowing lookup without building a shadow tree.
    ///
    /// Returns `None` for anything [`Pointer::get`] would reject.
    pub fn get_ref<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        let mut current = doc;
        for token in self.tokens() {
            current = match current {
                Value::Object(map) => map.get(token)?,
                Value::Array(items) if is_valid_index(token) => items.get(token.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Whether a value exists at this location.
    pub fn contains(&self, doc: &Value) -> bool {
        self.get_ref(doc).is_some()
    }

    /// Insert `value` at this location.
    ///
    /// Into an array, the value is inserted before the addressed element
    /// (or appended for `-`). Into an object, the key is set or overwritten.
    /// At the root, `value` becomes the new document.
    pub fn add(&self, doc: &Value, value: Value) -> Result<Value, PointerError> {
        let mut tree = ShadowTree::new(doc);
        let node = tree.resolve(self.tokens())?;
        tree.insert(node, value);
        debug!(pointer = %self, "add");
        Ok(tree.fold())
    }

    /// Overwrite the existing value at this location.
    pub fn replace(&self, doc: &Value, value: Value) -> Result<Value, PointerError> {
        let mut tree = ShadowTree::new(doc);
        let node = tree.resolve(self.tokens())?;
        if !tree.exists(node) {
            return Err(self.no_such_element());
        }
        tree.set(node, value);
        debug!(pointer = %self, "replace");
        Ok(tree.fold())
    }

    /// Delete the value at this location.
    ///
    /// Removing the root yields an empty container of the same kind, or
    /// `null` for a scalar document.
    pub fn remove(&self, doc: &Value) -> Result<Value, PointerError> {
        if self.is_root() {
            debug!("remove root");
            return Ok(match doc {
                Value::Object(_) => Value::Object(Map::new()),
                Value::Array(_) => Value::Array(Vec::new()),
                _ => Value::Null,
            });
        }
        let mut tree = ShadowTree::new(doc);
        let node = tree.resolve(self.tokens())?;
        if !tree.exists(node) {
            return Err(self.no_such_element());
        }
        tree.detach(node);
        debug!(pointer = %self, "remove");
        Ok(tree.fold())
    }

    fn no_such_element(&self) -> PointerError {
        PointerError::NoSuchElement {
            pointer: self.raw.clone(),
        }
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pointer").field(&self.raw).finish()
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Pointer {}

impl Hash for Pointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for Pointer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pointer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Pointer {
    type Error = PointerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate_json_pointer(&s).map_err(|reason| PointerError::InvalidPointer {
            pointer: s.clone(),
            reason,
        })?;
        Ok(Self::from_raw(s))
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for Pointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Pointer::try_from(raw).map_err(serde::de::Error::custom)
    }
}
