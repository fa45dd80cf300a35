//! Transient mutable projection of an immutable document.
//!
//! A [`ShadowTree`] mirrors the part of a document that a pointer walks
//! through. Nodes live in an arena and refer to each other by [`NodeId`].
//! Only containers on the resolved path are expanded into child nodes; every
//! other subtree stays a borrowed [`Value`] until the tree is folded back into
//! a new document. A tree serves exactly one get/add/replace/remove call.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::trace;

use crate::{is_valid_index, PointerError, ReferenceKey};

pub(crate) type NodeId = usize;

const ROOT: NodeId = 0;

/// How a node is addressed from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Root,
    Index(usize),
    Key(String),
}

#[derive(Debug)]
enum NodeState<'a> {
    /// Nothing here yet: a new object key or the array append slot.
    Absent,
    /// An unexpanded value. Scalars always stay in this state.
    Value(Cow<'a, Value>),
    /// An expanded array. Children are ordered by their `Slot::Index` at fold time.
    Array(Vec<NodeId>),
    /// An expanded object. Children keep encounter order.
    Object(Vec<NodeId>),
}

#[derive(Debug)]
struct ShadowNode<'a> {
    state: NodeState<'a>,
    parent: Option<NodeId>,
    slot: Slot,
}

#[derive(Debug)]
pub(crate) struct ShadowTree<'a> {
    nodes: Vec<ShadowNode<'a>>,
}

enum Step {
    Descend(NodeId),
    Attach(Slot),
}

impl<'a> ShadowTree<'a> {
    pub(crate) fn new(doc: &'a Value) -> Self {
        Self {
            nodes: vec![ShadowNode {
                state: NodeState::Value(Cow::Borrowed(doc)),
                parent: None,
                slot: Slot::Root,
            }],
        }
    }

    /// Walk `tokens` from the root, expanding every container on the way.
    ///
    /// Returns the node for the final location, which is `Absent` when the
    /// pointer names an insertion point.
    pub(crate) fn resolve(&mut self, tokens: &[String]) -> Result<NodeId, PointerError> {
        let mut current = ROOT;
        for (i, token) in tokens.iter().enumerate() {
            let is_last = i + 1 == tokens.len();
            self.expand(current);
            let step = match &self.nodes[current].state {
                NodeState::Object(children) => {
                    match children
                        .iter()
                        .copied()
                        .find(|&c| matches!(&self.nodes[c].slot, Slot::Key(k) if k == token))
                    {
                        Some(child) => Step::Descend(child),
                        None if is_last => Step::Attach(Slot::Key(token.clone())),
                        None => return Err(PointerError::IntermediateMissing { token: token.clone() }),
                    }
                }
                NodeState::Array(children) => {
                    let len = children.len();
                    let index = if token == "-" {
                        len
                    } else if is_valid_index(token) {
                        token
                            .parse::<usize>()
                            .map_err(|_| PointerError::IndexTooLarge { token: token.clone() })?
                    } else {
                        return Err(PointerError::InvalidIndex { token: token.clone() });
                    };
                    if index > len {
                        return Err(PointerError::OutOfBounds { index, len });
                    }
                    if index == len {
                        if !is_last {
                            return Err(PointerError::IntermediateMissing { token: token.clone() });
                        }
                        Step::Attach(Slot::Index(len))
                    } else {
                        Step::Descend(children[index])
                    }
                }
                NodeState::Value(_) => {
                    return Err(PointerError::PathThroughLeaf { token: token.clone() })
                }
                NodeState::Absent => {
                    return Err(PointerError::IntermediateMissing { token: token.clone() })
                }
            };
            trace!(token = %token, depth = i, "pointer step");
            current = match step {
                Step::Descend(child) => child,
                Step::Attach(slot) => self.attach(current, NodeState::Absent, slot),
            };
        }
        Ok(current)
    }

    pub(crate) fn exists(&self, id: NodeId) -> bool {
        !matches!(self.nodes[id].state, NodeState::Absent)
    }

    /// A detached copy of the value currently at `id`.
    pub(crate) fn value_of(&self, id: NodeId) -> Option<Value> {
        match &self.nodes[id].state {
            NodeState::Absent => None,
            NodeState::Value(v) => Some(v.as_ref().clone()),
            NodeState::Array(children) => {
                let mut children = children.clone();
                children.sort_by_key(|&c| self.index_of(c));
                Some(Value::Array(
                    children.into_iter().filter_map(|c| self.value_of(c)).collect(),
                ))
            }
            NodeState::Object(children) => Some(Value::Object(
                children
                    .iter()
                    .filter_map(|&c| Some((self.key_of(c)?.to_string(), self.value_of(c)?)))
                    .collect(),
            )),
        }
    }

    /// The `ReferenceKey` that addresses `id` from its parent.
    pub(crate) fn reference_key(&self, id: NodeId) -> Option<ReferenceKey> {
        match &self.nodes[id].slot {
            Slot::Root => None,
            Slot::Key(k) => Some(ReferenceKey::Key(k.clone())),
            Slot::Index(_) if !self.exists(id) => Some(ReferenceKey::Append),
            Slot::Index(i) => Some(ReferenceKey::Index(*i)),
        }
    }

    /// Overwrite the value at `id`, discarding any expanded children.
    pub(crate) fn set(&mut self, id: NodeId, value: Value) {
        self.nodes[id].state = NodeState::Value(Cow::Owned(value));
    }

    /// Add semantics: fill an absent slot, insert before an existing array
    /// element, or overwrite anything else.
    pub(crate) fn insert(&mut self, id: NodeId, value: Value) {
        let node = &self.nodes[id];
        let element = match (node.parent, &node.slot) {
            (Some(parent), Slot::Index(index)) if self.exists(id) => Some((parent, *index)),
            _ => None,
        };
        match element {
            Some((parent, index)) => {
                self.shift_siblings(parent, index, true);
                self.attach(parent, NodeState::Value(Cow::Owned(value)), Slot::Index(index));
            }
            None => self.set(id, value),
        }
    }

    /// Unlink `id` from its parent. Later array siblings move one slot left.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else {
            return;
        };
        if let NodeState::Array(children) | NodeState::Object(children) =
            &mut self.nodes[parent].state
        {
            children.retain(|&c| c != id);
        }
        if let Slot::Index(index) = self.nodes[id].slot {
            self.shift_siblings(parent, index, false);
        }
        self.nodes[id].state = NodeState::Absent;
    }

    /// Rebuild a new document bottom-up from the root.
    pub(crate) fn fold(mut self) -> Value {
        self.fold_node(ROOT).unwrap_or(Value::Null)
    }

    fn fold_node(&mut self, id: NodeId) -> Option<Value> {
        match std::mem::replace(&mut self.nodes[id].state, NodeState::Absent) {
            NodeState::Absent => None,
            NodeState::Value(v) => Some(v.into_owned()),
            NodeState::Array(mut children) => {
                children.sort_by_key(|&c| self.index_of(c));
                let items = children
                    .into_iter()
                    .filter_map(|c| self.fold_node(c))
                    .collect();
                Some(Value::Array(items))
            }
            NodeState::Object(children) => {
                let mut map = Map::with_capacity(children.len());
                for c in children {
                    let Slot::Key(key) = std::mem::replace(&mut self.nodes[c].slot, Slot::Root)
                    else {
                        continue;
                    };
                    if let Some(v) = self.fold_node(c) {
                        map.insert(key, v);
                    }
                }
                Some(Value::Object(map))
            }
        }
    }

    fn expand(&mut self, id: NodeId) {
        let state = std::mem::replace(&mut self.nodes[id].state, NodeState::Absent);
        let state = match state {
            NodeState::Value(Cow::Borrowed(Value::Array(items))) => NodeState::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.push(Cow::Borrowed(item), id, Slot::Index(i)))
                    .collect(),
            ),
            NodeState::Value(Cow::Borrowed(Value::Object(map))) => NodeState::Object(
                map.iter()
                    .map(|(k, v)| self.push(Cow::Borrowed(v), id, Slot::Key(k.clone())))
                    .collect(),
            ),
            NodeState::Value(Cow::Owned(Value::Array(items))) => NodeState::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| self.push(Cow::Owned(item), id, Slot::Index(i)))
                    .collect(),
            ),
            NodeState::Value(Cow::Owned(Value::Object(map))) => NodeState::Object(
                map.into_iter()
                    .map(|(k, v)| self.push(Cow::Owned(v), id, Slot::Key(k)))
                    .collect(),
            ),
            other => other,
        };
        self.nodes[id].state = state;
    }

    fn push(&mut self, value: Cow<'a, Value>, parent: NodeId, slot: Slot) -> NodeId {
        self.nodes.push(ShadowNode {
            state: NodeState::Value(value),
            parent: Some(parent),
            slot,
        });
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: NodeId, state: NodeState<'a>, slot: Slot) -> NodeId {
        self.nodes.push(ShadowNode {
            state,
            parent: Some(parent),
            slot,
        });
        let id = self.nodes.len() - 1;
        if let NodeState::Array(children) | NodeState::Object(children) =
            &mut self.nodes[parent].state
        {
            children.push(id);
        }
        id
    }

    /// Move every array child of `parent` at or after `from` one slot right
    /// (`grow`) or left.
    fn shift_siblings(&mut self, parent: NodeId, from: usize, grow: bool) {
        let NodeState::Array(children) = &self.nodes[parent].state else {
            return;
        };
        let siblings = children.clone();
        for c in siblings {
            if let Slot::Index(i) = &mut self.nodes[c].slot {
                if grow && *i >= from {
                    *i += 1;
                } else if !grow && *i > from {
                    *i -= 1;
                }
            }
        }
    }

    fn index_of(&self, id: NodeId) -> usize {
        match self.nodes[id].slot {
            Slot::Index(i) => i,
            _ => usize::MAX,
        }
    }

    fn key_of(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].slot {
            Slot::Key(k) => Some(k),
            _ => None,
        }
    }
}
