//! Observable tree nodes: the wrapped side of the mapping.
//!
//! [`ObsNode`] is a closed union over everything that can appear in a
//! wrapped tree: the three reactive containers supplied by `futures-signals`
//! (scalar [`Mutable`], sequence [`MutableVec`], read-only derived
//! [`ReadOnlyMutable`]), plus the plain shapes that flow through unwrapping
//! unchanged — a keyed mapping of nodes, a plain sequence of nodes, and a
//! raw leaf value.
//!
//! Wrapping produces a specific arrangement of these: sequences are
//! containers directly (`List`), while keyed mappings are plain structures
//! (`Mapping`) held inside a scalar container (`Cell`). Exactly one read
//! peels that outer layer, which `update_from_value` depends on.

use crate::{PlainValue, SigtreeError, SigtreeResult};
use futures_signals::signal::{Mutable, ReadOnlyMutable};
use futures_signals::signal_vec::MutableVec;
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A node in an observable tree.
///
/// Cloning a node is shallow: container variants clone the shared handle, so
/// clones observe the same underlying state.
#[derive(Clone)]
pub enum ObsNode {
    /// An observable scalar container.
    Cell(Mutable<ObsNode>),
    /// An observable sequence container. The `Rc` makes the handle itself
    /// cheaply shareable, like the scalar cell's.
    List(Rc<MutableVec<ObsNode>>),
    /// A read-only derived container. Skipped by mapping extraction.
    Derived(ReadOnlyMutable<ObsNode>),
    /// A plain keyed mapping of nodes with shared storage.
    Mapping(NodeMap),
    /// A plain sequence of nodes.
    Items(Vec<ObsNode>),
    /// A raw plain value leaf.
    Value(PlainValue),
}

impl ObsNode {
    /// Create an observable scalar holding a plain value.
    pub fn scalar(value: impl Into<PlainValue>) -> ObsNode {
        ObsNode::Cell(Mutable::new(ObsNode::Value(value.into())))
    }

    /// Create an observable scalar holding an arbitrary node.
    pub fn cell(inner: ObsNode) -> ObsNode {
        ObsNode::Cell(Mutable::new(inner))
    }

    /// Create an observable sequence from a vector of nodes.
    pub fn list(nodes: Vec<ObsNode>) -> ObsNode {
        ObsNode::List(Rc::new(MutableVec::new_with_values(nodes)))
    }

    /// Create a read-only derived container tracking the given cell.
    pub fn derived(source: &Mutable<ObsNode>) -> ObsNode {
        ObsNode::Derived(source.read_only())
    }

    /// Returns true if this node is a reactive container.
    #[inline]
    pub fn is_observable(&self) -> bool {
        matches!(
            self,
            ObsNode::Cell(_) | ObsNode::List(_) | ObsNode::Derived(_)
        )
    }

    /// Returns true if this node is a read-only derived container.
    #[inline]
    pub fn is_derived(&self) -> bool {
        matches!(self, ObsNode::Derived(_))
    }

    /// Kind name of this node, for diagnostics.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            ObsNode::Cell(_) => "cell",
            ObsNode::List(_) => "sequence",
            ObsNode::Derived(_) => "derived",
            ObsNode::Mapping(_) => "mapping",
            ObsNode::Items(_) => "items",
            ObsNode::Value(_) => "value",
        }
    }

    /// Peel exactly one observable layer.
    ///
    /// Containers yield their current contents; any other node yields a
    /// (shallow) clone of itself.
    pub fn read(&self) -> ObsNode {
        match self {
            ObsNode::Cell(cell) => cell.lock_ref().clone(),
            ObsNode::Derived(cell) => cell.lock_ref().clone(),
            ObsNode::List(seq) => ObsNode::Items(seq.lock_ref().to_vec()),
            other => other.clone(),
        }
    }

    /// Write a node into this container.
    ///
    /// Scalar cells accept any node. Sequence containers accept a sequence
    /// (plain or observable) and replace their contents with its elements.
    /// Derived containers and plain nodes are not writable.
    pub fn set(&self, node: ObsNode) -> SigtreeResult<()> {
        match self {
            ObsNode::Cell(cell) => {
                cell.set(node);
                Ok(())
            }
            ObsNode::List(seq) => {
                let values = match node {
                    ObsNode::Items(items) => items,
                    ObsNode::List(other) => other.lock_ref().to_vec(),
                    other => return Err(SigtreeError::sequence_mismatch(other.kind())),
                };
                seq.lock_mut().replace_cloned(values);
                Ok(())
            }
            other => Err(SigtreeError::not_writable(other.kind())),
        }
    }
}

impl From<PlainValue> for ObsNode {
    fn from(value: PlainValue) -> Self {
        ObsNode::Value(value)
    }
}

impl fmt::Debug for ObsNode {
    /// Structural debug output. Cyclic trees recurse without bound.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObsNode::Cell(cell) => f.debug_tuple("Cell").field(&*cell.lock_ref()).finish(),
            ObsNode::List(seq) => f.debug_tuple("List").field(&&seq.lock_ref()[..]).finish(),
            ObsNode::Derived(cell) => f.debug_tuple("Derived").field(&*cell.lock_ref()).finish(),
            ObsNode::Mapping(map) => f.debug_tuple("Mapping").field(&*map.get()).finish(),
            ObsNode::Items(items) => f.debug_tuple("Items").field(items).finish(),
            ObsNode::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A keyed mapping of observable tree nodes with shared storage.
///
/// Like [`crate::SharedMap`], clones share the underlying storage. Wrapping
/// hands the same `NodeMap` handle to every occurrence of a cyclic source
/// mapping, so sharing can be asserted with [`NodeMap::ptr_eq`].
#[derive(Clone, Default)]
pub struct NodeMap(Rc<RefCell<BTreeMap<String, ObsNode>>>);

impl NodeMap {
    /// Create a new empty node mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a read borrow of the mapping.
    #[inline]
    pub fn get(&self) -> Ref<'_, BTreeMap<String, ObsNode>> {
        self.0.borrow()
    }

    /// Insert a key, returning the previous node if any.
    pub fn insert(&self, key: impl Into<String>, node: ObsNode) -> Option<ObsNode> {
        self.0.borrow_mut().insert(key.into(), node)
    }

    /// Number of keys in the mapping.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check if the mapping has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Check whether two handles share the same storage.
    #[inline]
    pub fn ptr_eq(a: &NodeMap, b: &NodeMap) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for NodeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.get().iter()).finish()
    }
}

impl FromIterator<(String, ObsNode)> for NodeMap {
    fn from_iter<I: IntoIterator<Item = (String, ObsNode)>>(iter: I) -> Self {
        let map = NodeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
