//! Recursive mapping between plain data values and observable trees.
//!
//! `sigtree` turns an arbitrary plain value (scalar, sequence, or nested
//! mapping graph) into an isomorphic tree of reactive containers, and
//! flattens such a tree back to plain data. The containers come from
//! [`futures-signals`]: scalars live in `Mutable` cells, sequences in
//! `MutableVec`, and read-only `ReadOnlyMutable` cells mark derived values
//! that plain-data extraction drops.
//!
//! # Core Concepts
//!
//! - **PlainValue**: JSON-style data with shared mappings, so object graphs
//!   can alias and cycle
//! - **ObsNode**: a node of the wrapped tree — container, plain mapping,
//!   plain sequence, or raw leaf
//! - **OverrideTable**: per-path transforms that replace the default wrap
//!   for the mapping at that path
//! - **Path**: `/`-joined mapping keys locating a node from the root
//!
//! # Quick Start
//!
//! ```
//! use sigtree::{from_value, to_value, PlainValue};
//! use serde_json::json;
//!
//! let value = PlainValue::from(json!({
//!     "widget": {"report": {"id": 10, "name": "Top 10 winners"}},
//!     "items": [10, 20, 30],
//! }));
//!
//! let tree = from_value(&value);
//! assert!(tree.is_observable());
//!
//! // The round trip restores the plain value.
//! assert_eq!(to_value(&tree), value);
//! ```
//!
//! # Overrides
//!
//! An override replaces the default recursive wrap for the mapping found at
//! its path. It receives the raw value and its result is the node, verbatim:
//!
//! ```
//! use sigtree::{from_value_with, ObsNode, OverrideTable, PlainValue};
//! use serde_json::json;
//!
//! let overrides = OverrideTable::new()
//!     .with("/widget/report", |raw| ObsNode::Value(raw.clone()));
//!
//! let value = PlainValue::from(json!({"widget": {"report": {"id": 10}}}));
//! let tree = from_value_with(&value, &overrides);
//! ```
//!
//! # Cycles
//!
//! Wrapping tolerates cyclic mapping graphs: a mapping that transitively
//! contains itself wraps once, and every occurrence shares one node. All
//! other traversals (unwrapping, serialization, deep equality) require
//! acyclic input.
//!
//! [`futures-signals`]: https://docs.rs/futures-signals

mod error;
mod mapping;
mod node;
mod overrides;
mod path;
mod unwrap;
mod value;
mod wrap;

// Core types
pub use error::{SigtreeError, SigtreeResult};
pub use node::{NodeMap, ObsNode};
pub use overrides::{OverrideFn, OverrideTable};
pub use path::Path;
pub use value::{PlainValue, SharedMap, Shape};

// Entry points
pub use mapping::{
    from_json, from_json_with, from_value, from_value_with, to_json, to_json_pretty, to_value,
    update_from_value, update_from_value_with,
};

// Re-export the container primitives for callers that build nodes directly.
pub use futures_signals::signal::{Mutable, ReadOnlyMutable};
pub use futures_signals::signal_vec::MutableVec;
