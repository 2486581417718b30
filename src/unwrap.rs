//! The unwrapping traversal: observable tree back to plain value.
//!
//! Purely structural: no overrides and no context. Containers are read and
//! their contents recursed into; sequences flatten elementwise; mappings
//! rebuild a plain mapping, dropping any key whose node is a read-only
//! derived container. The derived skip applies only at mapping-key
//! iteration: a derived container encountered at the top level or inside a
//! sequence is read like any other container.

use crate::{ObsNode, PlainValue, SharedMap};

/// Flatten an observable tree into a plain value.
pub(crate) fn unwrap(node: &ObsNode) -> PlainValue {
    match node {
        ObsNode::Cell(cell) => {
            let held = cell.lock_ref().clone();
            unwrap(&held)
        }
        ObsNode::Derived(cell) => {
            let held = cell.lock_ref().clone();
            unwrap(&held)
        }
        ObsNode::List(seq) => PlainValue::Array(seq.lock_ref().iter().map(unwrap).collect()),
        ObsNode::Items(items) => PlainValue::Array(items.iter().map(unwrap).collect()),
        ObsNode::Mapping(map) => {
            let out = SharedMap::new();
            for (key, child) in map.get().iter() {
                if child.is_derived() {
                    continue;
                }
                out.insert(key.clone(), unwrap(child));
            }
            PlainValue::Object(out)
        }
        ObsNode::Value(value) => rebuild(value),
    }
}

/// Copy a plain value with fresh mapping storage, so unwrap output never
/// aliases the input it was flattened from.
fn rebuild(value: &PlainValue) -> PlainValue {
    match value {
        PlainValue::Array(items) => PlainValue::Array(items.iter().map(rebuild).collect()),
        PlainValue::Object(map) => {
            let out = SharedMap::new();
            for (key, child) in map.get().iter() {
                out.insert(key.clone(), rebuild(child));
            }
            PlainValue::Object(out)
        }
        scalar => scalar.clone(),
    }
}
