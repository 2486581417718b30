//! The wrapping traversal: plain value to observable tree.
//!
//! Dispatches exhaustively on the value's shape. Scalars (null and dates
//! included) become scalar containers holding the value verbatim. Sequences
//! become observable sequences of recursively wrapped elements, in input
//! order, without extending the path. Mappings first consult the visited
//! set (cycle short-circuit), then the override table at the current path,
//! and otherwise recurse key by key into a shared [`NodeMap`] that is
//! finally placed inside a scalar container.

use crate::{NodeMap, ObsNode, OverrideTable, Path, PlainValue, SharedMap};
use futures_signals::signal::Mutable;
use futures_signals::signal_vec::MutableVec;
use std::collections::HashMap;
use std::rc::Rc;

/// Per-call traversal state.
///
/// `visiting` holds an entry for every mapping on the current descent path,
/// keyed by storage identity and mapping to the node produced for it. An
/// entry lives exactly as long as the recursive call on its mapping, so only
/// ancestors are visible: a mapping aliased by two sibling keys is wrapped
/// independently for each, while a mapping that (transitively) contains
/// itself short-circuits to the node already under construction.
struct WrapContext<'a> {
    overrides: &'a OverrideTable,
    visiting: HashMap<*const (), ObsNode>,
    path: Path,
}

/// Wrap a plain value into an observable tree with a fresh root context.
pub(crate) fn wrap_root(value: &PlainValue, overrides: &OverrideTable) -> ObsNode {
    let mut ctx = WrapContext {
        overrides,
        visiting: HashMap::new(),
        path: Path::root(),
    };
    wrap(value, &mut ctx)
}

fn wrap(value: &PlainValue, ctx: &mut WrapContext<'_>) -> ObsNode {
    match value {
        PlainValue::Array(items) => wrap_sequence(items, ctx),
        PlainValue::Object(map) => wrap_mapping(map, ctx),
        scalar => ObsNode::Cell(Mutable::new(ObsNode::Value(scalar.clone()))),
    }
}

fn wrap_sequence(items: &[PlainValue], ctx: &mut WrapContext<'_>) -> ObsNode {
    let seq = MutableVec::new();
    {
        // Elements share the sequence's own path and visiting scope.
        let mut lock = seq.lock_mut();
        for item in items {
            lock.push_cloned(wrap(item, ctx));
        }
    }
    ObsNode::List(Rc::new(seq))
}

fn wrap_mapping(map: &SharedMap, ctx: &mut WrapContext<'_>) -> ObsNode {
    let identity = map.identity();
    if let Some(seen) = ctx.visiting.get(&identity) {
        return seen.clone();
    }

    // Overrides receive the raw mapping; their result is the node, verbatim.
    if let Some(f) = ctx.overrides.get(&ctx.path) {
        return f(&PlainValue::Object(map.clone()));
    }

    let produced = NodeMap::new();
    ctx.visiting
        .insert(identity, ObsNode::Mapping(produced.clone()));

    let entries = map.get();
    for (key, child) in entries.iter() {
        ctx.path.push(key.clone());
        let node = wrap(child, ctx);
        produced.insert(key.clone(), node);
        ctx.path.pop();
    }
    drop(entries);

    ctx.visiting.remove(&identity);
    ObsNode::Cell(Mutable::new(ObsNode::Mapping(produced)))
}
