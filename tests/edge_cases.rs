//! Edge case tests: cyclic graphs, derived exclusion, container updates.

use serde_json::json;
use sigtree::{
    from_value, to_value, update_from_value, Mutable, NodeMap, ObsNode, PlainValue, SharedMap,
};

fn read_mapping(node: &ObsNode) -> NodeMap {
    match node.read() {
        ObsNode::Mapping(map) => map,
        other => panic!("expected a wrapped mapping, got {}", other.kind()),
    }
}

// ============================================================================
// Cyclic and aliased graphs
// ============================================================================

#[test]
fn wrapping_a_cyclic_graph_terminates() {
    let root = SharedMap::new();
    let child = SharedMap::new();
    child.insert("parent", PlainValue::Object(root.clone()));
    root.insert("child", PlainValue::Object(child.clone()));

    // Must not recurse forever.
    let tree = from_value(&PlainValue::Object(root));
    assert!(tree.is_observable());
}

#[test]
fn cycle_occurrences_share_one_node() {
    let root = SharedMap::new();
    let child = SharedMap::new();
    child.insert("parent", PlainValue::Object(root.clone()));
    root.insert("child", PlainValue::Object(child));

    let tree = from_value(&PlainValue::Object(root));
    let root_map = read_mapping(&tree);

    let root_entries = root_map.get();
    let child_map = read_mapping(&root_entries["child"]);
    let child_entries = child_map.get();
    match &child_entries["parent"] {
        ObsNode::Mapping(back) => assert!(NodeMap::ptr_eq(back, &root_map)),
        other => panic!("expected the shared root mapping, got {}", other.kind()),
    }
}

#[test]
fn self_referential_mapping_wraps() {
    let map = SharedMap::new();
    map.insert("me", PlainValue::Object(map.clone()));
    map.insert("n", PlainValue::from(1));

    let tree = from_value(&PlainValue::Object(map));
    let outer = read_mapping(&tree);
    let entries = outer.get();
    assert!(entries["n"].is_observable());
    match &entries["me"] {
        ObsNode::Mapping(inner) => assert!(NodeMap::ptr_eq(inner, &outer)),
        other => panic!("expected the shared mapping, got {}", other.kind()),
    }
}

// ============================================================================
// Derived container exclusion
// ============================================================================

#[test]
fn derived_keys_are_dropped_from_mapping_output() {
    let source = Mutable::new(ObsNode::Value(PlainValue::from(3)));
    let map = NodeMap::new();
    map.insert("plain", ObsNode::scalar(1));
    map.insert("total", ObsNode::derived(&source));

    let out = to_value(&ObsNode::cell(ObsNode::Mapping(map)));
    assert_eq!(out, PlainValue::from(json!({"plain": 1})));
}

#[test]
fn derived_sequence_elements_are_kept() {
    let source = Mutable::new(ObsNode::Value(PlainValue::from(3)));
    let tree = ObsNode::list(vec![ObsNode::derived(&source), ObsNode::scalar(4)]);

    assert_eq!(to_value(&tree), PlainValue::from(json!([3, 4])));
}

// ============================================================================
// Container updates
// ============================================================================

#[test]
fn update_writes_through_existing_cell() {
    let target = ObsNode::scalar(PlainValue::Null);
    update_from_value(&target, &PlainValue::from(json!({"a": {"x": 1}, "b": 2}))).unwrap();

    assert_eq!(
        to_value(&target),
        PlainValue::from(json!({"a": {"x": 1}, "b": 2}))
    );
}

#[test]
fn update_replaces_sequence_contents() {
    let target = ObsNode::list(vec![ObsNode::scalar(1)]);
    update_from_value(&target, &PlainValue::from(json!([7, 8, 9]))).unwrap();

    assert_eq!(to_value(&target), PlainValue::from(json!([7, 8, 9])));
}

#[test]
fn update_rejects_derived_target() {
    let source = Mutable::new(ObsNode::Value(PlainValue::Null));
    let target = ObsNode::derived(&source);
    assert!(update_from_value(&target, &PlainValue::from(1)).is_err());
}

#[test]
fn updated_cell_observes_new_value() {
    // A clone of a container observes writes made through the original.
    let target = ObsNode::scalar(PlainValue::Null);
    let watcher = target.clone();

    update_from_value(&target, &PlainValue::from("fresh")).unwrap();
    assert_eq!(to_value(&watcher), PlainValue::from("fresh"));
}

// ============================================================================
// Unwrap shapes
// ============================================================================

#[test]
fn unwrap_is_idempotent_on_plain_values() {
    let value = PlainValue::from(json!({"a": [1, {"b": null}], "c": "x"}));
    let once = to_value(&ObsNode::Value(value.clone()));
    assert_eq!(once, value);
    let twice = to_value(&ObsNode::Value(once));
    assert_eq!(twice, value);
}

#[test]
fn unwrap_collapses_double_observable_layer() {
    // A mapping rides inside a scalar cell; one structure, two layers.
    let tree = from_value(&PlainValue::from(json!({"k": "v"})));
    let peeled = tree.read();
    assert!(matches!(peeled, ObsNode::Mapping(_)));
    assert_eq!(to_value(&peeled), PlainValue::from(json!({"k": "v"})));
}
