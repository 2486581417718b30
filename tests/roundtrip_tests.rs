//! Round-trip tests: wrapping then unwrapping restores the plain value.

use chrono::{DateTime, Utc};
use serde_json::json;
use sigtree::{from_value, to_json, to_value, PlainValue};

fn round_trips(value: PlainValue) {
    let tree = from_value(&value);
    assert_eq!(to_value(&tree), value);
}

#[test]
fn round_trips_scalars() {
    round_trips(PlainValue::Null);
    round_trips(PlainValue::from(true));
    round_trips(PlainValue::from(42));
    round_trips(PlainValue::from(2.5));
    round_trips(PlainValue::from("234"));
}

#[test]
fn round_trips_date_with_identity() {
    let d: DateTime<Utc> = "2024-05-01T12:00:00Z".parse().unwrap();
    let tree = from_value(&PlainValue::Date(d));
    match to_value(&tree) {
        PlainValue::Date(back) => assert_eq!(back, d),
        other => panic!("date lost its identity: {:?}", other),
    }
}

#[test]
fn round_trips_sequences() {
    round_trips(PlainValue::from(json!([])));
    round_trips(PlainValue::from(json!([10, 20, 30, 40])));
    round_trips(PlainValue::from(json!([[1], [], [2, 3]])));
}

#[test]
fn round_trips_mappings() {
    round_trips(PlainValue::from(json!({})));
    round_trips(PlainValue::from(json!({"a": 1, "b": 2})));
    round_trips(PlainValue::from(json!({"a": {"x": 1, "y": 2}, "b": "234"})));
    round_trips(PlainValue::from(json!({"a": []})));
    round_trips(PlainValue::from(
        json!({"items": [{"a": 10}, {"a": 20}], "deep": {"er": {"est": null}}}),
    ));
}

#[test]
fn empty_sequence_stays_a_sequence() {
    let tree = from_value(&PlainValue::from(json!({"a": []})));
    assert_eq!(to_value(&tree), PlainValue::from(json!({"a": []})));
    assert_eq!(to_json(&tree).unwrap(), r#"{"a":[]}"#);
}

#[test]
fn scenario_simple_object() {
    let tree = from_value(&PlainValue::from(json!({"a": 1, "b": 2})));
    let back = to_value(&tree);
    let map = back.as_object().unwrap();
    let entries = map.get();
    assert_eq!(entries["a"].as_i64(), Some(1));
    assert_eq!(entries["b"].as_i64(), Some(2));
}

#[test]
fn scenario_hierarchical_object() {
    let value = PlainValue::from(json!({"a": {"x": 1, "y": 2}, "b": "234"}));
    let tree = from_value(&value);
    assert_eq!(to_value(&tree), value);
    assert_eq!(to_json(&tree).unwrap(), r#"{"a":{"x":1,"y":2},"b":"234"}"#);
}
