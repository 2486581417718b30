//! Public entry points for the plain/observable mapping.

use crate::unwrap::unwrap;
use crate::wrap::wrap_root;
use crate::{ObsNode, OverrideTable, PlainValue, SigtreeResult};
use tracing::trace;

/// Wrap a plain value into an observable tree.
///
/// Every scalar becomes an observable scalar container, every sequence an
/// observable sequence, and every mapping a plain mapping of wrapped
/// children held inside an observable scalar container.
///
/// # Examples
///
/// ```
/// use sigtree::{from_value, to_value, PlainValue};
/// use serde_json::json;
///
/// let value = PlainValue::from(json!({"a": 1, "b": 2}));
/// let tree = from_value(&value);
/// assert!(tree.is_observable());
/// assert_eq!(to_value(&tree), value);
/// ```
pub fn from_value(value: &PlainValue) -> ObsNode {
    from_value_with(value, &OverrideTable::default())
}

/// Wrap a plain value, consulting an override table at each mapping node.
///
/// The override bound to the empty path fires on the top-level mapping
/// itself. An override result is used verbatim: nothing is wrapped beneath
/// or around it.
pub fn from_value_with(value: &PlainValue, overrides: &OverrideTable) -> ObsNode {
    trace!(
        shape = value.shape().name(),
        overrides = overrides.len(),
        "wrapping plain value"
    );
    wrap_root(value, overrides)
}

/// Wrap a plain value and write the result into an existing container.
///
/// Wrapping the root always adds one observable layer; writing that into a
/// container as-is would double-wrap, so exactly one layer is peeled before
/// the write. Fails with [`SigtreeError::NotWritable`] when the target is
/// not a writable container.
///
/// [`SigtreeError::NotWritable`]: crate::SigtreeError::NotWritable
pub fn update_from_value(target: &ObsNode, value: &PlainValue) -> SigtreeResult<()> {
    update_from_value_with(target, value, &OverrideTable::default())
}

/// [`update_from_value`] with an override table.
pub fn update_from_value_with(
    target: &ObsNode,
    value: &PlainValue,
    overrides: &OverrideTable,
) -> SigtreeResult<()> {
    trace!(target = target.kind(), "updating container from plain value");
    let wrapped = wrap_root(value, overrides);
    target.set(wrapped.read())
}

/// Flatten an observable tree back into a plain value.
///
/// Structural and override-free. Keys holding read-only derived containers
/// are dropped from mapping output; derived containers elsewhere (top level,
/// sequence elements) are read like any other container. The tree must be
/// acyclic.
pub fn to_value(tree: &ObsNode) -> PlainValue {
    unwrap(tree)
}

/// Parse JSON text and wrap the result.
pub fn from_json(text: &str) -> SigtreeResult<ObsNode> {
    from_json_with(text, &OverrideTable::default())
}

/// Parse JSON text and wrap the result, consulting an override table.
pub fn from_json_with(text: &str, overrides: &OverrideTable) -> SigtreeResult<ObsNode> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    Ok(from_value_with(&PlainValue::from(parsed), overrides))
}

/// Flatten an observable tree and serialize it to a JSON string.
pub fn to_json(tree: &ObsNode) -> SigtreeResult<String> {
    Ok(serde_json::to_string(&to_value(tree))?)
}

/// Flatten an observable tree and serialize it to pretty-printed JSON.
pub fn to_json_pretty(tree: &ObsNode) -> SigtreeResult<String> {
    Ok(serde_json::to_string_pretty(&to_value(tree))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_parses_its_text() {
        let tree = from_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(to_value(&tree), PlainValue::from(json!({"a": 1})));
    }

    #[test]
    fn test_from_json_rejects_malformed_text() {
        assert!(from_json("{not json").is_err());
    }

    #[test]
    fn test_to_json_deterministic_key_order() {
        let tree = from_value(&PlainValue::from(json!({"b": "234", "a": {"x": 1}})));
        assert_eq!(to_json(&tree).unwrap(), r#"{"a":{"x":1},"b":"234"}"#);
    }

    #[test]
    fn test_update_peels_single_layer() {
        let target = ObsNode::scalar(PlainValue::Null);
        update_from_value(&target, &PlainValue::from(json!({"a": 1}))).unwrap();

        // The target cell now holds the mapping directly, not a nested cell.
        assert!(matches!(target.read(), ObsNode::Mapping(_)));
        assert_eq!(to_value(&target), PlainValue::from(json!({"a": 1})));
    }

    #[test]
    fn test_update_rejects_plain_target() {
        let target = ObsNode::Value(PlainValue::Null);
        let err = update_from_value(&target, &PlainValue::from(1)).unwrap_err();
        assert!(err.to_string().contains("not a writable container"));
    }
}
