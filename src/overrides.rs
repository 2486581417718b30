//! Path-keyed override table consulted during wrapping.
//!
//! An override replaces the default recursive wrap for the mapping found at
//! its path. It receives the raw, unwrapped value and its result is used
//! verbatim as the node at that position: no recursion happens beneath it
//! and no extra container is added around it. Every mapping encountered at
//! the path fires the override, so an override at a sequence-valued path
//! runs once per element (elements share the sequence's path).

use crate::{ObsNode, Path, PlainValue};
use std::collections::HashMap;
use std::fmt;

/// A caller-supplied transform bound to a path.
pub type OverrideFn = Box<dyn Fn(&PlainValue) -> ObsNode>;

/// A table of per-path wrap overrides.
///
/// # Examples
///
/// ```
/// use sigtree::{from_value_with, to_value, ObsNode, OverrideTable, PlainValue};
/// use serde_json::json;
///
/// // Keep the report sub-object plain instead of wrapping it.
/// let overrides = OverrideTable::new()
///     .with("/widget/report", |raw| ObsNode::Value(raw.clone()));
///
/// let value = PlainValue::from(json!({"widget": {"report": {"id": 10}}}));
/// let tree = from_value_with(&value, &overrides);
/// assert_eq!(to_value(&tree), value);
/// ```
#[derive(Default)]
pub struct OverrideTable {
    entries: HashMap<Path, OverrideFn>,
}

impl OverrideTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an override to a path and return self (builder pattern).
    pub fn with(
        mut self,
        path: impl Into<Path>,
        f: impl Fn(&PlainValue) -> ObsNode + 'static,
    ) -> Self {
        self.insert(path, f);
        self
    }

    /// Bind an override to a path, replacing any previous binding.
    pub fn insert(
        &mut self,
        path: impl Into<Path>,
        f: impl Fn(&PlainValue) -> ObsNode + 'static,
    ) {
        self.entries.insert(path.into(), Box::new(f));
    }

    /// Look up the override bound to an exact path.
    pub fn get(&self, path: &Path) -> Option<&OverrideFn> {
        self.entries.get(path)
    }

    /// Number of bound paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no overrides are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for OverrideTable {
    // Transform functions are opaque; show the bound paths.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<String> = self.entries.keys().map(Path::to_string).collect();
        paths.sort();
        f.debug_struct("OverrideTable")
            .field("paths", &paths)
            .finish()
    }
}
