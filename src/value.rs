//! Plain data values: the unwrapped side of the mapping.
//!
//! [`PlainValue`] is the source domain of [`wrap`](crate::from_value) and the
//! result domain of [`unwrap`](crate::to_value). It is a JSON-style value
//! with two extensions over `serde_json::Value`: a dedicated `Date` scalar,
//! and keyed mappings with shared storage ([`SharedMap`]) so that two keys
//! can alias the same mapping and object graphs can be cyclic. Cycle handling
//! during wrapping relies on that sharing for its identity checks.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// The shape of a plain value, as consulted by the traversals.
///
/// Classification rules, in priority order: null is `Null`; a date is `Date`
/// (never `Object`); an ordered sequence is `Array`; any other non-primitive
/// is `Object`; otherwise the primitive's own kind. `Date` classifies
/// separately but gets no special treatment in the traversals: it rides the
/// scalar path and must keep its value identity through a round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The null value.
    Null,
    /// A boolean scalar.
    Bool,
    /// A numeric scalar.
    Number,
    /// A string scalar.
    String,
    /// A date scalar.
    Date,
    /// An ordered sequence.
    Array,
    /// A keyed mapping.
    Object,
}

impl Shape {
    /// Human-readable name of this shape, for diagnostics.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Date => "date",
            Shape::Array => "array",
            Shape::Object => "object",
        }
    }

    /// Returns true for the shapes that wrap into a scalar container.
    #[inline]
    pub fn is_scalar(self) -> bool {
        !matches!(self, Shape::Array | Shape::Object)
    }
}

/// A plain data value.
///
/// # Examples
///
/// ```
/// use sigtree::{PlainValue, Shape};
/// use serde_json::json;
///
/// let value = PlainValue::from(json!({"a": [1, 2], "b": "text"}));
/// assert_eq!(value.shape(), Shape::Object);
/// assert_eq!(value.to_json_value(), json!({"a": [1, 2], "b": "text"}));
/// ```
#[derive(Clone, Debug)]
pub enum PlainValue {
    /// The null value.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(Number),
    /// A string scalar.
    String(String),
    /// A date scalar. Serializes as RFC 3339 text.
    Date(DateTime<Utc>),
    /// An ordered sequence of values.
    Array(Vec<PlainValue>),
    /// A keyed mapping with shared storage.
    Object(SharedMap),
}

impl PlainValue {
    /// Classify this value.
    #[inline]
    pub fn shape(&self) -> Shape {
        match self {
            PlainValue::Null => Shape::Null,
            PlainValue::Bool(_) => Shape::Bool,
            PlainValue::Number(_) => Shape::Number,
            PlainValue::String(_) => Shape::String,
            PlainValue::Date(_) => Shape::Date,
            PlainValue::Array(_) => Shape::Array,
            PlainValue::Object(_) => Shape::Object,
        }
    }

    /// Returns true if this value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, PlainValue::Null)
    }

    /// Get the boolean if this is a boolean scalar.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlainValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as an `i64` if this is an integral number.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PlainValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Get the value as an `f64` if this is a number.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PlainValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Get the string slice if this is a string scalar.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlainValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the elements if this is a sequence.
    #[inline]
    pub fn as_array(&self) -> Option<&[PlainValue]> {
        match self {
            PlainValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the shared mapping if this is an object.
    #[inline]
    pub fn as_object(&self) -> Option<&SharedMap> {
        match self {
            PlainValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// Dates become RFC 3339 strings. The input must be acyclic: conversion
    /// recurses without a depth or cycle guard, like JSON serialization.
    pub fn to_json_value(&self) -> Value {
        match self {
            PlainValue::Null => Value::Null,
            PlainValue::Bool(b) => Value::Bool(*b),
            PlainValue::Number(n) => Value::Number(n.clone()),
            PlainValue::String(s) => Value::String(s.clone()),
            PlainValue::Date(d) => Value::String(d.to_rfc3339()),
            PlainValue::Array(items) => {
                Value::Array(items.iter().map(PlainValue::to_json_value).collect())
            }
            PlainValue::Object(map) => {
                let mut out = serde_json::Map::new();
                for (k, v) in map.get().iter() {
                    out.insert(k.clone(), v.to_json_value());
                }
                Value::Object(out)
            }
        }
    }
}

impl PartialEq for PlainValue {
    /// Deep structural equality. Both sides must be acyclic.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PlainValue::Null, PlainValue::Null) => true,
            (PlainValue::Bool(a), PlainValue::Bool(b)) => a == b,
            (PlainValue::Number(a), PlainValue::Number(b)) => a == b,
            (PlainValue::String(a), PlainValue::String(b)) => a == b,
            (PlainValue::Date(a), PlainValue::Date(b)) => a == b,
            (PlainValue::Array(a), PlainValue::Array(b)) => a == b,
            (PlainValue::Object(a), PlainValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for PlainValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => PlainValue::Null,
            Value::Bool(b) => PlainValue::Bool(b),
            Value::Number(n) => PlainValue::Number(n),
            Value::String(s) => PlainValue::String(s),
            Value::Array(items) => {
                PlainValue::Array(items.into_iter().map(PlainValue::from).collect())
            }
            Value::Object(map) => {
                let out = SharedMap::new();
                for (k, v) in map {
                    out.insert(k, PlainValue::from(v));
                }
                PlainValue::Object(out)
            }
        }
    }
}

impl From<bool> for PlainValue {
    fn from(b: bool) -> Self {
        PlainValue::Bool(b)
    }
}

impl From<i64> for PlainValue {
    fn from(n: i64) -> Self {
        PlainValue::Number(n.into())
    }
}

impl From<f64> for PlainValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(PlainValue::Null, PlainValue::Number)
    }
}

impl From<&str> for PlainValue {
    fn from(s: &str) -> Self {
        PlainValue::String(s.to_owned())
    }
}

impl From<String> for PlainValue {
    fn from(s: String) -> Self {
        PlainValue::String(s)
    }
}

impl From<DateTime<Utc>> for PlainValue {
    fn from(d: DateTime<Utc>) -> Self {
        PlainValue::Date(d)
    }
}

impl From<SharedMap> for PlainValue {
    fn from(map: SharedMap) -> Self {
        PlainValue::Object(map)
    }
}

impl Serialize for PlainValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlainValue::Null => serializer.serialize_unit(),
            PlainValue::Bool(b) => serializer.serialize_bool(*b),
            PlainValue::Number(n) => n.serialize(serializer),
            PlainValue::String(s) => serializer.serialize_str(s),
            PlainValue::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
            PlainValue::Array(items) => serializer.collect_seq(items),
            PlainValue::Object(map) => serializer.collect_map(map.get().iter()),
        }
    }
}

impl<'de> Deserialize<'de> for PlainValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Value::deserialize(deserializer)?.into())
    }
}

/// A keyed mapping with shared storage.
///
/// Cloning a `SharedMap` shares the underlying storage rather than copying
/// it, so the same mapping can appear at several positions in a value and a
/// mapping can (transitively) contain itself. Identity is pointer identity,
/// checked with [`SharedMap::ptr_eq`].
///
/// # Examples
///
/// ```
/// use sigtree::{PlainValue, SharedMap};
///
/// let map = SharedMap::new();
/// map.insert("a", PlainValue::from(1));
///
/// let alias = map.clone();
/// alias.insert("b", PlainValue::from(2));
///
/// assert_eq!(map.len(), 2);
/// assert!(SharedMap::ptr_eq(&map, &alias));
/// ```
#[derive(Clone, Default)]
pub struct SharedMap(Rc<RefCell<BTreeMap<String, PlainValue>>>);

impl SharedMap {
    /// Create a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a read borrow of the mapping.
    ///
    /// The returned guard dereferences to the underlying map. Callers should
    /// clone any needed data before dropping the guard.
    #[inline]
    pub fn get(&self) -> Ref<'_, BTreeMap<String, PlainValue>> {
        self.0.borrow()
    }

    /// Insert a key, returning the previous value if any.
    pub fn insert(&self, key: impl Into<String>, value: PlainValue) -> Option<PlainValue> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<PlainValue> {
        self.0.borrow_mut().remove(key)
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
    pub fn ptr_eq(a: &SharedMap, b: &SharedMap) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Stable identity of the shared storage, for visited-set bookkeeping.
    #[inline]
    pub(crate) fn identity(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for SharedMap {
    /// Deep contents equality. Both sides must be acyclic.
    fn eq(&self, other: &Self) -> bool {
        SharedMap::ptr_eq(self, other) || *self.get() == *other.get()
    }
}

impl fmt::Debug for SharedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.get().iter()).finish()
    }
}

impl FromIterator<(String, PlainValue)> for SharedMap {
    fn from_iter<I: IntoIterator<Item = (String, PlainValue)>>(iter: I) -> Self {
        let map = SharedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
