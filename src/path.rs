//! Key paths identifying a node's position inside a wrapped value.
//!
//! A path is the `/`-joined sequence of mapping keys from the root of the
//! input value down to a node. The root path is empty. Sequence elements do
//! not extend the path: every element of a sequence shares the path of the
//! sequence itself, which is what lets one override fire per element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key path into a nested plain value.
///
/// Paths are sequences of mapping keys. Use builder methods or the [`path!`]
/// macro to construct them, or parse the `/`-joined text form.
///
/// # Examples
///
/// ```
/// use sigtree::Path;
///
/// let path = Path::root().key("widget").key("report");
/// assert_eq!(path.to_string(), "/widget/report");
/// assert_eq!(path, Path::from("/widget/report"));
/// assert_eq!(Path::root().to_string(), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<String>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a path from a vector of keys.
    #[inline]
    pub fn from_keys(keys: Vec<String>) -> Self {
        Self(keys)
    }

    /// Append a key and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(k.into());
        self
    }

    /// Push a key onto the path (mutating).
    #[inline]
    pub fn push(&mut self, k: impl Into<String>) {
        self.0.push(k.into());
    }

    /// Pop the last key from the path.
    #[inline]
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// Get the keys of this path.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Check if this path is empty (root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of keys in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get the last key.
    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Get the parent path (path without the last key).
    #[inline]
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            let mut p = self.clone();
            p.pop();
            Some(p)
        }
    }

    /// Check if this path is a prefix of another path.
    #[inline]
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            write!(f, "/{}", key)?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self(
            s.split('/')
                .filter(|seg| !seg.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::from(s.as_str())
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Construct a [`Path`] from a sequence of keys.
///
/// # Examples
///
/// ```
/// use sigtree::path;
///
/// let p = path!("widget", "report");
/// assert_eq!(p.to_string(), "/widget/report");
///
/// let root = path!();
/// assert!(root.is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($key:expr),+ $(,)?) => {{
        let mut p = $crate::Path::root();
        $(
            p.push($key);
        )+
        p
    }};
}
