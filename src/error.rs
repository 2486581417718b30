//! Error types for sigtree operations.

use thiserror::Error;

/// Result type alias for sigtree operations.
pub type SigtreeResult<T> = Result<T, SigtreeError>;

/// Errors that can occur during sigtree operations.
///
/// Traversal itself never fails: wrapping and unwrapping always run to
/// completion (cyclic mappings included). Errors arise only at the JSON
/// boundary and when writing into a node that is not a writable container.
#[derive(Debug, Error)]
pub enum SigtreeError {
    /// The write target is not a writable container.
    #[error("target is not a writable container: {kind}")]
    NotWritable {
        /// The kind of node that was written to.
        kind: &'static str,
    },

    /// A sequence container was written with a non-sequence value.
    #[error("sequence target requires a sequence value, found {found}")]
    SequenceMismatch {
        /// The kind of node that was written.
        found: &'static str,
    },

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SigtreeError {
    /// Create a not-writable error.
    #[inline]
    pub fn not_writable(kind: &'static str) -> Self {
        SigtreeError::NotWritable { kind }
    }

    /// Create a sequence mismatch error.
    #[inline]
    pub fn sequence_mismatch(found: &'static str) -> Self {
        SigtreeError::SequenceMismatch { found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SigtreeError::not_writable("derived");
        assert!(err.to_string().contains("not a writable container"));

        let err = SigtreeError::sequence_mismatch("value");
        assert!(err.to_string().contains("sequence"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SigtreeError = parse_err.into();
        assert!(err.to_string().contains("serialization error"));
    }
}
