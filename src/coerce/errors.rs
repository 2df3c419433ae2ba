//! Coercion failure details
//!
//! A [`CoerceError`] describes one value that could not be converted to its
//! declared type: the expected type, the JSON type actually found, and a
//! short machine-readable reason. For container types the `path` field
//! carries the position of the offending element relative to the value that
//! was being coerced (e.g. `[1]` or `.verbose`); the validator prefixes it
//! with the parameter's own path when building the aggregated failure.

use thiserror::Error;

/// A single failed coercion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} (expected {expected}, got {actual})")]
pub struct CoerceError {
    /// Position of the failing element relative to the coerced value;
    /// empty for scalars
    pub path: String,
    /// Declared type name
    pub expected: &'static str,
    /// JSON type name of the value found
    pub actual: &'static str,
    /// Machine-readable reason, e.g. "not a valid float"
    pub reason: &'static str,
}

impl CoerceError {
    /// Prefix the element path with one list index
    pub(crate) fn at_index(mut self, index: usize) -> Self {
        self.path = format!("[{}]{}", index, self.path);
        self
    }

    /// Prefix the element path with one map key
    pub(crate) fn at_key(mut self, key: &str) -> Self {
        self.path = format!(".{}{}", key, self.path);
        self
    }
}
