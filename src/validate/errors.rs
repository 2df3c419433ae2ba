//! # Validation Errors
//!
//! Two distinct call-time failures:
//! - [`BindError`]: the argument shape does not fit the signature (too many
//!   positionals, unknown keyword, duplicate value). Surfaced before any
//!   coercion runs.
//! - [`ValidationFailure`]: one or more bound values failed coercion. Every
//!   field is checked independently and every failure is listed; validation
//!   never stops at the first bad field.

use std::fmt;

use thiserror::Error;

/// Errors from mapping call arguments onto the signature
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// More positional arguments than ordinary parameters, with no
    /// variadic-positional slot to collect the overflow
    #[error("Takes {max} positional argument(s) but {given} were given")]
    TooManyPositional { given: usize, max: usize },

    /// Keyword argument that matches no parameter, with no
    /// variadic-keyword slot to collect it
    #[error("Got an unexpected keyword argument '{0}'")]
    UnexpectedKeyword(String),

    /// Parameter received both a positional and a keyword value
    #[error("Got multiple values for argument '{0}'")]
    MultipleValues(String),
}

/// One field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. "x", "numbers[2]", "opts.verbose"
    pub field: String,
    /// Declared type the value failed to satisfy
    pub expected: String,
    /// Machine-readable reason, e.g. "not a valid float", "field required"
    pub reason: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            reason: reason.into(),
        }
    }

    /// A required parameter that received no value and has no default
    pub fn required(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "value".into(),
            reason: "field required".into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (expected {})",
            self.field, self.reason, self.expected
        )
    }
}

/// Aggregated validation failure: one entry per failing field
///
/// Always complete; if N fields fail, all N appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Every failing field
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} validation error{}",
            self.errors.len(),
            if self.errors.len() == 1 { "" } else { "s" }
        )?;
        for err in &self.errors {
            writeln!(f, "  {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Any call-time failure of a guarded callable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// Argument shape mismatch, detected before coercion
    #[error(transparent)]
    Bind(#[from] BindError),

    /// One or more fields failed coercion
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}
