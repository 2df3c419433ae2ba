//! # Signature Errors
//!
//! Errors raised while building a call signature. All of these surface at
//! construction time; a built [`Signature`](super::Signature) is immutable
//! and never fails afterwards.

use thiserror::Error;

/// Result type for signature construction
pub type SignatureResult<T> = Result<T, SignatureError>;

/// Errors detected when a signature is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Parameter name declared twice
    #[error("Duplicate parameter '{0}'")]
    DuplicateParam(String),

    /// More than one variadic-positional parameter
    #[error("Signature already has a variadic-positional parameter ('{0}')")]
    DuplicateVarArgs(String),

    /// More than one variadic-keyword parameter
    #[error("Signature already has a variadic-keyword parameter ('{0}')")]
    DuplicateVarKwargs(String),

    /// Ordinary parameter declared after the variadic-positional slot
    #[error("Parameter '{0}' declared after the variadic-positional parameter")]
    ParamAfterVarArgs(String),

    /// Any parameter declared after the variadic-keyword slot
    #[error("Parameter '{0}' declared after the variadic-keyword parameter")]
    ParamAfterVarKwargs(String),

    /// Parameter without a default following one with a default
    #[error("Required parameter '{0}' follows a parameter with a default")]
    RequiredAfterDefault(String),

    /// Untyped parameter with no default and no explicit opt-in
    #[error("No type or default value specified for parameter '{0}'")]
    UntypedParam(String),

    /// Empty parameter name
    #[error("Parameter name must not be empty")]
    EmptyName,
}
