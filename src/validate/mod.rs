//! Validation subsystem
//!
//! Turns one call's raw arguments into [`ValidatedArgs`] or a structured
//! failure, in two distinct phases:
//! 1. Binding: map positionals and keywords onto parameter slots. Shape
//!    mismatches are [`BindError`]s and abort before any coercion.
//! 2. Coercion: every bound value is checked against its declared type; all
//!    failures are aggregated into one [`ValidationFailure`].

mod binder;
mod errors;
mod validator;

pub use binder::CallArgs;
pub use errors::{BindError, CallError, FieldError, ValidationFailure};
pub use validator::{ArgumentValidator, ValidatedArgs};
