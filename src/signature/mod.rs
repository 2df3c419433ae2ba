//! Call signature subsystem
//!
//! A [`Signature`] is the explicit, immutable description of a callable's
//! parameter list: names, declared types, defaults, and variadic slots.
//! It is built once through [`SignatureBuilder`] at wrap time; structural
//! problems (duplicate names, misplaced variadic slots, untyped parameters
//! without a default) are fatal at build time, never deferred to call time.

mod errors;
mod types;

pub use errors::{SignatureError, SignatureResult};
pub use types::{ParamDef, ParamKind, ParamType, Signature, SignatureBuilder};
