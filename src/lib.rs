//! typegate - strict, deterministic runtime argument validation
//!
//! Wraps a callable behind an explicit, immutable call signature. Every
//! invocation binds the supplied positional and keyword arguments onto the
//! signature, coerces each value to its declared type, and either delegates
//! to the wrapped callable or reports every failing field in one error.

pub mod coerce;
pub mod guard;
pub mod signature;
pub mod validate;

pub use coerce::{Coerce, CoercionMode, JsonCoercer};
pub use guard::{guard, GuardConfig, Guarded};
pub use signature::{ParamType, Signature, SignatureBuilder};
pub use validate::{BindError, CallArgs, CallError, ValidatedArgs, ValidationFailure};
