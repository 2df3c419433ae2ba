//! Coercion subsystem
//!
//! The narrow seam the validator delegates to: given one raw JSON value and
//! one declared [`ParamType`](crate::signature::ParamType), produce a value
//! of that type or a typed failure. [`JsonCoercer`] is the default engine;
//! any [`Coerce`] implementation can stand in for it.

mod coercer;
mod errors;

pub use coercer::{json_type_name, Coerce, CoercionMode, JsonCoercer};
pub use errors::CoerceError;
