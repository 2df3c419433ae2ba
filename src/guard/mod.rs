//! Guard subsystem
//!
//! [`Guarded`] wraps an arbitrary callable behind a [`Signature`] so that
//! every invocation validates and coerces its arguments first. On success
//! the callable runs with the coerced values and its result passes through
//! untouched; on failure the callable never runs.
//!
//! ```
//! use typegate::{guard, CallArgs, ParamType, Signature};
//!
//! let average = guard(
//!     Signature::builder()
//!         .var_args("numbers", ParamType::Float)
//!         .build()
//!         .unwrap(),
//!     |args| {
//!         let sum: f64 = args.var_args().iter().filter_map(|v| v.as_f64()).sum();
//!         sum / args.var_args().len() as f64
//!     },
//! );
//!
//! let result = average
//!     .call(&CallArgs::positional(["1", "2", "4.6", "10", "9.4"]))
//!     .unwrap();
//! assert!((result - 5.4).abs() < 1e-9);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::coerce::CoercionMode;
use crate::signature::Signature;
use crate::validate::{
    ArgumentValidator, CallArgs, CallError, FieldError, ValidatedArgs, ValidationFailure,
};

/// Call-time behavior of a guarded callable
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardConfig {
    /// Coercion mode applied to every bound value
    pub mode: CoercionMode,
}

/// A callable wrapped behind an immutable signature
///
/// Holds no per-call state; the schema is built once at wrap time, so
/// concurrent calls are safe when `F` is.
#[derive(Debug, Clone)]
pub struct Guarded<F> {
    validator: ArgumentValidator,
    func: F,
}

/// Wrap `func` behind `signature` with the default configuration.
pub fn guard<F, R>(signature: Signature, func: F) -> Guarded<F>
where
    F: Fn(&ValidatedArgs) -> R,
{
    Guarded::new(signature, func)
}

impl<F> Guarded<F> {
    /// Wrap `func` behind `signature` in lax coercion mode
    pub fn new<R>(signature: Signature, func: F) -> Self
    where
        F: Fn(&ValidatedArgs) -> R,
    {
        Self::with_config(signature, GuardConfig::default(), func)
    }

    /// Wrap `func` with an explicit configuration
    pub fn with_config<R>(signature: Signature, config: GuardConfig, func: F) -> Self
    where
        F: Fn(&ValidatedArgs) -> R,
    {
        Self {
            validator: ArgumentValidator::new(signature).with_mode(config.mode),
            func,
        }
    }

    /// The signature this callable is wrapped behind
    pub fn signature(&self) -> &Signature {
        self.validator.signature()
    }

    /// Validate `call` and delegate to the wrapped callable.
    ///
    /// The callable's result passes through untouched, including any error
    /// value it produces itself.
    pub fn call<R>(&self, call: &CallArgs) -> Result<R, CallError>
    where
        F: Fn(&ValidatedArgs) -> R,
    {
        let validated = self.validator.validate(call)?;
        Ok((self.func)(&validated))
    }

    /// Like [`call`](Guarded::call), but additionally coerces the return
    /// value against the signature's declared return type, if any.
    pub fn call_checked<R>(&self, call: &CallArgs) -> Result<R, CallError>
    where
        F: Fn(&ValidatedArgs) -> R,
        R: Serialize + DeserializeOwned,
    {
        let validated = self.validator.validate(call)?;
        let result = (self.func)(&validated);
        if self.validator.signature().returns().is_none() {
            return Ok(result);
        }

        let raw = serde_json::to_value(&result).map_err(|_| {
            CallError::Validation(ValidationFailure::new(vec![FieldError::new(
                "returns",
                "value",
                "return value is not serializable",
            )]))
        })?;
        let coerced = self.validator.check_return(&raw).map_err(CallError::Validation)?;
        serde_json::from_value(coerced).map_err(|_| {
            CallError::Validation(ValidationFailure::new(vec![FieldError::new(
                "returns",
                "value",
                "coerced value does not fit the callable's return type",
            )]))
        })
    }
}
