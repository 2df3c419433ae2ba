//! Argument validator
//!
//! Validation semantics:
//! - Binding errors surface before any coercion runs
//! - Every bound value is checked; failures accumulate and are reported
//!   together, never just the first
//! - Untyped parameters are forwarded unchanged
//! - A missing parameter takes its default verbatim, or contributes a
//!   "field required" entry
//! - Variadic values are coerced element by element
//!
//! The validator does not mutate its inputs. Validation is deterministic.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::binder::{bind, Binding, CallArgs, Slot};
use super::errors::{CallError, FieldError, ValidationFailure};
use crate::coerce::{Coerce, CoercionMode, JsonCoercer};
use crate::signature::{ParamDef, Signature};

/// The coerced result of one successful validation
///
/// Ordinary parameters keep declaration order; variadic-positional values
/// collect into an ordered sequence, variadic-keyword values into a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    values: Vec<(String, Value)>,
    var_args: Vec<Value>,
    var_kwargs: BTreeMap<String, Value>,
}

impl ValidatedArgs {
    /// Ordinary parameter values in declaration order
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Look up an ordinary parameter's coerced value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Deserialize an ordinary parameter into a concrete type.
    ///
    /// Returns `None` if the parameter does not exist or the coerced value
    /// does not fit `T`; validated values always fit their declared type.
    pub fn arg_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Collected variadic-positional values, in call order
    pub fn var_args(&self) -> &[Value] {
        &self.var_args
    }

    /// Collected variadic-keyword values
    pub fn var_kwargs(&self) -> &BTreeMap<String, Value> {
        &self.var_kwargs
    }
}

/// Validates one call's arguments against an immutable signature
///
/// Built once per guarded callable; holds no per-call state, so concurrent
/// calls against the same validator are safe.
#[derive(Debug, Clone)]
pub struct ArgumentValidator<C: Coerce = JsonCoercer> {
    signature: Signature,
    coercer: C,
    mode: CoercionMode,
}

impl ArgumentValidator<JsonCoercer> {
    /// Create a validator with the default coercion engine in lax mode
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            coercer: JsonCoercer,
            mode: CoercionMode::Lax,
        }
    }
}

impl<C: Coerce> ArgumentValidator<C> {
    /// Create a validator with a custom coercion engine
    pub fn with_coercer(signature: Signature, coercer: C, mode: CoercionMode) -> Self {
        Self {
            signature,
            coercer,
            mode,
        }
    }

    /// Set the coercion mode
    pub fn with_mode(mut self, mode: CoercionMode) -> Self {
        self.mode = mode;
        self
    }

    /// The signature this validator enforces
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Bind and validate one call's arguments.
    pub fn validate(&self, call: &CallArgs) -> Result<ValidatedArgs, CallError> {
        let binding = bind(&self.signature, call)?;
        let mut errors = Vec::new();

        let values = self.validate_ordinary(&binding, &mut errors);
        let var_args = self.validate_var_args(&binding, &mut errors);
        let var_kwargs = self.validate_var_kwargs(&binding, &mut errors);

        if errors.is_empty() {
            Ok(ValidatedArgs {
                values,
                var_args,
                var_kwargs,
            })
        } else {
            Err(CallError::Validation(ValidationFailure::new(errors)))
        }
    }

    /// Coerce the callable's return value against the declared return type.
    ///
    /// A signature without a declared return type passes everything through.
    pub fn check_return(&self, value: &Value) -> Result<Value, ValidationFailure> {
        let ty = match self.signature.returns() {
            Some(ty) => ty,
            None => return Ok(value.clone()),
        };
        self.coercer.coerce(value, ty, self.mode).map_err(|err| {
            ValidationFailure::new(vec![FieldError::new(
                format!("returns{}", err.path),
                err.expected,
                err.reason,
            )])
        })
    }

    /// Coerce a single value against a parameter's declared type.
    ///
    /// `field` is the full path recorded on failure.
    fn coerce_field(
        &self,
        param: &ParamDef,
        field: &str,
        value: &Value,
        errors: &mut Vec<FieldError>,
    ) -> Option<Value> {
        let ty = match &param.ty {
            Some(ty) => ty,
            None => return Some(value.clone()),
        };
        match self.coercer.coerce(value, ty, self.mode) {
            Ok(coerced) => Some(coerced),
            Err(err) => {
                errors.push(FieldError::new(
                    format!("{}{}", field, err.path),
                    err.expected,
                    err.reason,
                ));
                None
            }
        }
    }

    fn validate_ordinary(
        &self,
        binding: &Binding,
        errors: &mut Vec<FieldError>,
    ) -> Vec<(String, Value)> {
        let mut values = Vec::new();
        for (param, slot) in self.signature.positional().zip(&binding.ordinary) {
            match slot {
                Slot::Provided(value) => {
                    if let Some(coerced) = self.coerce_field(param, &param.name, value, errors) {
                        values.push((param.name.clone(), coerced));
                    }
                }
                Slot::Missing => match &param.default {
                    // Defaults are author-supplied; forwarded verbatim
                    Some(default) => values.push((param.name.clone(), default.clone())),
                    None => errors.push(FieldError::required(&param.name)),
                },
            }
        }
        values
    }

    fn validate_var_args(&self, binding: &Binding, errors: &mut Vec<FieldError>) -> Vec<Value> {
        let param = match self.signature.var_args() {
            Some(param) => param,
            None => return Vec::new(),
        };
        let mut out = Vec::new();
        for (i, value) in binding.extra_args.iter().enumerate() {
            let field = format!("{}[{}]", param.name, i);
            if let Some(coerced) = self.coerce_field(param, &field, value, errors) {
                out.push(coerced);
            }
        }
        out
    }

    fn validate_var_kwargs(
        &self,
        binding: &Binding,
        errors: &mut Vec<FieldError>,
    ) -> BTreeMap<String, Value> {
        let param = match self.signature.var_kwargs() {
            Some(param) => param,
            None => return BTreeMap::new(),
        };
        let mut out = BTreeMap::new();
        for (key, value) in &binding.extra_kwargs {
            if let Some(coerced) = self.coerce_field(param, key, value, errors) {
                out.insert(key.clone(), coerced);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::BindError;
    use super::*;
    use crate::signature::ParamType;
    use serde_json::json;

    fn validator(signature: Signature) -> ArgumentValidator {
        ArgumentValidator::new(signature)
    }

    #[test]
    fn test_scalars_coerced_and_ordered() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .param("b", ParamType::Float)
                .build()
                .unwrap(),
        );
        let out = v.validate(&CallArgs::new().arg("1").arg("1.6")).unwrap();
        let names: Vec<&str> = out.values().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(out.get("a"), Some(&json!(1)));
        assert_eq!(out.get("b"), Some(&json!(1.6)));
        assert_eq!(out.arg_as::<i64>("a"), Some(1));
    }

    #[test]
    fn test_default_applied_without_recoercion() {
        let v = validator(
            Signature::builder()
                .param("x", ParamType::Int)
                .param_with_default("y", ParamType::Int, 5)
                .build()
                .unwrap(),
        );
        let out = v.validate(&CallArgs::new().arg("3")).unwrap();
        assert_eq!(out.get("x"), Some(&json!(3)));
        assert_eq!(out.get("y"), Some(&json!(5)));
    }

    #[test]
    fn test_missing_required_is_aggregated_not_bind() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .param("b", ParamType::Int)
                .build()
                .unwrap(),
        );
        let err = v.validate(&CallArgs::new()).unwrap_err();
        match err {
            CallError::Validation(failure) => {
                assert_eq!(failure.len(), 2);
                assert!(failure.errors().iter().all(|e| e.reason == "field required"));
            }
            CallError::Bind(_) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn test_all_failures_reported_together() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .param("b", ParamType::Float)
                .param("c", ParamType::Bool)
                .build()
                .unwrap(),
        );
        let err = v
            .validate(&CallArgs::new().arg("x").arg("y").arg("z"))
            .unwrap_err();
        match err {
            CallError::Validation(failure) => {
                assert_eq!(failure.len(), 3);
                let fields: Vec<&str> =
                    failure.errors().iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["a", "b", "c"]);
            }
            CallError::Bind(_) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn test_untyped_forwarded_unchanged() {
        let v = validator(
            Signature::builder()
                .untyped("anything")
                .allow_untyped()
                .build()
                .unwrap(),
        );
        let raw = json!({"deep": [1, "two", null]});
        let out = v.validate(&CallArgs::new().arg(raw.clone())).unwrap();
        assert_eq!(out.get("anything"), Some(&raw));
    }

    #[test]
    fn test_var_args_coerced_per_element() {
        let v = validator(
            Signature::builder()
                .var_args("numbers", ParamType::Float)
                .build()
                .unwrap(),
        );
        let out = v
            .validate(&CallArgs::positional(["1", "2", "4.6"]))
            .unwrap();
        assert_eq!(out.var_args(), &[json!(1.0), json!(2.0), json!(4.6)]);
    }

    #[test]
    fn test_var_args_failure_paths_carry_index() {
        let v = validator(
            Signature::builder()
                .var_args("numbers", ParamType::Float)
                .build()
                .unwrap(),
        );
        let err = v
            .validate(&CallArgs::positional(["1", "x", "y"]))
            .unwrap_err();
        match err {
            CallError::Validation(failure) => {
                let fields: Vec<&str> =
                    failure.errors().iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["numbers[1]", "numbers[2]"]);
            }
            CallError::Bind(_) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn test_var_kwargs_coerced_per_value() {
        let v = validator(
            Signature::builder()
                .var_kwargs("kwargs", ParamType::Int)
                .build()
                .unwrap(),
        );
        let out = v
            .validate(&CallArgs::new().kwarg("a", "1").kwarg("b", "2"))
            .unwrap();
        assert_eq!(out.var_kwargs().get("a"), Some(&json!(1)));
        assert_eq!(out.var_kwargs().get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_bind_error_precedes_coercion() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .build()
                .unwrap(),
        );
        // "x" would fail coercion, but the unknown keyword wins
        let err = v
            .validate(&CallArgs::new().arg("x").kwarg("z", 1))
            .unwrap_err();
        assert!(matches!(err, CallError::Bind(BindError::UnexpectedKeyword(_))));
    }

    #[test]
    fn test_strict_mode_rejects_lax_conversions() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .build()
                .unwrap(),
        )
        .with_mode(CoercionMode::Strict);
        assert!(v.validate(&CallArgs::new().arg("1")).is_err());
        assert!(v.validate(&CallArgs::new().arg(1)).is_ok());
    }

    #[test]
    fn test_check_return_coerces_declared_type() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .returns(ParamType::Float)
                .build()
                .unwrap(),
        );
        assert_eq!(v.check_return(&json!("2.5")).unwrap(), json!(2.5));
        let failure = v.check_return(&json!("nope")).unwrap_err();
        assert_eq!(failure.errors()[0].field, "returns");
        assert_eq!(failure.errors()[0].reason, "not a valid float");
    }

    #[test]
    fn test_validation_is_deterministic() {
        let v = validator(
            Signature::builder()
                .param("a", ParamType::Int)
                .var_kwargs("rest", ParamType::Bool)
                .build()
                .unwrap(),
        );
        let call = CallArgs::new().arg("1").kwarg("t", "true").kwarg("f", 0);
        let first = v.validate(&call).unwrap();
        for _ in 0..100 {
            assert_eq!(v.validate(&call).unwrap(), first);
        }
    }
}
