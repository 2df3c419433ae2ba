//! Value coercion engine
//!
//! Coercion semantics:
//! - Lax mode converts across JSON types where the conversion is lossless
//!   and unambiguous (numeric strings to numbers, 0/1 to bool, numbers and
//!   bools to their string form)
//! - Strict mode requires an exact JSON type match
//! - Null never coerces to a typed parameter
//! - Container elements are coerced individually; the first failing element
//!   is reported with its position
//!
//! Coercion is deterministic and never mutates its input.

use serde_json::{Number, Value};

use super::errors::CoerceError;
use crate::signature::ParamType;

/// Coercion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionMode {
    /// Convert across JSON types where unambiguous
    #[default]
    Lax,
    /// Exact JSON type match only
    Strict,
}

/// The seam the validator delegates to: coerce one raw value to one
/// declared type, or report a typed failure.
pub trait Coerce {
    /// Attempt to produce a value of the declared type from `value`.
    fn coerce(&self, value: &Value, ty: &ParamType, mode: CoercionMode)
        -> Result<Value, CoerceError>;
}

/// Default engine operating on the JSON value model
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCoercer;

impl Coerce for JsonCoercer {
    fn coerce(
        &self,
        value: &Value,
        ty: &ParamType,
        mode: CoercionMode,
    ) -> Result<Value, CoerceError> {
        match ty {
            ParamType::Bool => self.coerce_bool(value, mode),
            ParamType::Int => self.coerce_int(value, mode),
            ParamType::Float => self.coerce_float(value, mode),
            ParamType::Str => self.coerce_str(value, mode),
            ParamType::List { element_type } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| invalid(ty, value))?;
                let mut out = Vec::with_capacity(arr.len());
                for (i, elem) in arr.iter().enumerate() {
                    let coerced = self
                        .coerce(elem, element_type, mode)
                        .map_err(|e| e.at_index(i))?;
                    out.push(coerced);
                }
                Ok(Value::Array(out))
            }
            ParamType::Map { value_type } => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| invalid(ty, value))?;
                let mut out = serde_json::Map::with_capacity(obj.len());
                for (key, elem) in obj {
                    let coerced = self
                        .coerce(elem, value_type, mode)
                        .map_err(|e| e.at_key(key))?;
                    out.insert(key.clone(), coerced);
                }
                Ok(Value::Object(out))
            }
        }
    }
}

impl JsonCoercer {
    fn coerce_bool(&self, value: &Value, mode: CoercionMode) -> Result<Value, CoerceError> {
        if let Value::Bool(b) = value {
            return Ok(Value::Bool(*b));
        }
        if mode == CoercionMode::Strict {
            return Err(invalid(&ParamType::Bool, value));
        }
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                _ => Err(invalid(&ParamType::Bool, value)),
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "f" | "no" | "n" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(invalid(&ParamType::Bool, value)),
            },
            _ => Err(invalid(&ParamType::Bool, value)),
        }
    }

    fn coerce_int(&self, value: &Value, mode: CoercionMode) -> Result<Value, CoerceError> {
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            _ if mode == CoercionMode::Strict => Err(invalid(&ParamType::Int, value)),
            Value::Number(n) => {
                // Float with zero fraction is acceptable as an int
                let f = n.as_f64().ok_or_else(|| invalid(&ParamType::Int, value))?;
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Ok(Value::from(f as i64))
                } else {
                    Err(invalid(&ParamType::Int, value))
                }
            }
            Value::Bool(b) => Ok(Value::from(*b as i64)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid(&ParamType::Int, value)),
            _ => Err(invalid(&ParamType::Int, value)),
        }
    }

    fn coerce_float(&self, value: &Value, mode: CoercionMode) -> Result<Value, CoerceError> {
        match value {
            // Strict float rejects integer-tagged numbers
            Value::Number(n) if mode == CoercionMode::Strict => {
                if n.is_f64() {
                    Ok(value.clone())
                } else {
                    Err(invalid(&ParamType::Float, value))
                }
            }
            _ if mode == CoercionMode::Strict => Err(invalid(&ParamType::Float, value)),
            Value::Number(n) => {
                let f = n.as_f64().ok_or_else(|| invalid(&ParamType::Float, value))?;
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| invalid(&ParamType::Float, value))
            }
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(&ParamType::Float, value)),
            _ => Err(invalid(&ParamType::Float, value)),
        }
    }

    fn coerce_str(&self, value: &Value, mode: CoercionMode) -> Result<Value, CoerceError> {
        match value {
            Value::String(_) => Ok(value.clone()),
            _ if mode == CoercionMode::Strict => Err(invalid(&ParamType::Str, value)),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(invalid(&ParamType::Str, value)),
        }
    }
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

fn invalid(ty: &ParamType, value: &Value) -> CoerceError {
    let reason = match ty {
        ParamType::Bool => "not a valid bool",
        ParamType::Int => "not a valid int",
        ParamType::Float => "not a valid float",
        ParamType::Str => "not a valid str",
        ParamType::List { .. } => "not a valid list",
        ParamType::Map { .. } => "not a valid map",
    };
    CoerceError {
        path: String::new(),
        expected: ty.type_name(),
        actual: json_type_name(value),
        reason,
    }
}
