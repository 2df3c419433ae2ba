//! Call signature type definitions
//!
//! Supported parameter types:
//! - bool: Boolean
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - str: UTF-8 string
//! - list: Homogeneous sequence with element type
//! - map: String-keyed mapping with value type
//!
//! A parameter may also carry no declared type, in which case its values are
//! forwarded to the wrapped callable unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SignatureError, SignatureResult};

/// Declared parameter types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamType {
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 string
    Str,
    /// Homogeneous sequence with a single element type
    List {
        /// Element type (boxed to allow recursive types)
        #[serde(rename = "element_type")]
        element_type: Box<ParamType>,
    },
    /// String-keyed mapping with a single value type
    Map {
        /// Value type (boxed to allow recursive types)
        #[serde(rename = "value_type")]
        value_type: Box<ParamType>,
    },
}

impl ParamType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Str => "str",
            ParamType::List { .. } => "list",
            ParamType::Map { .. } => "map",
        }
    }

    /// Create a list type
    pub fn list(element_type: ParamType) -> Self {
        ParamType::List {
            element_type: Box::new(element_type),
        }
    }

    /// Create a map type
    pub fn map(value_type: ParamType) -> Self {
        ParamType::Map {
            value_type: Box::new(value_type),
        }
    }
}

/// Kinds of parameter a signature can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Ordinary parameter, fillable positionally or by name
    Positional,
    /// Collects extra positional arguments
    VarArgs,
    /// Collects extra keyword arguments
    VarKwargs,
}

/// One declared parameter of the wrapped callable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Parameter name, unique within the signature
    pub name: String,
    /// Declared type; `None` means values are forwarded unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<ParamType>,
    /// Default value applied when the parameter is not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Parameter kind
    pub kind: ParamKind,
}

/// Complete call signature: an ordered, immutable parameter list
///
/// Built once through [`SignatureBuilder`]; declaration order determines how
/// unnamed positional arguments are bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<ParamDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    returns: Option<ParamType>,
}

impl Signature {
    /// Start building a signature
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::new()
    }

    /// All declared parameters in declaration order
    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    /// Declared return type, if any
    pub fn returns(&self) -> Option<&ParamType> {
        self.returns.as_ref()
    }

    /// Ordinary parameters, in the order positional arguments bind to them
    pub fn positional(&self) -> impl Iterator<Item = &ParamDef> {
        self.params
            .iter()
            .filter(|p| p.kind == ParamKind::Positional)
    }

    /// Number of ordinary parameters
    pub fn positional_len(&self) -> usize {
        self.positional().count()
    }

    /// The variadic-positional parameter, if declared
    pub fn var_args(&self) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.kind == ParamKind::VarArgs)
    }

    /// The variadic-keyword parameter, if declared
    pub fn var_kwargs(&self) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.kind == ParamKind::VarKwargs)
    }

    /// Look up an ordinary parameter by name
    pub fn find(&self, name: &str) -> Option<&ParamDef> {
        self.params
            .iter()
            .find(|p| p.kind == ParamKind::Positional && p.name == name)
    }
}

/// Builder for [`Signature`]
///
/// Parameters are declared in call order. All structural rules are checked
/// in [`build`](SignatureBuilder::build), so a successfully built signature
/// never fails at call time for structural reasons.
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    params: Vec<ParamDef>,
    returns: Option<ParamType>,
    allow_untyped: bool,
}

impl SignatureBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a typed parameter
    pub fn param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: Some(ty),
            default: None,
            kind: ParamKind::Positional,
        });
        self
    }

    /// Declare a typed parameter with a default value
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        ty: ParamType,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: Some(ty),
            default: Some(default.into()),
            kind: ParamKind::Positional,
        });
        self
    }

    /// Declare an untyped parameter (values forwarded unchanged)
    ///
    /// Rejected at build time unless the parameter has a default or
    /// [`allow_untyped`](SignatureBuilder::allow_untyped) was set.
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: None,
            default: None,
            kind: ParamKind::Positional,
        });
        self
    }

    /// Declare an untyped parameter with a default value
    pub fn untyped_with_default(
        mut self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: None,
            default: Some(default.into()),
            kind: ParamKind::Positional,
        });
        self
    }

    /// Declare the variadic-positional parameter with an element type
    pub fn var_args(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: Some(ty),
            default: None,
            kind: ParamKind::VarArgs,
        });
        self
    }

    /// Declare an untyped variadic-positional parameter
    pub fn var_args_untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: None,
            default: None,
            kind: ParamKind::VarArgs,
        });
        self
    }

    /// Declare the variadic-keyword parameter with a value type
    pub fn var_kwargs(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: Some(ty),
            default: None,
            kind: ParamKind::VarKwargs,
        });
        self
    }

    /// Declare an untyped variadic-keyword parameter
    pub fn var_kwargs_untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDef {
            name: name.into(),
            ty: None,
            default: None,
            kind: ParamKind::VarKwargs,
        });
        self
    }

    /// Declare the return type
    pub fn returns(mut self, ty: ParamType) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Permit untyped parameters without defaults
    pub fn allow_untyped(mut self) -> Self {
        self.allow_untyped = true;
        self
    }

    /// Validate the declared parameter list and produce the signature
    pub fn build(self) -> SignatureResult<Signature> {
        let mut seen_var_args: Option<&str> = None;
        let mut seen_var_kwargs: Option<&str> = None;
        let mut seen_default = false;

        for (i, param) in self.params.iter().enumerate() {
            if param.name.is_empty() {
                return Err(SignatureError::EmptyName);
            }

            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(SignatureError::DuplicateParam(param.name.clone()));
            }

            if seen_var_kwargs.is_some() && param.kind != ParamKind::VarKwargs {
                return Err(SignatureError::ParamAfterVarKwargs(param.name.clone()));
            }

            match param.kind {
                ParamKind::Positional => {
                    if seen_var_args.is_some() {
                        return Err(SignatureError::ParamAfterVarArgs(param.name.clone()));
                    }
                    if param.default.is_some() {
                        seen_default = true;
                    } else if seen_default {
                        return Err(SignatureError::RequiredAfterDefault(param.name.clone()));
                    }
                    if param.ty.is_none() && param.default.is_none() && !self.allow_untyped {
                        return Err(SignatureError::UntypedParam(param.name.clone()));
                    }
                }
                ParamKind::VarArgs => {
                    if let Some(name) = seen_var_args {
                        return Err(SignatureError::DuplicateVarArgs(name.to_string()));
                    }
                    seen_var_args = Some(&param.name);
                }
                ParamKind::VarKwargs => {
                    if let Some(name) = seen_var_kwargs {
                        return Err(SignatureError::DuplicateVarKwargs(name.to_string()));
                    }
                    seen_var_kwargs = Some(&param.name);
                }
            }
        }

        Ok(Signature {
            params: self.params,
            returns: self.returns,
        })
    }
}
