//! Argument binding
//!
//! Maps the raw positional sequence and keyword mapping of one call onto
//! the signature's parameter slots, before any coercion runs:
//! - positionals fill ordinary parameters left to right; overflow goes to
//!   the variadic-positional slot or is an error
//! - keywords fill ordinary parameters by name; unmatched names go to the
//!   variadic-keyword slot or are an error
//! - a parameter bound both ways is an error
//!
//! Binding never inspects values, only shape.

use std::collections::BTreeMap;

use serde_json::Value;

use super::errors::BindError;
use crate::signature::Signature;

/// The transient arguments of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl CallArgs {
    /// No arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a positional sequence
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: BTreeMap::new(),
        }
    }

    /// Append one positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set one keyword argument
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// The positional sequence
    pub fn args(&self) -> &[Value] {
        &self.positional
    }

    /// The keyword mapping
    pub fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.keyword
    }
}

/// One ordinary parameter's bound state
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    /// A value was supplied for this parameter
    Provided(Value),
    /// Nothing supplied; default or "field required" applies downstream
    Missing,
}

/// The result of binding one call onto a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Binding {
    /// One slot per ordinary parameter, in declaration order
    pub ordinary: Vec<Slot>,
    /// Positional overflow destined for the variadic-positional slot
    pub extra_args: Vec<Value>,
    /// Unmatched keywords destined for the variadic-keyword slot
    pub extra_kwargs: BTreeMap<String, Value>,
}

/// Bind call arguments onto the signature's parameter slots.
pub(crate) fn bind(signature: &Signature, call: &CallArgs) -> Result<Binding, BindError> {
    let names: Vec<&str> = signature.positional().map(|p| p.name.as_str()).collect();

    let given = call.args().len();
    if given > names.len() && signature.var_args().is_none() {
        return Err(BindError::TooManyPositional {
            given,
            max: names.len(),
        });
    }

    let mut ordinary = vec![Slot::Missing; names.len()];
    let mut extra_args = Vec::new();
    for (i, value) in call.args().iter().enumerate() {
        if i < names.len() {
            ordinary[i] = Slot::Provided(value.clone());
        } else {
            extra_args.push(value.clone());
        }
    }

    let filled_positionally = given.min(names.len());
    let mut extra_kwargs = BTreeMap::new();
    for (name, value) in call.kwargs() {
        match names.iter().position(|n| n == name) {
            Some(idx) => {
                if idx < filled_positionally {
                    return Err(BindError::MultipleValues(name.clone()));
                }
                ordinary[idx] = Slot::Provided(value.clone());
            }
            None => {
                if signature.var_kwargs().is_some() {
                    extra_kwargs.insert(name.clone(), value.clone());
                } else {
                    return Err(BindError::UnexpectedKeyword(name.clone()));
                }
            }
        }
    }

    Ok(Binding {
        ordinary,
        extra_args,
        extra_kwargs,
    })
}
