//! Coercion Invariant Tests
//!
//! The coercion engine through the public validator surface:
//! - Lax conversions are lossless and unambiguous
//! - Strict mode requires exact JSON types
//! - Containers coerce element by element and report positions
//! - Coercion is deterministic and never mutates its input

use serde_json::{json, Value};
use typegate::{Coerce, CoercionMode, JsonCoercer, ParamType};

// =============================================================================
// Helper Functions
// =============================================================================

fn lax(value: Value, ty: &ParamType) -> Result<Value, typegate::coerce::CoerceError> {
    JsonCoercer.coerce(&value, ty, CoercionMode::Lax)
}

fn strict(value: Value, ty: &ParamType) -> Result<Value, typegate::coerce::CoerceError> {
    JsonCoercer.coerce(&value, ty, CoercionMode::Strict)
}

// =============================================================================
// Lax Conversion Tests
// =============================================================================

#[test]
fn test_numeric_strings_convert() {
    assert_eq!(lax(json!("10"), &ParamType::Int).unwrap(), json!(10));
    assert_eq!(lax(json!("9.4"), &ParamType::Float).unwrap(), json!(9.4));
    assert_eq!(lax(json!("1"), &ParamType::Float).unwrap(), json!(1.0));
}

#[test]
fn test_int_widens_to_float() {
    assert_eq!(lax(json!(10), &ParamType::Float).unwrap(), json!(10.0));
}

#[test]
fn test_fractional_float_never_narrows_to_int() {
    assert!(lax(json!(3.5), &ParamType::Int).is_err());
    assert!(lax(json!("3.5"), &ParamType::Int).is_err());
    assert_eq!(lax(json!(3.0), &ParamType::Int).unwrap(), json!(3));
}

#[test]
fn test_bool_words_and_digits() {
    assert_eq!(lax(json!("on"), &ParamType::Bool).unwrap(), json!(true));
    assert_eq!(lax(json!("OFF"), &ParamType::Bool).unwrap(), json!(false));
    assert_eq!(lax(json!(1), &ParamType::Bool).unwrap(), json!(true));
    assert!(lax(json!(-1), &ParamType::Bool).is_err());
}

#[test]
fn test_scalars_render_to_str() {
    assert_eq!(lax(json!(42), &ParamType::Str).unwrap(), json!("42"));
    assert_eq!(lax(json!(2.5), &ParamType::Str).unwrap(), json!("2.5"));
    assert_eq!(lax(json!(false), &ParamType::Str).unwrap(), json!("false"));
    assert!(lax(json!([1]), &ParamType::Str).is_err());
}

#[test]
fn test_null_rejected_for_every_type() {
    let types = [
        ParamType::Bool,
        ParamType::Int,
        ParamType::Float,
        ParamType::Str,
        ParamType::list(ParamType::Int),
        ParamType::map(ParamType::Int),
    ];
    for ty in &types {
        let err = lax(json!(null), ty).unwrap_err();
        assert_eq!(err.actual, "null");
    }
}

// =============================================================================
// Container Tests
// =============================================================================

#[test]
fn test_nested_containers_coerce_recursively() {
    let ty = ParamType::map(ParamType::list(ParamType::Float));
    let out = lax(json!({"xs": ["1", 2, "3.5"]}), &ty).unwrap();
    assert_eq!(out, json!({"xs": [1.0, 2.0, 3.5]}));
}

#[test]
fn test_container_failure_reports_position() {
    let ty = ParamType::list(ParamType::map(ParamType::Int));
    let err = lax(json!([{"a": 1}, {"b": "bad"}]), &ty).unwrap_err();
    assert_eq!(err.path, "[1].b");
    assert_eq!(err.reason, "not a valid int");
}

// =============================================================================
// Strict Mode Tests
// =============================================================================

#[test]
fn test_strict_requires_exact_types() {
    assert!(strict(json!("1"), &ParamType::Int).is_err());
    assert!(strict(json!(1), &ParamType::Float).is_err());
    assert!(strict(json!("true"), &ParamType::Bool).is_err());
    assert!(strict(json!(1), &ParamType::Str).is_err());

    assert_eq!(strict(json!(1), &ParamType::Int).unwrap(), json!(1));
    assert_eq!(strict(json!(1.5), &ParamType::Float).unwrap(), json!(1.5));
    assert_eq!(strict(json!(true), &ParamType::Bool).unwrap(), json!(true));
    assert_eq!(strict(json!("s"), &ParamType::Str).unwrap(), json!("s"));
}

#[test]
fn test_strict_applies_inside_containers() {
    let ty = ParamType::list(ParamType::Int);
    assert!(strict(json!(["1"]), &ty).is_err());
    assert_eq!(strict(json!([1, 2]), &ty).unwrap(), json!([1, 2]));
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_coercion_does_not_mutate_input() {
    let input = json!({"a": "1"});
    let ty = ParamType::map(ParamType::Int);
    let out = lax(input.clone(), &ty).unwrap();
    assert_eq!(input, json!({"a": "1"}));
    assert_eq!(out, json!({"a": 1}));
}

#[test]
fn test_same_input_same_output() {
    let ty = ParamType::list(ParamType::Float);
    let input = json!(["1", "2.5", 3]);
    let first = lax(input.clone(), &ty).unwrap();
    for _ in 0..100 {
        assert_eq!(lax(input.clone(), &ty).unwrap(), first);
    }
}
