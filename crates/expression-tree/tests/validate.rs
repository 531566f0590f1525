//! Validation runs before (and without) evaluation.

use expression_tree::{
    BuildError, Expression, FunctionRegistry, ReturnType, ValidationError, ACCESSOR, ELEMENT,
};
use serde_json::json;

fn reg() -> FunctionRegistry {
    FunctionRegistry::builtin()
}

#[test]
fn test_accessor_without_children_fails_validation() {
    let r = reg();
    let expr = Expression::new(&r, ACCESSOR, vec![]).unwrap();
    let err = expr.validate_tree().unwrap_err();
    assert!(matches!(err, ValidationError::Arity(_)), "got: {:?}", err);
    assert!(err.to_string().contains("at least 1 operands"));
}

#[test]
fn test_accessor_needs_string_constant_name() {
    let r = reg();
    let err = Expression::make(&r, ACCESSOR, [Expression::constant(1)]).unwrap_err();
    assert!(matches!(err, BuildError::Invalid(ValidationError::Shape(_))), "got: {:?}", err);
    assert_eq!(
        err.to_string(),
        "\"accessor\" must have a string constant as its first child."
    );
}

#[test]
fn test_element_arity() {
    let r = reg();
    let a = Expression::accessor(&r, "a", None).unwrap();
    let err = Expression::make(&r, ELEMENT, [a]).unwrap_err();
    assert_eq!(err.to_string(), "\"element\" expects 2 operands, got 1.");
}

#[test]
fn test_builders_fail_fast() {
    let r = reg();
    assert!(Expression::and(&r, []).is_err());
    assert!(Expression::or(&r, []).is_err());
    assert!(Expression::make(&r, "!", [Expression::constant(true), Expression::constant(false)]).is_err());
    assert!(matches!(
        Expression::make(&r, "nope", []),
        Err(BuildError::UnknownType(name)) if name == "nope"
    ));
}

#[test]
fn test_child_type_mismatch() {
    let r = reg();
    let err = Expression::make(&r, "+", [Expression::constant(1), Expression::constant("two")]).unwrap_err();
    assert_eq!(
        err,
        BuildError::Invalid(ValidationError::ChildType {
            expr: "+".to_string(),
            child: "'two'".to_string(),
            expected: "number",
            actual: "string",
        })
    );
    assert_eq!(
        err.to_string(),
        "\"+\" expected a number result from 'two', got string."
    );
}

#[test]
fn test_object_children_pass_type_check() {
    let r = reg();
    let a = Expression::accessor(&r, "a", None).unwrap();
    assert!(Expression::make(&r, "-", [a, Expression::constant(1)]).is_ok());
    let upper = Expression::make(&r, "toUpper", [Expression::constant("x")]).unwrap();
    assert!(Expression::make(&r, "length", [upper]).is_ok());
}

#[test]
fn test_validate_tree_finds_nested_error() {
    let r = reg();
    let bad = Expression::new(&r, "!", vec![]).unwrap();
    let root = Expression::new(&r, "&&", vec![Expression::constant(true), bad]).unwrap();
    assert!(root.validate().is_ok());
    let err = root.validate_tree().unwrap_err();
    assert_eq!(err.to_string(), "\"!\" expects 1 operands, got 0.");
}

#[test]
fn test_validate_tree_stops_at_first_error_in_pre_order() {
    let r = reg();
    let first = Expression::new(&r, ELEMENT, vec![]).unwrap();
    let second = Expression::new(&r, "!", vec![]).unwrap();
    let root = Expression::new(&r, "||", vec![first, second]).unwrap();
    let err = root.validate_tree().unwrap_err();
    assert!(err.to_string().starts_with("\"element\""), "got: {}", err);
}

#[test]
fn test_unvalidated_tree_still_returns_a_pair() {
    let r = reg();
    let expr = Expression::new(&r, ACCESSOR, vec![]).unwrap();
    let (value, error) = expr.try_evaluate(&json!({"a": 1}));
    assert_eq!(value, json!(null));
    assert_eq!(error.as_deref(), Some("\"accessor\" is missing operand 0"));

    let expr = Expression::new(&r, "+", vec![]).unwrap();
    assert!(expr.try_evaluate(&json!(null)).1.is_some());
}

#[test]
fn test_return_types() {
    let r = reg();
    assert_eq!(Expression::constant(true).return_type(), ReturnType::Boolean);
    assert_eq!(Expression::constant(1).return_type(), ReturnType::Number);
    assert_eq!(Expression::constant("s").return_type(), ReturnType::String);
    assert_eq!(Expression::constant(json!([1])).return_type(), ReturnType::Object);
    assert_eq!(Expression::accessor(&r, "a", None).unwrap().return_type(), ReturnType::Object);
    assert_eq!(
        Expression::not(&r, Expression::constant(1)).unwrap().return_type(),
        ReturnType::Boolean
    );
}

#[test]
fn test_constant_built_by_name_has_no_literal() {
    let mut r = reg();
    r.register(
        "constant",
        expression_tree::Expression::constant(0).evaluator().clone(),
    );
    let err = Expression::make(&r, "constant", []).unwrap_err();
    assert_eq!(err.to_string(), "\"constant\" node carries no literal.");
}

#[test]
fn test_structural_equality() {
    let r = reg();
    let a = Expression::accessor(&r, "a", None).unwrap();
    let b = Expression::accessor(&r, "a", None).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Expression::accessor(&r, "b", None).unwrap());
    assert_ne!(Expression::constant(1), Expression::constant("1"));
}
