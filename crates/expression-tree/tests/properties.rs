//! Property-based tests over randomly built (and often malformed) trees.

use expression_tree::{Expression, FunctionRegistry};
use proptest::prelude::*;
use serde_json::Value;
use std::sync::OnceLock;

fn registry() -> &'static FunctionRegistry {
    static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FunctionRegistry::builtin)
}

const TYPES: &[&str] = &[
    "accessor", "element", "&&", "||", "!", "+", "-", "*", "/", "%", "min", "max", "==", "!=",
    "<", "<=", ">", ">=", "if", "exists", "concat", "length", "toLower", "toUpper", "count",
];

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-100i64..100).prop_map(Value::from),
        (-100.0f64..100.0).prop_map(Value::from),
        "[a-c]{0,2}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Trees built without validation: arities and shapes are arbitrary.
fn arb_expr() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        arb_json().prop_map(|v| Expression::constant(v)),
        "[a-c]".prop_map(|name| Expression::accessor(registry(), name, None).unwrap()),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        (prop::sample::select(TYPES), prop::collection::vec(inner, 0..4))
            .prop_map(|(expr_type, children)| Expression::new(registry(), expr_type, children).unwrap())
    })
}

proptest! {
    #[test]
    fn evaluate_never_panics(expr in arb_expr(), state in arb_json()) {
        let _ = expr.evaluate(&state);
    }

    #[test]
    fn failed_evaluation_yields_null(expr in arb_expr(), state in arb_json()) {
        let (value, error) = expr.try_evaluate(&state);
        if error.is_some() {
            prop_assert_eq!(value, Value::Null);
        }
    }

    #[test]
    fn validation_never_panics(expr in arb_expr()) {
        let _ = expr.validate_tree();
    }

    #[test]
    fn rendering_is_deterministic(expr in arb_expr()) {
        prop_assert_eq!(expr.to_string(), expr.clone().to_string());
    }

    #[test]
    fn evaluation_is_pure(expr in arb_expr(), state in arb_json()) {
        let snapshot = state.clone();
        let first = expr.try_evaluate(&state);
        let second = expr.try_evaluate(&state);
        prop_assert_eq!(first, second);
        prop_assert_eq!(state, snapshot);
    }
}
