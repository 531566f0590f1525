//! Branching and presence checks.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

/// `if(cond, then, else)`: only the chosen branch is evaluated.
fn if_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let condition = expr.child(0)?.evaluate_in(ctx)?;
    if util::is_truthy(&condition) {
        expr.child(1)?.evaluate_in(ctx)
    } else {
        expr.child(2)?.evaluate_in(ctx)
    }
}

/// `exists(x)`: true when `x` evaluates to a non-null value.
///
/// A failing operand counts as absent, so this is the one built-in that
/// swallows a child's evaluation error instead of forwarding it.
fn exists_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let present = match expr.child(0)?.evaluate_in(ctx) {
        Ok(value) => !value.is_null(),
        Err(_) => false,
    };
    Ok(Value::Bool(present))
}

pub fn operators() -> Vec<Arc<ExpressionEvaluator>> {
    vec![
        Arc::new(ExpressionEvaluator::new("if", ReturnType::Object, Arity::Fixed(3), if_eval)),
        Arc::new(ExpressionEvaluator::new("exists", ReturnType::Boolean, Arity::Fixed(1), exists_eval)),
    ]
}
