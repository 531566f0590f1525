//! Logical operators. `&&` and `||` evaluate left to right and stop at the
//! first operand that decides the result; later operands are never evaluated.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn and_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    for child in expr.children() {
        if !util::is_truthy(&child.evaluate_in(ctx)?) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn or_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    for child in expr.children() {
        if util::is_truthy(&child.evaluate_in(ctx)?) {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn not_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let val = expr.child(0)?.evaluate_in(ctx)?;
    Ok(Value::Bool(!util::is_truthy(&val)))
}

pub fn operators() -> Vec<Arc<ExpressionEvaluator>> {
    vec![
        Arc::new(
            ExpressionEvaluator::new("&&", ReturnType::Boolean, Arity::Range(1, None), and_eval)
                .with_aliases(&["and"]),
        ),
        Arc::new(
            ExpressionEvaluator::new("||", ReturnType::Boolean, Arity::Range(1, None), or_eval)
                .with_aliases(&["or"]),
        ),
        Arc::new(
            ExpressionEvaluator::new("!", ReturnType::Boolean, Arity::Fixed(1), not_eval)
                .with_aliases(&["not"]),
        ),
    ]
}
