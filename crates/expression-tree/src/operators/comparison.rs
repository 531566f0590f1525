//! Comparison operators.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

fn operands(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<(Value, Value), EvalError> {
    let a = expr.child(0)?.evaluate_in(ctx)?;
    let b = expr.child(1)?.evaluate_in(ctx)?;
    Ok((a, b))
}

/// Numbers compare numerically and strings lexically; anything else is an error.
fn order(a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => {
            let (x, y) = (util::num(a)?, util::num(b)?);
            x.partial_cmp(&y)
                .ok_or_else(|| EvalError::NotNumber(format!("{} or {}", a, b)))
        }
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Err(EvalError::Other(format!(
            "cannot compare {} with {}",
            util::type_name(a),
            util::type_name(b)
        ))),
    }
}

fn eq_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let (a, b) = operands(expr, ctx)?;
    Ok(Value::Bool(util::loose_eq(&a, &b)))
}

fn ne_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let (a, b) = operands(expr, ctx)?;
    Ok(Value::Bool(!util::loose_eq(&a, &b)))
}

fn lt_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let (a, b) = operands(expr, ctx)?;
    Ok(Value::Bool(order(&a, &b)? == Ordering::Less))
}

fn lte_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let (a, b) = operands(expr, ctx)?;
    Ok(Value::Bool(order(&a, &b)? != Ordering::Greater))
}

fn gt_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let (a, b) = operands(expr, ctx)?;
    Ok(Value::Bool(order(&a, &b)? == Ordering::Greater))
}

fn gte_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let (a, b) = operands(expr, ctx)?;
    Ok(Value::Bool(order(&a, &b)? != Ordering::Less))
}

pub fn operators() -> Vec<Arc<ExpressionEvaluator>> {
    vec![
        Arc::new(ExpressionEvaluator::new("==", ReturnType::Boolean, Arity::Fixed(2), eq_eval)),
        Arc::new(ExpressionEvaluator::new("!=", ReturnType::Boolean, Arity::Fixed(2), ne_eval)),
        Arc::new(ExpressionEvaluator::new("<", ReturnType::Boolean, Arity::Fixed(2), lt_eval)),
        Arc::new(ExpressionEvaluator::new("<=", ReturnType::Boolean, Arity::Fixed(2), lte_eval)),
        Arc::new(ExpressionEvaluator::new(">", ReturnType::Boolean, Arity::Fixed(2), gt_eval)),
        Arc::new(ExpressionEvaluator::new(">=", ReturnType::Boolean, Arity::Fixed(2), gte_eval)),
    ]
}
