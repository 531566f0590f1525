//! Arithmetic operators. Operands must evaluate to numbers.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

/// Evaluates the first operand, then folds the rest into it left to right.
fn fold(
    expr: &Expression,
    ctx: &EvalCtx<'_>,
    step: fn(f64, f64) -> Result<f64, EvalError>,
) -> Result<Value, EvalError> {
    let first = util::num(&expr.child(0)?.evaluate_in(ctx)?)?;
    expr.children()[1..]
        .iter()
        .try_fold(first, |acc, e| step(acc, util::num(&e.evaluate_in(ctx)?)?))
        .and_then(util::number)
}

fn add_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| Ok(a + b))
}

fn subtract_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| Ok(a - b))
}

fn multiply_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| Ok(a * b))
}

fn divide_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| {
        if b == 0.0 {
            Err(EvalError::DivisionByZero)
        } else {
            Ok(a / b)
        }
    })
}

fn mod_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| {
        if b == 0.0 {
            Err(EvalError::DivisionByZero)
        } else {
            Ok(a % b)
        }
    })
}

fn min_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| Ok(a.min(b)))
}

fn max_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    fold(expr, ctx, |a, b| Ok(a.max(b)))
}

fn numeric(name: &'static str, arity: Arity, eval_fn: crate::evaluator::EvalFn) -> Arc<ExpressionEvaluator> {
    Arc::new(ExpressionEvaluator::new(name, ReturnType::Number, arity, eval_fn).with_child_type(ReturnType::Number))
}

pub fn operators() -> Vec<Arc<ExpressionEvaluator>> {
    vec![
        numeric("+", Arity::Variadic, add_eval),
        numeric("-", Arity::Variadic, subtract_eval),
        numeric("*", Arity::Variadic, multiply_eval),
        numeric("/", Arity::Variadic, divide_eval),
        numeric("%", Arity::Fixed(2), mod_eval),
        numeric("min", Arity::Range(1, None), min_eval),
        numeric("max", Arity::Range(1, None), max_eval),
    ]
}
