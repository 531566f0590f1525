//! String and collection functions.

use crate::error::EvalError;
use crate::eval_ctx::EvalCtx;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn concat_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let mut out = String::new();
    for child in expr.children() {
        out.push_str(&util::str_val(&child.evaluate_in(ctx)?));
    }
    Ok(Value::String(out))
}

fn string_operand(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<String, EvalError> {
    match expr.child(0)?.evaluate_in(ctx)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Err(EvalError::Other(format!(
            "\"{}\" expects a string, got {}",
            expr.expr_type(),
            util::type_name(&other)
        ))),
    }
}

fn length_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let s = string_operand(expr, ctx)?;
    Ok(Value::from(s.chars().count()))
}

fn to_lower_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    Ok(Value::String(string_operand(expr, ctx)?.to_lowercase()))
}

fn to_upper_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    Ok(Value::String(string_operand(expr, ctx)?.to_uppercase()))
}

/// Number of items in an array, keys in an object, or characters in a string.
fn count_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let count = match expr.child(0)?.evaluate_in(ctx)? {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(EvalError::NotCollection(other.to_string())),
    };
    Ok(Value::from(count))
}

pub fn operators() -> Vec<Arc<ExpressionEvaluator>> {
    vec![
        Arc::new(ExpressionEvaluator::new("concat", ReturnType::String, Arity::Range(1, None), concat_eval)),
        Arc::new(
            ExpressionEvaluator::new("length", ReturnType::Number, Arity::Fixed(1), length_eval)
                .with_child_type(ReturnType::String),
        ),
        Arc::new(
            ExpressionEvaluator::new("toLower", ReturnType::String, Arity::Fixed(1), to_lower_eval)
                .with_child_type(ReturnType::String),
        ),
        Arc::new(
            ExpressionEvaluator::new("toUpper", ReturnType::String, Arity::Fixed(1), to_upper_eval)
                .with_child_type(ReturnType::String),
        ),
        Arc::new(ExpressionEvaluator::new("count", ReturnType::Number, Arity::Fixed(1), count_eval)),
    ]
}
