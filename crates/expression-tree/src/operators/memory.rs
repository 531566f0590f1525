//! Literals and state access: `constant`, `accessor`, `element`.

use crate::error::{EvalError, ValidationError};
use crate::eval_ctx::EvalCtx;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::state::{resolve_property, State};
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

pub const CONSTANT: &str = "constant";
pub const ACCESSOR: &str = "accessor";
pub const ELEMENT: &str = "element";

/// The property name held by an accessor's first child.
pub fn property_name(expr: &Expression) -> Option<&str> {
    expr.literal().and_then(Value::as_str)
}

/// Whether `name` can be written bare in a dotted path: a letter or `_`,
/// then letters, digits or `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// The accessor's property name when it can be rendered in path form.
pub fn path_name(expr: &Expression) -> Option<&str> {
    property_name(expr).filter(|name| is_identifier(name))
}

fn constant_eval(expr: &Expression, _ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    expr.literal()
        .cloned()
        .ok_or_else(|| EvalError::Other(format!("\"{}\" node carries no literal", expr.expr_type())))
}

fn validate_constant(expr: &Expression) -> Result<(), ValidationError> {
    if expr.is_constant() {
        Ok(())
    } else {
        Err(ValidationError::Shape(format!(
            "\"{}\" node carries no literal.",
            expr.expr_type()
        )))
    }
}

/// The shared constant descriptor for literals of `return_type`.
pub(crate) fn constant_evaluator(return_type: ReturnType) -> Arc<ExpressionEvaluator> {
    static EVALUATORS: OnceLock<[Arc<ExpressionEvaluator>; 4]> = OnceLock::new();
    let all = EVALUATORS.get_or_init(|| {
        [
            ReturnType::Boolean,
            ReturnType::Number,
            ReturnType::String,
            ReturnType::Object,
        ]
        .map(|rt| {
            Arc::new(
                ExpressionEvaluator::new(CONSTANT, rt, Arity::Fixed(0), constant_eval)
                    .with_validate(validate_constant),
            )
        })
    });
    let slot = match return_type {
        ReturnType::Boolean => 0,
        ReturnType::Number => 1,
        ReturnType::String => 2,
        ReturnType::Object => 3,
    };
    Arc::clone(&all[slot])
}

fn validate_accessor(expr: &Expression) -> Result<(), ValidationError> {
    match expr.children().first() {
        Some(name) if property_name(name).is_some() => Ok(()),
        _ => Err(ValidationError::Shape(format!(
            "\"{}\" must have a string constant as its first child.",
            expr.expr_type()
        ))),
    }
}

/// Missing values are substituted when the options say so, otherwise an error.
fn missing(expr: &Expression, ctx: &EvalCtx<'_>, err: EvalError) -> Result<Value, EvalError> {
    match ctx.substitute(&expr.to_string()) {
        Some(value) => Ok(value),
        None => Err(err),
    }
}

fn accessor_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let name_expr = expr.child(0)?;
    let name = property_name(name_expr)
        .ok_or_else(|| EvalError::InvalidIndex(name_expr.to_string()))?;
    let found = match expr.children().get(1) {
        Some(instance) => {
            let instance = instance.evaluate_in(ctx)?;
            resolve_property(&instance, name)
        }
        None => resolve_property(ctx.state, name),
    };
    match found {
        Some(value) => Ok(value),
        None => missing(expr, ctx, EvalError::PropertyNotFound(expr.to_string())),
    }
}

fn element_eval(expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
    let collection = expr.child(0)?.evaluate_in(ctx)?;
    let index = expr.child(1)?.evaluate_in(ctx)?;
    match &index {
        Value::String(key) => match resolve_property(&collection as &dyn State, key) {
            Some(value) => Ok(value),
            None => missing(expr, ctx, EvalError::PropertyNotFound(expr.to_string())),
        },
        Value::Number(_) => {
            let items = match &collection {
                Value::Array(items) => items,
                other => return Err(EvalError::NotCollection(other.to_string())),
            };
            let item = util::index(&index).and_then(|i| items.get(i));
            match item {
                Some(value) => Ok(value.clone()),
                None => missing(
                    expr,
                    ctx,
                    EvalError::OutOfRange {
                        index: index.to_string(),
                        collection: collection.to_string(),
                    },
                ),
            }
        }
        other => Err(EvalError::InvalidIndex(other.to_string())),
    }
}

pub fn operators() -> Vec<Arc<ExpressionEvaluator>> {
    vec![
        Arc::new(
            ExpressionEvaluator::new(ACCESSOR, ReturnType::Object, Arity::Range(1, Some(2)), accessor_eval)
                .with_validate(validate_accessor),
        ),
        Arc::new(ExpressionEvaluator::new(ELEMENT, ReturnType::Object, Arity::Fixed(2), element_eval)),
    ]
}
