//! Checked constructors: each one builds a node and validates it immediately,
//! so malformed shapes fail at build time instead of at evaluation.

use crate::error::{BuildError, EvalError};
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::operators::memory::{ACCESSOR, ELEMENT};
use crate::registry::FunctionRegistry;
use crate::state::State;
use crate::types::{Arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub const LAMBDA: &str = "lambda";

impl Expression {
    /// Builds a node by registry lookup and validates it (non-recursively).
    pub fn make(
        registry: &FunctionRegistry,
        expr_type: impl Into<String>,
        children: impl IntoIterator<Item = Expression>,
    ) -> Result<Expression, BuildError> {
        let expr = Expression::new(registry, expr_type, children.into_iter().collect())?;
        expr.validate()?;
        Ok(expr)
    }

    /// `a && b && ...`
    pub fn and(
        registry: &FunctionRegistry,
        children: impl IntoIterator<Item = Expression>,
    ) -> Result<Expression, BuildError> {
        Expression::make(registry, "&&", children)
    }

    /// `a || b || ...`
    pub fn or(
        registry: &FunctionRegistry,
        children: impl IntoIterator<Item = Expression>,
    ) -> Result<Expression, BuildError> {
        Expression::make(registry, "||", children)
    }

    /// `!(a)`
    pub fn not(registry: &FunctionRegistry, child: Expression) -> Result<Expression, BuildError> {
        Expression::make(registry, "!", [child])
    }

    /// `property`, or `instance.property` when an instance is given.
    pub fn accessor(
        registry: &FunctionRegistry,
        property: impl Into<String>,
        instance: Option<Expression>,
    ) -> Result<Expression, BuildError> {
        let mut children = vec![Expression::constant(property.into())];
        children.extend(instance);
        Expression::make(registry, ACCESSOR, children)
    }

    /// `collection[index]`
    pub fn element(
        registry: &FunctionRegistry,
        collection: Expression,
        index: Expression,
    ) -> Result<Expression, BuildError> {
        Expression::make(registry, ELEMENT, [collection, index])
    }

    /// Wraps a host function of the state as a leaf node.
    ///
    /// Errors returned by `function` become the evaluation error; a panic
    /// inside `function` is caught and reported the same way.
    pub fn lambda<F, E>(function: F) -> Expression
    where
        F: Fn(&dyn State) -> Result<Value, E> + Send + Sync + 'static,
        E: Display,
    {
        let evaluator = ExpressionEvaluator::from_closure(
            LAMBDA,
            ReturnType::Object,
            Arity::Fixed(0),
            move |_expr, ctx| match catch_unwind(AssertUnwindSafe(|| function(ctx.state))) {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(EvalError::Lambda(err.to_string())),
                Err(payload) => {
                    let message = util::panic_message(payload);
                    tracing::debug!(%message, "lambda panicked");
                    Err(EvalError::Lambda(message))
                }
            },
        )
        .impure();
        Expression::with_evaluator(LAMBDA, Arc::new(evaluator), Vec::new())
    }
}
