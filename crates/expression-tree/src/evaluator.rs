//! Evaluator descriptors: the behavior bundle bound to an expression type.

use crate::error::{EvalError, ValidationError};
use crate::eval_ctx::EvalCtx;
use crate::expression::Expression;
use crate::types::{Arity, ReturnType};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A native evaluation function.
///
/// `expr` is the node being evaluated; its operands are `expr.children()`.
pub type EvalFn = for<'a> fn(&Expression, &EvalCtx<'a>) -> Result<Value, EvalError>;

/// An evaluation function that captures host data.
pub type ClosureFn = dyn for<'a> Fn(&Expression, &EvalCtx<'a>) -> Result<Value, EvalError> + Send + Sync;

/// Extra shape checks run after arity and child-type checks.
pub type ValidateFn = fn(&Expression) -> Result<(), ValidationError>;

/// How a descriptor computes its value.
#[derive(Clone)]
pub enum Evaluate {
    Native(EvalFn),
    Closure(Arc<ClosureFn>),
}

impl Evaluate {
    pub fn call(&self, expr: &Expression, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
        match self {
            Evaluate::Native(f) => f(expr, ctx),
            Evaluate::Closure(f) => f(expr, ctx),
        }
    }
}

/// The behavior bound to one expression type.
#[derive(Clone)]
pub struct ExpressionEvaluator {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub return_type: ReturnType,
    pub arity: Arity,
    /// When set, every child must declare a compatible return type.
    pub child_type: Option<ReturnType>,
    pub validate: Option<ValidateFn>,
    pub evaluate: Evaluate,
    /// The result depends on something besides the tree and the state.
    pub impure: bool,
}

impl ExpressionEvaluator {
    /// A descriptor with no child-type constraint, no extra validation and no side effects.
    pub fn new(name: &'static str, return_type: ReturnType, arity: Arity, evaluate: EvalFn) -> Self {
        ExpressionEvaluator {
            name,
            aliases: &[],
            return_type,
            arity,
            child_type: None,
            validate: None,
            evaluate: Evaluate::Native(evaluate),
            impure: false,
        }
    }

    /// A descriptor backed by a closure, for host functions that capture data.
    pub fn from_closure<F>(name: &'static str, return_type: ReturnType, arity: Arity, evaluate: F) -> Self
    where
        F: for<'a> Fn(&Expression, &EvalCtx<'a>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        ExpressionEvaluator {
            name,
            aliases: &[],
            return_type,
            arity,
            child_type: None,
            validate: None,
            evaluate: Evaluate::Closure(Arc::new(evaluate)),
            impure: false,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_child_type(mut self, child_type: ReturnType) -> Self {
        self.child_type = Some(child_type);
        self
    }

    pub fn with_validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn impure(mut self) -> Self {
        self.impure = true;
        self
    }
}

impl fmt::Debug for ExpressionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionEvaluator")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("return_type", &self.return_type)
            .field("arity", &self.arity)
            .field("child_type", &self.child_type)
            .field("impure", &self.impure)
            .finish_non_exhaustive()
    }
}
