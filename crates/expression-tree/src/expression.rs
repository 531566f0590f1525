//! The expression node: a type tag, its bound evaluator and ordered children.

use crate::error::{BuildError, EvalError, ValidationError};
use crate::eval_ctx::{EvalCtx, EvalOptions};
use crate::evaluator::ExpressionEvaluator;
use crate::operators::memory::{self, ACCESSOR, ELEMENT};
use crate::registry::FunctionRegistry;
use crate::state::State;
use crate::types::{assert_arity, ReturnType};
use crate::util;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A node of an expression tree.
///
/// Children are owned, so a tree is acyclic by construction. Nodes are
/// immutable apart from [`replace_children`](Expression::replace_children),
/// which makes a tree safe to evaluate from several threads at once.
#[derive(Clone)]
pub struct Expression {
    expr_type: String,
    evaluator: Arc<ExpressionEvaluator>,
    children: Vec<Expression>,
    /// Present on constants only.
    literal: Option<Value>,
}

impl Expression {
    /// Builds a node whose evaluator is looked up by `expr_type` in `registry`.
    ///
    /// The node is not validated; see [`validate_tree`](Expression::validate_tree)
    /// or the checked builders such as [`Expression::make`].
    pub fn new(
        registry: &FunctionRegistry,
        expr_type: impl Into<String>,
        children: Vec<Expression>,
    ) -> Result<Expression, BuildError> {
        let expr_type = expr_type.into();
        let evaluator = registry.lookup(&expr_type)?;
        Ok(Expression::with_evaluator(expr_type, evaluator, children))
    }

    /// Builds a node bound to an explicit evaluator, bypassing the registry.
    pub fn with_evaluator(
        expr_type: impl Into<String>,
        evaluator: Arc<ExpressionEvaluator>,
        children: Vec<Expression>,
    ) -> Expression {
        Expression {
            expr_type: expr_type.into(),
            evaluator,
            children,
            literal: None,
        }
    }

    /// Wraps a literal value as a leaf node.
    pub fn constant(value: impl Into<Value>) -> Expression {
        let value = value.into();
        Expression {
            expr_type: memory::CONSTANT.to_string(),
            evaluator: memory::constant_evaluator(ReturnType::of(&value)),
            children: Vec::new(),
            literal: Some(value),
        }
    }

    pub fn expr_type(&self) -> &str {
        &self.expr_type
    }

    pub fn evaluator(&self) -> &Arc<ExpressionEvaluator> {
        &self.evaluator
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    /// The literal held by a constant node.
    pub fn literal(&self) -> Option<&Value> {
        self.literal.as_ref()
    }

    pub fn is_constant(&self) -> bool {
        self.literal.is_some()
    }

    pub fn return_type(&self) -> ReturnType {
        self.evaluator.return_type
    }

    /// Replaces the whole child list, returning the previous one.
    pub fn replace_children(&mut self, children: Vec<Expression>) -> Vec<Expression> {
        std::mem::replace(&mut self.children, children)
    }

    /// Operand `index`, or an evaluation error when the node is malformed.
    pub fn child(&self, index: usize) -> Result<&Expression, EvalError> {
        self.children.get(index).ok_or_else(|| EvalError::MissingOperand {
            expr: self.expr_type.clone(),
            index,
        })
    }

    /// Validates this node only: arity, child return types, then any
    /// descriptor-specific shape check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ev = &self.evaluator;
        assert_arity(&self.expr_type, &ev.arity, self.children.len())?;
        if let Some(expected) = ev.child_type {
            for child in &self.children {
                let actual = child.return_type();
                if !expected.accepts(actual) {
                    return Err(ValidationError::ChildType {
                        expr: self.expr_type.clone(),
                        child: child.to_string(),
                        expected: expected.as_str(),
                        actual: actual.as_str(),
                    });
                }
            }
        }
        match ev.validate {
            Some(validate) => validate(self),
            None => Ok(()),
        }
    }

    /// Validates the whole tree in pre-order, stopping at the first error.
    pub fn validate_tree(&self) -> Result<(), ValidationError> {
        self.validate()?;
        for child in &self.children {
            child.validate_tree()?;
        }
        Ok(())
    }

    /// Evaluates against `state` with default options.
    pub fn evaluate(&self, state: &dyn State) -> Result<Value, EvalError> {
        self.evaluate_with(state, &EvalOptions::default())
    }

    pub fn evaluate_with(&self, state: &dyn State, options: &EvalOptions) -> Result<Value, EvalError> {
        self.evaluate_in(&EvalCtx::new(state, options))
    }

    /// Evaluates within an existing context. Evaluators use this for their operands.
    pub fn evaluate_in(&self, ctx: &EvalCtx<'_>) -> Result<Value, EvalError> {
        self.evaluator.evaluate.call(self, ctx)
    }

    /// Evaluates against `state`, returning the value and the error message, if any.
    ///
    /// On failure the value is `null`. A panic raised by host-supplied code
    /// is caught and reported as the error.
    pub fn try_evaluate(&self, state: &dyn State) -> (Value, Option<String>) {
        self.try_evaluate_with(state, &EvalOptions::default())
    }

    pub fn try_evaluate_with(&self, state: &dyn State, options: &EvalOptions) -> (Value, Option<String>) {
        let result = catch_unwind(AssertUnwindSafe(|| self.evaluate_with(state, options)))
            .unwrap_or_else(|payload| Err(EvalError::Other(util::panic_message(payload))));
        match result {
            Ok(value) => (value, None),
            Err(err) => {
                tracing::trace!(expr = %self, error = %err, "evaluation failed");
                (Value::Null, Some(err.to_string()))
            }
        }
    }

    /// The memory paths this tree reads, e.g. `user.name` or `items[0]`, sorted.
    pub fn references(&self) -> Vec<String> {
        let mut refs = BTreeSet::new();
        self.collect_references(&mut refs);
        refs.into_iter().collect()
    }

    fn collect_references(&self, refs: &mut BTreeSet<String>) {
        if let Some(path) = self.memory_path() {
            refs.insert(path);
            return;
        }
        for child in &self.children {
            child.collect_references(refs);
        }
    }

    /// The static path of an accessor/element chain, if the whole chain is static.
    fn memory_path(&self) -> Option<String> {
        match (self.expr_type.as_str(), self.children.as_slice()) {
            (ACCESSOR, [name]) => memory::path_name(name).map(str::to_string),
            (ACCESSOR, [name, instance]) => {
                let name = memory::path_name(name)?;
                Some(format!("{}.{}", instance.memory_path()?, name))
            }
            (ELEMENT, [collection, index]) if index.is_constant() => {
                Some(format!("{}[{}]", collection.memory_path()?, index))
            }
            _ => None,
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.expr_type == other.expr_type
            && self.literal == other.literal
            && self.children == other.children
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Expression");
        s.field("type", &self.expr_type);
        if let Some(literal) = &self.literal {
            s.field("literal", literal);
        }
        s.field("return_type", &self.return_type())
            .field("children", &self.children)
            .finish()
    }
}
