//! Typed expression trees: build, validate, evaluate and render.
//!
//! # Overview
//!
//! An [`Expression`] is a node with a type name, a bound
//! [`ExpressionEvaluator`] and ordered children. Evaluators are looked up by
//! type name in a [`FunctionRegistry`] when a node is built. Trees are
//! validated without being executed, evaluated against any [`State`], and
//! rendered back to text through `Display`.
//!
//! # Example
//!
//! ```
//! use expression_tree::{Expression, FunctionRegistry};
//! use serde_json::json;
//!
//! let registry = FunctionRegistry::builtin();
//! let a = Expression::accessor(&registry, "a", None).unwrap();
//! let b = Expression::accessor(&registry, "b", Some(a)).unwrap();
//! let sum = Expression::make(&registry, "+", [b, Expression::constant(1)]).unwrap();
//!
//! assert_eq!(sum.to_string(), "a.b + 1");
//! assert_eq!(sum.try_evaluate(&json!({"a": {"b": 5}})), (json!(6), None));
//! ```

pub mod builders;
pub mod error;
pub mod eval_ctx;
pub mod evaluator;
pub mod expression;
pub mod operators;
pub mod registry;
pub mod render;
pub mod state;
pub mod types;
pub mod util;

pub use builders::LAMBDA;
pub use error::{BuildError, EvalError, ValidationError};
pub use eval_ctx::{EvalCtx, EvalOptions, NullSubstitution};
pub use evaluator::{ClosureFn, EvalFn, Evaluate, ExpressionEvaluator, ValidateFn};
pub use expression::Expression;
pub use operators::memory::{ACCESSOR, CONSTANT, ELEMENT};
pub use registry::FunctionRegistry;
pub use state::{resolve_property, State, Structured};
pub use types::{Arity, ReturnType};
