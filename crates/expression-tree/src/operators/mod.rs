//! The built-in operator and function library.

pub mod arithmetic;
pub mod branching;
pub mod comparison;
pub mod logical;
pub mod memory;
pub mod string;

use crate::evaluator::ExpressionEvaluator;
use std::sync::Arc;

/// Every built-in descriptor. Constants and lambdas carry their own
/// descriptors and are not registered by name.
pub fn all_operators() -> Vec<Arc<ExpressionEvaluator>> {
    let mut ops = Vec::new();
    ops.extend(memory::operators());
    ops.extend(logical::operators());
    ops.extend(arithmetic::operators());
    ops.extend(comparison::operators());
    ops.extend(branching::operators());
    ops.extend(string::operators());
    ops
}
