//! The function registry: expression type name -> evaluator descriptor.
//!
//! A registry is an ordinary value rather than process-wide state. Build it
//! once during start-up (registering any host extensions), wrap it in an
//! `Arc`, and hand a reference to every tree-building call. Registration
//! needs `&mut self`, so a registry that is shared between threads can no
//! longer change; lookups are then safe for any number of concurrent readers.

use crate::error::BuildError;
use crate::evaluator::ExpressionEvaluator;
use crate::operators;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    evaluators: HashMap<String, Arc<ExpressionEvaluator>>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in operator and function.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for evaluator in operators::all_operators() {
            registry.register_all(evaluator);
        }
        registry
    }

    /// Looks up a descriptor by exact, case-sensitive type name.
    pub fn lookup(&self, expr_type: &str) -> Result<Arc<ExpressionEvaluator>, BuildError> {
        self.evaluators.get(expr_type).cloned().ok_or_else(|| {
            tracing::debug!(expr_type, "unknown expression type");
            BuildError::UnknownType(expr_type.to_string())
        })
    }

    pub fn contains(&self, expr_type: &str) -> bool {
        self.evaluators.contains_key(expr_type)
    }

    /// Binds `expr_type` to `evaluator`, replacing any previous binding.
    pub fn register(&mut self, expr_type: impl Into<String>, evaluator: Arc<ExpressionEvaluator>) {
        let expr_type = expr_type.into();
        match self.evaluators.insert(expr_type.clone(), evaluator) {
            Some(_) => tracing::debug!(%expr_type, "expression type re-registered"),
            None => tracing::trace!(%expr_type, "expression type registered"),
        }
    }

    /// Registers a descriptor under its own name and all its aliases.
    pub fn register_all(&mut self, evaluator: Arc<ExpressionEvaluator>) {
        self.register(evaluator.name, Arc::clone(&evaluator));
        for alias in evaluator.aliases {
            self.register(*alias, Arc::clone(&evaluator));
        }
    }

    /// Builder form of [`register`](FunctionRegistry::register).
    pub fn with(mut self, expr_type: impl Into<String>, evaluator: ExpressionEvaluator) -> Self {
        self.register(expr_type, Arc::new(evaluator));
        self
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.evaluators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Arity, ReturnType};
    use serde_json::{json, Value};

    fn answer(_: &crate::Expression, _: &crate::EvalCtx<'_>) -> Result<Value, crate::EvalError> {
        Ok(json!(42))
    }

    #[test]
    fn test_builtin_has_aliases() {
        let registry = FunctionRegistry::builtin();
        assert!(registry.contains("&&"));
        assert!(registry.contains("and"));
        assert!(registry.contains("accessor"));
        assert!(registry.contains("element"));
        assert!(!registry.contains("AND"));
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.lookup("nope").unwrap_err(),
            BuildError::UnknownType("nope".to_string())
        );
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = FunctionRegistry::builtin();
        let before = registry.len();
        registry.register(
            "+",
            Arc::new(ExpressionEvaluator::new("+", ReturnType::Number, Arity::Any, answer)),
        );
        assert_eq!(registry.len(), before);
        assert_eq!(registry.lookup("+").unwrap().arity, Arity::Any);
    }

    #[test]
    fn test_names_sorted() {
        let registry = FunctionRegistry::new()
            .with("b", ExpressionEvaluator::new("b", ReturnType::Number, Arity::Any, answer))
            .with("a", ExpressionEvaluator::new("a", ReturnType::Number, Arity::Any, answer));
        assert_eq!(registry.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FunctionRegistry>();
        assert_send_sync::<crate::Expression>();
    }
}
