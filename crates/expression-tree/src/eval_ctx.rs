use crate::state::State;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Supplies a value for a memory path that resolved to nothing.
pub type NullSubstitution = dyn Fn(&str) -> Value + Send + Sync;

/// Evaluation options shared by every node of one evaluation.
#[derive(Clone, Default)]
pub struct EvalOptions {
    /// When set, accessor and element lookups that find nothing call this
    /// with the rendered path instead of failing with "property not found".
    pub null_substitution: Option<Arc<NullSubstitution>>,
}

impl EvalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_substitution(mut self, substitute: Arc<NullSubstitution>) -> Self {
        self.null_substitution = Some(substitute);
        self
    }
}

impl fmt::Debug for EvalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalOptions")
            .field("null_substitution", &self.null_substitution.is_some())
            .finish()
    }
}

/// The execution context passed to every evaluator.
#[derive(Clone, Copy)]
pub struct EvalCtx<'a> {
    /// The caller's state. Read-only for every built-in evaluator.
    pub state: &'a dyn State,
    pub options: &'a EvalOptions,
}

impl<'a> EvalCtx<'a> {
    pub fn new(state: &'a dyn State, options: &'a EvalOptions) -> Self {
        EvalCtx { state, options }
    }

    pub(crate) fn substitute(&self, path: &str) -> Option<Value> {
        self.options.null_substitution.as_ref().map(|f| f(path))
    }
}
