use thiserror::Error;

/// Raised while building a node: the tree cannot be produced at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Unknown expression type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Structural problems found by a descriptor's validate step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0}")]
    Arity(String),

    #[error("\"{expr}\" expected a {expected} result from {child}, got {actual}.")]
    ChildType {
        expr: String,
        child: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{0}")]
    Shape(String),
}

/// Faults raised while evaluating a tree against a state.
///
/// These never escape [`Expression::try_evaluate`](crate::Expression::try_evaluate);
/// they are flattened into the error half of the result pair.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("property '{0}' not found")]
    PropertyNotFound(String),

    #[error("{index} is out of range for {collection}")]
    OutOfRange { index: String, collection: String },

    #[error("{0} is not a collection")]
    NotCollection(String),

    #[error("{0} could not be coerced to an integer or a string")]
    InvalidIndex(String),

    #[error("{0} is not a number")]
    NotNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("\"{expr}\" is missing operand {index}")]
    MissingOperand { expr: String, index: usize },

    #[error("{0}")]
    Lambda(String),

    #[error("{0}")]
    Other(String),
}
