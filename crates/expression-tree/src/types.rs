use crate::error::ValidationError;
use serde_json::Value;
use std::fmt;

/// The value category an expression type declares it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Boolean,
    Number,
    String,
    /// Anything, including values whose category is only known at runtime.
    Object,
}

impl ReturnType {
    /// The category a literal value belongs to.
    pub fn of(value: &Value) -> ReturnType {
        match value {
            Value::Bool(_) => ReturnType::Boolean,
            Value::Number(_) => ReturnType::Number,
            Value::String(_) => ReturnType::String,
            Value::Null | Value::Array(_) | Value::Object(_) => ReturnType::Object,
        }
    }

    /// Whether a child declaring `actual` may feed a slot declaring `self`.
    ///
    /// `Object` is a wildcard on both sides since its concrete shape is only
    /// known once evaluated.
    pub fn accepts(self, actual: ReturnType) -> bool {
        self == actual || self == ReturnType::Object || actual == ReturnType::Object
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReturnType::Boolean => "boolean",
            ReturnType::Number => "number",
            ReturnType::String => "string",
            ReturnType::Object => "object",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Skip the arity check.
    Any,
    /// Exactly `n` children.
    Fixed(usize),
    /// At least two children.
    Variadic,
    /// Between `min` and `max` children. `None` for max = unlimited.
    Range(usize, Option<usize>),
}

/// Checks that an expression of type `expr_type` has an acceptable number of children.
pub fn assert_arity(expr_type: &str, arity: &Arity, child_count: usize) -> Result<(), ValidationError> {
    match arity {
        Arity::Any => Ok(()),
        Arity::Fixed(n) => {
            if child_count != *n {
                Err(ValidationError::Arity(format!(
                    "\"{}\" expects {} operands, got {}.",
                    expr_type, n, child_count
                )))
            } else {
                Ok(())
            }
        }
        Arity::Variadic => {
            if child_count < 2 {
                Err(ValidationError::Arity(format!(
                    "\"{}\" expects at least two operands.",
                    expr_type
                )))
            } else {
                Ok(())
            }
        }
        Arity::Range(min, max) => {
            if child_count < *min {
                Err(ValidationError::Arity(format!(
                    "\"{}\" expects at least {} operands.",
                    expr_type, min
                )))
            } else if let Some(max) = max {
                if child_count > *max {
                    return Err(ValidationError::Arity(format!(
                        "\"{}\" expects at most {} operands.",
                        expr_type, max
                    )));
                }
                Ok(())
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_return_type_of_literals() {
        assert_eq!(ReturnType::of(&json!(true)), ReturnType::Boolean);
        assert_eq!(ReturnType::of(&json!(1.5)), ReturnType::Number);
        assert_eq!(ReturnType::of(&json!("x")), ReturnType::String);
        assert_eq!(ReturnType::of(&json!(null)), ReturnType::Object);
        assert_eq!(ReturnType::of(&json!([1])), ReturnType::Object);
    }

    #[test]
    fn test_object_is_wildcard() {
        assert!(ReturnType::Number.accepts(ReturnType::Object));
        assert!(ReturnType::Object.accepts(ReturnType::String));
        assert!(!ReturnType::Number.accepts(ReturnType::String));
    }

    #[test]
    fn test_arity_messages() {
        assert!(assert_arity("!", &Arity::Fixed(1), 1).is_ok());
        let err = assert_arity("!", &Arity::Fixed(1), 2).unwrap_err();
        assert_eq!(err.to_string(), "\"!\" expects 1 operands, got 2.");
        let err = assert_arity("+", &Arity::Variadic, 1).unwrap_err();
        assert!(err.to_string().contains("at least two operands"));
        assert!(assert_arity("if", &Arity::Range(2, Some(3)), 4).is_err());
        assert!(assert_arity("concat", &Arity::Range(1, None), 9).is_ok());
        assert!(assert_arity("anything", &Arity::Any, 0).is_ok());
    }
}
