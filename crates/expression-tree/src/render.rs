//! Canonical text form of an expression tree.
//!
//! - `accessor(name)` renders as `name`, `accessor(name, inst)` as `inst.name`,
//!   provided `name` is an identifier. Other names keep the call form,
//!   `accessor('a.b', inst)`, so they cannot be mistaken for a nested path.
//! - `element(coll, idx)` renders as `coll[idx]`.
//! - A type that does not start with a letter and has two or more children
//!   renders infix, repeating the operator between every pair: `a + b + c`.
//!   An infix operand that is itself infix is parenthesized.
//! - Everything else renders as a call: `type(a, b)`.
//! - Strings are single-quoted with `\` and `'` escaped.

use crate::expression::Expression;
use crate::operators::memory::{path_name, ACCESSOR, ELEMENT};
use serde_json::Value;
use std::fmt::{self, Write};

impl Expression {
    /// Whether this node renders in infix form.
    pub fn is_infix(&self) -> bool {
        !self.is_constant()
            && self.children().len() >= 2
            && self
                .expr_type()
                .chars()
                .next()
                .is_some_and(|c| !c.is_alphabetic())
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression) -> fmt::Result {
    if operand.is_infix() {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => {
            f.write_char('\'')?;
            for c in s.chars() {
                match c {
                    '\\' => f.write_str("\\\\")?,
                    '\'' => f.write_str("\\'")?,
                    c => f.write_char(c)?,
                }
            }
            f.write_char('\'')
        }
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(literal) = self.literal() {
            return write_literal(f, literal);
        }
        let expr_type = self.expr_type();
        match (expr_type, self.children()) {
            (ACCESSOR, [name]) => {
                if let Some(name) = path_name(name) {
                    return f.write_str(name);
                }
            }
            (ACCESSOR, [name, instance]) => {
                if let Some(name) = path_name(name) {
                    write_operand(f, instance)?;
                    return write!(f, ".{}", name);
                }
            }
            (ELEMENT, [collection, index]) => {
                write_operand(f, collection)?;
                return write!(f, "[{}]", index);
            }
            _ => {}
        }

        if self.is_infix() {
            for (i, child) in self.children().iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", expr_type)?;
                }
                write_operand(f, child)?;
            }
            return Ok(());
        }

        f.write_str(expr_type)?;
        f.write_char('(')?;
        for (i, child) in self.children().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_char(')')
    }
}
