//! Expression emission
//!
//! Expressions are rendered to standalone strings and spliced into the
//! statement line by the caller, so they never touch indentation. The walk uses
//! an explicit stack: flat operator chains nest as deep as they are long.

use super::emitter::PyEmitter;
use crate::parser::ast::{BinOp, Expr, LiteralValue};
use std::fmt::Write;

enum Step<'a> {
    Visit(&'a Expr),
    Operator(BinOp),
    Close,
}

impl PyEmitter {
    pub(crate) fn emit_expression(&self, expr: &Expr) -> String {
        let mut text = String::new();
        let mut steps = vec![Step::Visit(expr)];

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Expr::Binary { op, left, right }) => {
                    text.push('(');
                    steps.push(Step::Close);
                    steps.push(Step::Visit(right));
                    steps.push(Step::Operator(*op));
                    steps.push(Step::Visit(left));
                }
                Step::Visit(Expr::Literal(value)) => text.push_str(&emit_literal(value)),
                Step::Visit(Expr::Identifier(name)) => text.push_str(name),
                // Writing to a `String` cannot fail.
                Step::Operator(op) => {
                    let _ = write!(text, " {} ", op);
                }
                Step::Close => text.push(')'),
            }
        }

        text
    }
}

/// Strings are re-quoted verbatim; an embedded `"` is not escaped.
fn emit_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Integer(digits) => digits.clone(),
        // Debug keeps the fractional part (`1.0`), so Python still sees a float.
        LiteralValue::Float(x) => format!("{:?}", x),
        LiteralValue::String(s) => format!("\"{}\"", s),
    }
}
