// AST (Abstract Syntax Tree) definitions for the minipy translator

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Source (and Python) spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Kind tag of a literal, always consistent with the literal's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    String,
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Decimal digits without leading zeros (`"0"` for zero). Unbounded, like
    /// Python's `int`.
    Integer(String),
    Float(f64),
    String(String),
}

impl LiteralValue {
    /// The data type tag matching this value's kind.
    pub fn data_type(&self) -> DataType {
        match self {
            LiteralValue::Integer(_) => DataType::Integer,
            LiteralValue::Float(_) => DataType::Float,
            LiteralValue::String(_) => DataType::String,
        }
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `left op right`
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Literal(LiteralValue),
    Identifier(String),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

// A long `a + a + ...` chain is a left-deep spine of boxes; the derived drop
// would recurse once per operator. Detach children onto a heap stack instead.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(self, &mut pending);

        while let Some(mut expr) = pending.pop() {
            take_children(&mut expr, &mut pending);
        }
    }
}

fn take_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    if let Expr::Binary { left, right, .. } = expr {
        let leaf = || Expr::Identifier(String::new());
        pending.push(std::mem::replace(left.as_mut(), leaf()));
        pending.push(std::mem::replace(right.as_mut(), leaf()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_spine_drops_without_recursion() {
        let mut expr = Expr::Identifier("a".to_string());
        for _ in 0..300_000 {
            let right = Expr::Literal(LiteralValue::Integer("1".to_string()));
            expr = Expr::binary(BinOp::Add, expr, right);
        }
        drop(expr);
    }

    #[test]
    fn test_binop_display_matches_symbol() {
        assert_eq!(BinOp::Div.to_string(), "/");
        assert_eq!(format!("{} {}", BinOp::Add, BinOp::Mul), "+ *");
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `print(expression);`
    Print { expression: Expr },
    /// `name = value;`
    Assignment { name: String, value: Expr },
    /// `{ statements }`
    Block { body: Vec<Stmt> },
}

/// Root of the AST, one per compilation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }
}
