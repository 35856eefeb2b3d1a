//! Expression parsing implementation
//!
//! Binary operators are parsed with precedence climbing, one method per level:
//!
//! ```text
//! expression ::= term (('+' | '-') term)*
//! term       ::= factor (('*' | '/') factor)*
//! factor     ::= INTEGER | FLOAT | STRING | IDENTIFIER | '(' expression ')'
//! ```
//!
//! Each level folds to the left, so both levels are left-associative and `*`/`/`
//! bind tighter than `+`/`-`.

use crate::parser::ast::*;
use crate::parser::lexer::{Operator, Token, TokenKind};
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_additive()
    }

    /// Parse additive (+, -)
    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.match_operator(&[Operator::Plus, Operator::Minus]) {
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (*, /)
    fn parse_term(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.match_operator(&[Operator::Star, Operator::Slash]) {
            let right = self.parse_factor()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, SyntaxError> {
        let expr = match self.peek() {
            Token::IntLiteral(n, _) => Expr::Literal(LiteralValue::Integer(n.clone())),
            Token::FloatLiteral(x, _) => Expr::Literal(LiteralValue::Float(*x)),
            Token::StringLiteral(s, _) => Expr::Literal(LiteralValue::String(s.clone())),
            Token::Ident(name, _) => Expr::Identifier(name.clone()),
            Token::LParen(_) => {
                self.open_nested(TokenKind::LParen)?;
                let inner = self.parse_expression()?;
                self.close_nested(TokenKind::RParen)?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected()),
        };

        self.advance();
        Ok(expr)
    }

    /// Consume the current token if it is one of `ops`, returning the
    /// corresponding binary operator.
    fn match_operator(&mut self, ops: &[Operator]) -> Option<BinOp> {
        let op = match self.peek() {
            Token::Operator(op, _) if ops.contains(op) => *op,
            _ => return None,
        };

        let bin_op = match op {
            Operator::Plus => BinOp::Add,
            Operator::Minus => BinOp::Sub,
            Operator::Star => BinOp::Mul,
            Operator::Slash => BinOp::Div,
            Operator::EqEq => return None,
        };
        self.advance();
        Some(bin_op)
    }
}
