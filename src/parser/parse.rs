//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with one token of lookahead
//! and no backtracking:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (print, assignment, block)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Deepest combined nesting of `(` and `{` the parser accepts. Both recurse on
/// the call stack, so the limit keeps hostile input from overflowing it.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// The grammar required a specific token kind and found another.
    #[error("Expected {expected}, got {found}")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
    },
    /// No rule starts with this token.
    #[error("Unexpected token: {token}")]
    UnexpectedToken { token: Token },
    #[error("Nesting too deep: more than {limit} levels of parentheses and blocks")]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SyntaxError::Expected { location, .. }
            | SyntaxError::NestingTooDeep { location, .. } => *location,
            SyntaxError::UnexpectedToken { token } => token.location(),
        }
    }
}

/// Parse a token stream (as produced by [`tokenize`](crate::parser::lexer::tokenize))
/// into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for minipy
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Open `(` and `{` around the current token
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a parser over `tokens`. A missing trailing EOF is supplied so the
    /// lookahead never runs off the end.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens
                .last()
                .map(Token::location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program: `Statement* EOF`
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::Eof)?;

        debug!(statements = program.body.len(), "parsed program");
        Ok(program)
    }

    // ========== Helper methods ==========

    /// Peek at current token
    pub(crate) fn peek(&self) -> &Token {
        // `new` guarantees a trailing EOF and `advance` never moves past it.
        &self.tokens[self.position]
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind() == kind
    }

    /// Consume the current token and return it. EOF is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Consume a token of `kind`, or fail with "Expected <kind>, got <kind>".
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            Err(SyntaxError::Expected {
                expected: kind,
                found: found.kind(),
                location: found.location(),
            })
        }
    }

    /// Consume an opening `(` or `{`, failing once [`MAX_NESTING_DEPTH`] is
    /// exceeded. Pair with [`Parser::close_nested`].
    pub(crate) fn open_nested(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        let token = self.expect(kind)?;
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                location: token.location(),
            });
        }
        self.depth += 1;
        Ok(token)
    }

    /// Consume the closing `)` or `}` matching an [`open_nested`](Parser::open_nested).
    pub(crate) fn close_nested(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        let token = self.expect(kind)?;
        self.depth -= 1;
        Ok(token)
    }

    pub(crate) fn unexpected(&self) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            token: self.peek().clone(),
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Result<Program, SyntaxError> {
        parse(tokenize(source).unwrap())
    }

    #[test]
    fn test_empty_program() {
        let program = parse_source("").unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_statements_in_order() {
        let program = parse_source("x = 10; print(x); { y = 1; }").unwrap();

        assert_eq!(
            program.body,
            vec![
                Stmt::Assignment {
                    name: "x".to_string(),
                    value: Expr::Literal(LiteralValue::Integer("10".to_string())),
                },
                Stmt::Print {
                    expression: Expr::Identifier("x".to_string()),
                },
                Stmt::Block {
                    body: vec![Stmt::Assignment {
                        name: "y".to_string(),
                        value: Expr::Literal(LiteralValue::Integer("1".to_string())),
                    }],
                },
            ]
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_source("x = 10").unwrap_err();

        assert_eq!(err.to_string(), "Expected SEMICOLON, got EOF");
        assert!(matches!(
            err,
            SyntaxError::Expected {
                expected: TokenKind::Semicolon,
                found: TokenKind::Eof,
                ..
            }
        ));
    }

    #[test]
    fn test_if_keyword_is_rejected() {
        let err = parse_source("if (x) { print(x); }").unwrap_err();

        assert_eq!(err.to_string(), "Unexpected token: KEYWORD(if)");
        assert_eq!(err.location(), SourceLocation::new(1, 1));
    }

    #[test]
    fn test_first_error_wins() {
        let err = parse_source("x = ; y = ;").unwrap_err();

        assert_eq!(err.to_string(), "Unexpected token: SEMICOLON(;)");
        assert_eq!(err.location(), SourceLocation::new(1, 5));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| {
            format!("x = {}a{};", "(".repeat(depth), ")".repeat(depth))
        };

        assert!(parse_source(&nested(MAX_NESTING_DEPTH)).is_ok());

        let err = parse_source(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, SyntaxError::NestingTooDeep { limit: MAX_NESTING_DEPTH, .. }));
        assert_eq!(err.location(), SourceLocation::new(1, MAX_NESTING_DEPTH + 5));

        let depth = MAX_NESTING_DEPTH + 1;
        let blocks = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let err = parse_source(&blocks).unwrap_err();
        assert!(matches!(err, SyntaxError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_nesting_depth_is_released() {
        let siblings = "x = (((a))); ".repeat(MAX_NESTING_DEPTH * 2);
        assert_eq!(parse_source(&siblings).unwrap().body.len(), MAX_NESTING_DEPTH * 2);

        let depth = MAX_NESTING_DEPTH - 1;
        let mixed = format!("{}{}", "{ y = (b); ".repeat(depth), "}".repeat(depth));
        assert!(parse_source(&mixed).is_ok());
    }

    #[test]
    fn test_tokens_without_eof() {
        let mut tokens = tokenize("print(1);").unwrap();
        tokens.pop();

        let program = parse(tokens).unwrap();
        assert_eq!(program.body.len(), 1);
        assert!(parse(Vec::new()).unwrap().body.is_empty());
    }
}
