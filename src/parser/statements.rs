//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement  ::= print_stmt | assign_stmt | block
//! print_stmt ::= 'print' '(' expression ')' ';'
//! assign_stmt::= IDENTIFIER '=' expression ';'
//! block      ::= '{' statement* '}'
//! ```
//!
//! The statement rule is chosen from the current token alone. Keywords other
//! than `print` start no rule and are reported as unexpected tokens.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, Token, TokenKind};
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        match self.peek() {
            Token::Keyword(Keyword::Print, _) => self.parse_print_statement(),
            Token::Ident(..) => self.parse_assignment_statement(),
            Token::LBrace(_) => self.parse_block(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_print_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(TokenKind::Keyword)?;
        self.expect(TokenKind::LParen)?;
        let expression = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Print { expression })
    }

    fn parse_assignment_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let name = match self.expect(TokenKind::Identifier)? {
            Token::Ident(name, _) => name,
            other => return Err(SyntaxError::UnexpectedToken { token: other }),
        };
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Assignment { name, value })
    }

    /// Parse `{ statement* }`. An unclosed block reports the missing `}`.
    fn parse_block(&mut self) -> Result<Stmt, SyntaxError> {
        self.open_nested(TokenKind::LBrace)?;

        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            body.push(self.parse_statement()?);
        }

        self.close_nested(TokenKind::RBrace)?;
        Ok(Stmt::Block { body })
    }
}
