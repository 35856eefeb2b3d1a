//! minipy source code parser
//!
//! This module transforms minipy source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Statements: `print(expr);`, `name = expr;`, `{ ... }`
//! - Expressions: `+ - * /` over integers, floats, strings and identifiers
//! - Keywords `if`, `else`, `while`, `for`, `return`, `int`, `float`, `string` are
//!   reserved but start no statement
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parse::{parse, Parser, SyntaxError};
