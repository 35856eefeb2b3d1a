//! # Introduction
//!
//! minipy translates programs written in a tiny statement language into Python 3
//! source that can be run directly with `python3`.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Emitter → Python source
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`codegen`]: walks the AST and emits Python text.
//! 3. [`cli`]: the file-in/file-out driver used by the `minipy` binary.
//! 4. [`config`]: environment-driven settings for the binary.
//!
//! Each stage is fully materialised before the next begins, and the first error
//! from any stage aborts the whole compilation.
//!
//! ## Language
//!
//! ```text
//! x = 10;
//! y = 2.5 * (x - 1);
//! print(y);
//! print("Hello, world!");
//! { z = x / 4; }
//! ```

pub mod cli;
pub mod codegen;
pub mod config;
pub mod parser;

use codegen::EmitOptions;
use parser::{LexError, SyntaxError};
use thiserror::Error;

/// Any error that aborts a compilation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl CompileError {
    pub fn location(&self) -> parser::ast::SourceLocation {
        match self {
            CompileError::Lex(e) => e.location(),
            CompileError::Syntax(e) => e.location(),
        }
    }
}

/// Translate minipy source to Python source.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with(source, &EmitOptions::default())
}

/// Translate minipy source to Python source with custom emitter options.
pub fn compile_with(source: &str, options: &EmitOptions) -> Result<String, CompileError> {
    let tokens = parser::tokenize(source)?;
    let program = parser::parse(tokens)?;
    Ok(codegen::generate_with(&program, options))
}
