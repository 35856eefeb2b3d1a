//! Python code generation
//!
//! This module walks a parsed [`Program`](crate::parser::ast::Program) and emits
//! Python 3 source text:
//! - [`emitter`]: the [`PyEmitter`] tree walker, program and statement visitors
//! - `expressions`: expression visitors
//!
//! # Output Format
//!
//! ```text
//! # Generated by minipy
//!
//! x = 10
//! print((x + 1))
//! ```
//!
//! One line per statement. Blocks emit no delimiters of their own; their
//! statements are indented one extra level. Binary expressions are always
//! fully parenthesized so the source grouping survives regardless of the
//! target's own precedence rules.

pub mod emitter;
mod expressions;

pub use emitter::{generate, generate_with, PyEmitter};

/// Engine name written into the header comment
pub const ENGINE_NAME: &str = "minipy";

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 4;

/// Knobs for the emitted text. The defaults produce the canonical format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Shown in the `# Generated by <engine_name>` header line
    pub engine_name: String,
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            engine_name: ENGINE_NAME.to_string(),
            indent_width: INDENT_WIDTH,
        }
    }
}
