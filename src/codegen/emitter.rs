//! Program and statement emission
//!
//! [`PyEmitter`] holds the output buffer and the current nesting depth. There
//! is one visitor per AST variant and the matches are exhaustive, so every node
//! the parser can build has a handler.

use super::EmitOptions;
use crate::parser::ast::{Program, Stmt};
use tracing::debug;

/// Generate Python source for `program` with the default options.
pub fn generate(program: &Program) -> String {
    generate_with(program, &EmitOptions::default())
}

/// Generate Python source for `program` with custom options.
pub fn generate_with(program: &Program, options: &EmitOptions) -> String {
    PyEmitter::new(options.clone()).emit_program(program)
}

/// Tree-walking Python emitter
pub struct PyEmitter {
    options: EmitOptions,
    indent: usize,
    output: String,
}

impl PyEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            options,
            indent: 0,
            output: String::new(),
        }
    }

    /// Emit the header followed by every top-level statement in order.
    pub fn emit_program(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent = 0;

        let header = format!("# Generated by {}", self.options.engine_name);
        self.emit_line(&header);
        self.emit_line("");

        for stmt in &program.body {
            self.emit_statement(stmt);
        }

        debug!(
            lines = self.output.lines().count(),
            bytes = self.output.len(),
            "generated python source"
        );
        std::mem::take(&mut self.output)
    }

    fn emit_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Print { expression } => {
                let expr = self.emit_expression(expression);
                self.emit_line(&format!("print({})", expr));
            }
            Stmt::Assignment { name, value } => {
                let expr = self.emit_expression(value);
                self.emit_line(&format!("{} = {}", name, expr));
            }
            Stmt::Block { body } => {
                self.indent += 1;
                for stmt in body {
                    self.emit_statement(stmt);
                }
                self.indent -= 1;
            }
        }
    }

    /// Write `text` at the current indentation. Empty lines get no indent.
    fn emit_line(&mut self, text: &str) {
        if !text.is_empty() {
            let width = self.indent * self.options.indent_width;
            self.output.extend(std::iter::repeat(' ').take(width));
            self.output.push_str(text);
        }
        self.output.push('\n');
    }
}
