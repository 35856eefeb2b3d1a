//! File-in/file-out driver behind the `minipy` binary.
//!
//! Every outcome is reported as a message on the given writer; none of them is
//! an `Err`. The binary exits with status 0 whether or not compilation
//! succeeded. A failed run never creates the output file.

use crate::{compile, CompileError};
use anyhow::Context;
use crossterm::style::{style, Color, Stylize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a driver run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Generated text was written to this file
    Written(PathBuf),
    /// Generated text was written to the message writer
    Printed,
    SourceNotFound,
    /// Any other failure, with the message that was shown
    Failed(String),
}

enum Failure {
    SourceNotFound,
    Other(anyhow::Error),
}

/// Compiles one source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Driver {
    color: bool,
}

impl Driver {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Compile `source` and write the result to `output`, or to `out` when no
    /// output path is given. Only errors writing to `out` itself are returned.
    pub fn run(
        &self,
        source: &Path,
        output: Option<&Path>,
        out: &mut dyn Write,
    ) -> io::Result<Outcome> {
        let text = match self.translate(source) {
            Ok(text) => text,
            Err(failure) => return self.report(source, failure, out),
        };

        let Some(path) = output else {
            write!(out, "{}", text)?;
            return Ok(Outcome::Printed);
        };

        let written = fs::write(path, &text)
            .with_context(|| format!("cannot write '{}'", path.display()));
        if let Err(err) = written {
            return self.report(source, Failure::Other(err), out);
        }

        info!(source = %source.display(), output = %path.display(), "compiled");
        writeln!(
            out,
            "{} Output written to {}",
            self.label("Compilation successful.", Color::Green),
            path.display()
        )?;
        Ok(Outcome::Written(path.to_path_buf()))
    }

    fn report(&self, source: &Path, failure: Failure, out: &mut dyn Write) -> io::Result<Outcome> {
        match failure {
            Failure::SourceNotFound => {
                warn!(source = %source.display(), "source file not found");
                writeln!(
                    out,
                    "{} Source file '{}' not found.",
                    self.label("Error:", Color::Red),
                    source.display()
                )?;
                Ok(Outcome::SourceNotFound)
            }
            Failure::Other(err) => {
                let message = format!("{:#}", err);
                match err.downcast_ref::<CompileError>() {
                    Some(compile_err) => warn!(
                        source = %source.display(),
                        location = %compile_err.location(),
                        error = %message,
                        "compilation failed"
                    ),
                    None => {
                        warn!(source = %source.display(), error = %message, "compilation failed")
                    }
                }
                writeln!(out, "{} {}", self.label("An error occurred:", Color::Red), message)?;
                Ok(Outcome::Failed(message))
            }
        }
    }

    fn translate(&self, source: &Path) -> Result<String, Failure> {
        let text = match fs::read_to_string(source) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Failure::SourceNotFound),
            Err(e) => {
                let context = format!("cannot read '{}'", source.display());
                return Err(Failure::Other(anyhow::Error::new(e).context(context)));
            }
        };

        compile(&text).map_err(|e| Failure::Other(e.into()))
    }

    fn label(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Command-line usage text.
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {0} <source> [output]\n\n\
         Translates <source> to Python. Without [output] the result is printed.\n\n\
         Examples:\n  \
         {0} hello.mp            # print the generated Python\n  \
         {0} hello.mp hello.py   # write it to hello.py",
        program_name
    )
}
