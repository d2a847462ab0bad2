//! Reading instruction files and collecting their commands.

use std::{fmt, fs, path::Path};

use log::{debug, info, warn};

use easel_core::command::Command;

use crate::{
    InstructionParser,
    error::{Diagnostic, LoadError},
};

/// A line the parser could not turn into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    line: usize,
    source: String,
    diagnostic: Diagnostic,
}

impl RejectedLine {
    pub fn new(line: usize, source: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self {
            line,
            source: source.into(),
            diagnostic,
        }
    }

    /// 1-based line number in the file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The line after variable substitution and escape expansion.
    ///
    /// Diagnostic spans are byte offsets into this text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

impl fmt::Display for RejectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.diagnostic)
    }
}

/// The outcome of parsing a whole source: commands in line order plus the
/// lines that were rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instructions {
    commands: Vec<Command>,
    rejected: Vec<RejectedLine>,
}

impl Instructions {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// `true` when no line produced a command.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Command>, Vec<RejectedLine>) {
        (self.commands, self.rejected)
    }
}

/// Read an instruction file as UTF-8 text.
pub(crate) fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|err| LoadError::new(path, err))
}

impl InstructionParser {
    /// Parse every line of `source` in order.
    ///
    /// Blank and comment lines are dropped. Rejected lines are logged at
    /// debug level and returned alongside the commands; they never stop the
    /// remaining lines from being parsed.
    pub fn parse_source(&mut self, source: &str) -> Instructions {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut instructions = Instructions::default();

        for (index, raw) in source.lines().enumerate() {
            let line_number = index + 1;
            let Some(expanded) = self.expand(raw) else {
                continue;
            };

            match self.parse_expanded(&expanded) {
                Ok(command) => instructions.commands.push(command),
                Err(diagnostic) => {
                    debug!(
                        line = line_number,
                        code = diagnostic.code().map(|code| code.as_str()).unwrap_or("-");
                        "Skipping line: {}", diagnostic.message()
                    );
                    instructions
                        .rejected
                        .push(RejectedLine::new(line_number, expanded, diagnostic));
                }
            }
        }

        instructions
    }

    /// Read and parse the instruction file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read as UTF-8 text.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Instructions, LoadError> {
        let path = path.as_ref();
        let source = read_source(path)?;
        let instructions = self.parse_source(&source);

        info!(
            path = path.display().to_string(),
            commands = instructions.len(),
            rejected = instructions.rejected().len();
            "Parsed instruction file"
        );

        Ok(instructions)
    }

    /// Read and parse the instruction file at `path`, treating an unreadable
    /// file as one without instructions.
    ///
    /// The read failure is logged as a warning.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Instructions {
        match self.load_file(path) {
            Ok(instructions) => instructions,
            Err(err) => {
                warn!("{err}");
                Instructions::default()
            }
        }
    }
}
