//! # Easel Parser
//!
//! Parser for the Easel board instruction language: one instruction per
//! line, fields separated by `|`, `#` comments, `$name` variables defined by
//! `SET`, and `\n` escapes in text.
//!
//! ## Usage
//!
//! ```
//! # use easel_parser::InstructionParser;
//! # use easel_core::command::Command;
//! let source = "
//!     ## two boxes and an arrow
//!     SET|W|200
//!     SHAPE|Box1|0|0|$W|100
//!     SHAPE|Box2|300|0|$W|100
//!     LINK|Box1|Box2|flows to
//! ";
//!
//! let mut parser = InstructionParser::new();
//! let instructions = parser.parse_source(source);
//! assert_eq!(instructions.len(), 4);
//! assert!(instructions.rejected().is_empty());
//! assert!(matches!(instructions.commands()[3], Command::Link(_)));
//! ```

pub mod error;

mod fields;
mod loader;
mod parser;
mod span;
mod variables;

pub use loader::{Instructions, RejectedLine};
pub use span::Span;
pub use variables::VariableStore;

use easel_core::command::Command;

use error::{Diagnostic, ParseError};

/// A stateful instruction parser.
///
/// The parser owns the [`VariableStore`]: `SET` lines update it as they are
/// parsed, and every later line, in the same source or in a later file
/// parsed by the same instance, sees the new values. Create a new parser to
/// start from an empty store.
#[derive(Debug, Default)]
pub struct InstructionParser {
    variables: VariableStore,
}

impl InstructionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The variables defined so far.
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Parse a single raw line.
    ///
    /// Returns `Ok(None)` for blank and `#` comment lines, `Ok(Some(_))` for
    /// a well-formed instruction, and an error diagnostic otherwise. The
    /// diagnostic's spans refer to the line after variable substitution and
    /// escape expansion.
    ///
    /// ```
    /// # use easel_parser::{InstructionParser, error::ErrorCode};
    /// let mut parser = InstructionParser::new();
    /// assert_eq!(parser.parse_line("   # comment"), Ok(None));
    ///
    /// let err = parser.parse_line("FRAME|Title|0|0").unwrap_err();
    /// assert_eq!(err.code(), Some(ErrorCode::E101));
    /// ```
    pub fn parse_line(&mut self, raw: &str) -> Result<Option<Command>, Diagnostic> {
        match self.expand(raw) {
            Some(line) => self.parse_expanded(&line).map(Some),
            None => Ok(None),
        }
    }

    /// Parse `source`, failing if any line is rejected.
    ///
    /// Variables defined before the first rejected line stay defined.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] listing every rejected line.
    pub fn parse_strict(&mut self, source: &str) -> Result<Vec<Command>, ParseError> {
        let (commands, rejected) = self.parse_source(source).into_parts();
        if rejected.is_empty() {
            Ok(commands)
        } else {
            Err(ParseError::new(rejected))
        }
    }

    /// Trim, substitute variables and expand escapes.
    ///
    /// Returns `None` for lines that carry no instruction.
    fn expand(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let substituted = self.variables.substitute(trimmed);
        Some(substituted.replace("\\n", "\n"))
    }

    fn parse_expanded(&mut self, line: &str) -> Result<Command, Diagnostic> {
        parser::build_command(line, &mut self.variables)
    }
}
