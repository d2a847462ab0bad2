//! The ParseError type for a strict parse of a whole source.
//!
//! [`ParseError`] wraps every [`RejectedLine`] found while parsing. Each
//! rejected line carries its own expanded text, since diagnostic spans are
//! relative to the line they were produced for.

use std::fmt;

use crate::RejectedLine;

/// Error type for [`InstructionParser::parse_strict`](crate::InstructionParser::parse_strict).
#[derive(Debug)]
pub struct ParseError {
    rejected: Vec<RejectedLine>,
}

impl ParseError {
    /// Create a new parse error from rejected lines.
    pub fn new(rejected: Vec<RejectedLine>) -> Self {
        Self { rejected }
    }

    /// Get all rejected lines in file order.
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.rejected.first() {
            write!(f, "{}", first)?;
            if self.rejected.len() > 1 {
                write!(f, " (+{} more)", self.rejected.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Vec<RejectedLine>> for ParseError {
    fn from(rejected: Vec<RejectedLine>) -> Self {
        Self { rejected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Diagnostic, ErrorCode};

    fn rejected(line: usize, message: &str) -> RejectedLine {
        RejectedLine::new(
            line,
            "BOX|1",
            Diagnostic::error(message).with_code(ErrorCode::E100),
        )
    }

    #[test]
    fn test_parse_error_display_single() {
        let err = ParseError::new(vec![rejected(3, "unknown command `BOX`")]);

        assert_eq!(
            err.to_string(),
            "line 3: error[E100]: unknown command `BOX`"
        );
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let err: ParseError = vec![
            rejected(1, "first error"),
            rejected(4, "second error"),
            rejected(9, "third error"),
        ]
        .into();

        assert_eq!(err.rejected().len(), 3);
        assert_eq!(err.to_string(), "line 1: error[E100]: first error (+2 more)");
    }
}
