//! Error codes for the Easel diagnostic system.
//!
//! All instruction-line errors are in the `E1xx` range.

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unknown command.
    ///
    /// The first field of the line is not one of the instruction keywords.
    E100,

    /// Missing required field.
    ///
    /// The line has fewer fields than its command requires.
    E101,

    /// Invalid number.
    ///
    /// A numeric field could not be read as a finite decimal number, or a
    /// duration was negative.
    E102,

    /// Empty variable name.
    ///
    /// A `SET` line has an empty name field.
    E103,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
