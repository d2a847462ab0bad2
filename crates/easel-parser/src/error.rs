//! Error and diagnostic system for the Easel parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - A [`ParseError`] wrapping every diagnostic of a strict parse
//!
//! # Example
//!
//! ```
//! # use easel_parser::error::{Diagnostic, ErrorCode};
//! # use easel_parser::Span;
//!
//! let diag = Diagnostic::error("invalid number `ten` for `x`")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(11..14), "not a number")
//!     .with_help("numeric fields accept decimal values such as `10` or `12.5`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod load_error;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use load_error::LoadError;
pub use parse_error::ParseError;
