//! Error types for Easel runs.
//!
//! [`EaselError`] covers the conditions that stop a run as a whole. Failures
//! of single lines or commands are reported per item instead.

use std::{io, path::PathBuf};

use thiserror::Error;

use easel_parser::error::{LoadError, ParseError};

/// The main error type for Easel operations.
///
/// # Diagnostic Variants
///
/// `Parse` carries the structured diagnostics of every file that failed a
/// strict parse, so callers can render each rejected line with its source.
#[derive(Debug, Error)]
pub enum EaselError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{} instruction file(s) failed to parse", .0.len())]
    Parse(Vec<FileParseError>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("No instruction files found in `{}` or the working directory", .0.display())]
    NoInstructionFiles(PathBuf),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Strict-parse failure of one instruction file.
#[derive(Debug)]
pub struct FileParseError {
    path: PathBuf,
    err: ParseError,
}

impl FileParseError {
    pub fn new(path: impl Into<PathBuf>, err: ParseError) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn err(&self) -> &ParseError {
        &self.err
    }
}
