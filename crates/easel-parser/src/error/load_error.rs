//! Failure to read an instruction file.

use std::{io, path::PathBuf};

use thiserror::Error;

/// An instruction file could not be read as UTF-8 text.
#[derive(Debug, Error)]
#[error("cannot read instruction file `{}`: {source}", path.display())]
pub struct LoadError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl LoadError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// The file that could not be read.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
