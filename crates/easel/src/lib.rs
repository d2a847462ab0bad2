//! Easel - replays line-oriented board instructions on a visual collaboration board.
//!
//! Instruction files are parsed into commands by [`easel_parser`], then each
//! command is dispatched to a [`BoardClient`]. Shapes are remembered by name so
//! that later `LINK` instructions can connect them, and every failure stays
//! local to the line or command that caused it.

pub mod client;
pub mod config;

mod error;
mod executor;
mod registry;
mod stats;

pub use easel_core::{color, command, geometry};

pub use error::{EaselError, FileParseError};
pub use executor::{ExecError, Executor, Outcome};
pub use registry::NameRegistry;
pub use stats::RunStats;

use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use log::{info, warn};

use easel_parser::{InstructionParser, Instructions, RejectedLine};

use client::BoardClient;
use config::AppConfig;

/// Result of processing one instruction file.
#[derive(Debug)]
pub struct FileReport {
    path: PathBuf,
    total: usize,
    succeeded: usize,
    rejected: Vec<RejectedLine>,
}

impl FileReport {
    /// Returns the processed file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of commands that were executed.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of commands that succeeded.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Returns the number of commands that failed.
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    /// Returns the lines that could not be parsed.
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }
}

/// Drives instruction files through parsing and execution.
///
/// One engine is one run: variables set by earlier files stay visible to later
/// ones, and so do the shape names they created.
///
/// # Examples
///
/// ```rust,no_run
/// use easel::{Engine, client::DryRunClient, config::AppConfig};
///
/// let config = AppConfig::default();
/// let mut engine = Engine::new(DryRunClient::new(config.palette().clone()), &config);
///
/// let report = engine.process_file("instructions/flow.txt");
/// println!("{}/{} succeeded", report.succeeded(), report.total());
/// println!("{}", engine.stats());
/// ```
#[derive(Debug)]
pub struct Engine<C> {
    parser: InstructionParser,
    executor: Executor<C>,
    file_delay: Duration,
}

impl<C: BoardClient> Engine<C> {
    /// Creates an engine whose `PRINT` output goes to standard output.
    pub fn new(client: C, config: &AppConfig) -> Self {
        Self::with_executor(Executor::new(client), config)
    }

    /// Creates an engine around an existing executor.
    pub fn with_executor(executor: Executor<C>, config: &AppConfig) -> Self {
        Self {
            parser: InstructionParser::new(),
            executor,
            file_delay: config.run().file_delay(),
        }
    }

    /// Parses and executes one instruction file.
    ///
    /// An unreadable file is logged and reported as holding no instructions.
    pub fn process_file(&mut self, path: impl AsRef<Path>) -> FileReport {
        let path = path.as_ref();
        info!(path:? = path; "Processing instruction file");

        let instructions = self.parser.parse_file(path);
        self.run(path, instructions)
    }

    /// Parses and executes instructions held in memory.
    pub fn process_source(&mut self, name: impl AsRef<Path>, source: &str) -> FileReport {
        let instructions = self.parser.parse_source(source);
        self.run(name.as_ref(), instructions)
    }

    /// Processes `paths` one after another, pausing between files.
    pub fn process_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<FileReport> {
        let mut reports = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            if index > 0 && !self.file_delay.is_zero() {
                thread::sleep(self.file_delay);
            }
            reports.push(self.process_file(path));
        }
        reports
    }

    /// Returns the statistics accumulated so far.
    pub fn stats(&self) -> &RunStats {
        self.executor.stats()
    }

    pub fn executor(&self) -> &Executor<C> {
        &self.executor
    }

    pub fn parser(&self) -> &InstructionParser {
        &self.parser
    }

    fn run(&mut self, path: &Path, instructions: Instructions) -> FileReport {
        let (commands, rejected) = instructions.into_parts();
        if commands.is_empty() {
            warn!(path:? = path; "No instructions to execute");
        }

        let mut succeeded = 0;
        for command in &commands {
            match self.executor.execute(command) {
                Ok(Outcome::Created { id, .. }) => {
                    succeeded += 1;
                    info!(id = id.as_str(); "Created {command}");
                }
                Ok(_) => {
                    succeeded += 1;
                    info!("Executed {command}");
                }
                Err(err) => warn!("Failed {command}: {err}"),
            }
        }

        info!(
            path:? = path,
            succeeded = succeeded,
            total = commands.len();
            "Finished instruction file"
        );

        FileReport {
            path: path.to_path_buf(),
            total: commands.len(),
            succeeded,
            rejected,
        }
    }
}
