//! Command-line argument definitions for the Easel CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the instruction files, the target board
//! and its credentials, configuration file selection, and logging verbosity.

use std::fmt;

use clap::Parser;

/// Replays Easel instruction files on a Miro board
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Instruction files to run, in order
    #[arg(help = "Instruction files to run; discovered automatically when omitted")]
    pub files: Vec<String>,

    /// Access token for the board API
    #[arg(long, env = "EASEL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Identifier of the board to draw on
    #[arg(long, env = "EASEL_BOARD_ID")]
    pub board: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory searched for `*.txt` instruction files
    #[arg(long, default_value = "instructions")]
    pub instructions_dir: String,

    /// Log what would be created without contacting the board
    #[arg(long)]
    pub dry_run: bool,

    /// Only parse the files and report every rejected line
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token.as_ref().map(|_| "<redacted>");
        f.debug_struct("Args")
            .field("files", &self.files)
            .field("token", &token)
            .field("board", &self.board)
            .field("config", &self.config)
            .field("instructions_dir", &self.instructions_dir)
            .field("dry_run", &self.dry_run)
            .field("check", &self.check)
            .field("log_level", &self.log_level)
            .finish()
    }
}
