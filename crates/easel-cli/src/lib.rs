//! CLI logic for the Easel instruction runner.
//!
//! This module selects the instruction files and board client from the
//! command-line arguments and drives them through an [`Engine`].

pub mod error_adapter;

mod args;
mod config;
mod discovery;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::{info, warn};

use easel::{
    EaselError, Engine, FileParseError, FileReport, RunStats,
    client::{BoardClient, Credentials, DryRunClient, MiroClient},
    config::AppConfig,
};
use easel_parser::InstructionParser;

use error_adapter::{DiagnosticAdapter, render};

/// Result of a completed CLI run.
#[derive(Debug)]
pub struct Summary {
    files: Vec<PathBuf>,
    reports: Vec<FileReport>,
    stats: RunStats,
}

impl Summary {
    /// Returns the instruction files that were processed or checked.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the per-file reports. Empty for `--check` runs.
    pub fn reports(&self) -> &[FileReport] {
        &self.reports
    }

    /// Returns the items created during the run.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

/// Run the Easel CLI application
///
/// Loads configuration, selects the instruction files, and either checks
/// them (`--check`) or replays them on the board.
///
/// # Errors
///
/// Returns `EaselError` for:
/// - Configuration loading errors
/// - Missing credentials outside dry runs and checks
/// - No instruction files found
/// - Files that fail a `--check` parse
pub fn run(args: &Args) -> Result<Summary, EaselError> {
    let app_config = config::load_config(args.config.as_ref())?;

    let credentials = if args.dry_run || args.check {
        None
    } else {
        Some(credentials(args)?)
    };

    let files = select_files(args)?;
    info!(files = files.len(); "Instruction files selected");

    if args.check {
        return check(files);
    }

    match credentials {
        Some(credentials) => {
            info!(
                board = credentials.board_id(),
                token = credentials.masked_token();
                "Connecting to board"
            );
            let client = MiroClient::new(credentials.clone(), &app_config)?;
            let summary = execute(client, &app_config, files);
            info!(url = credentials.board_url(); "Board: {}", credentials.board_url());
            Ok(summary)
        }
        None => {
            info!("Dry run: nothing will be created on the board");
            let client = DryRunClient::new(app_config.palette().clone());
            Ok(execute(client, &app_config, files))
        }
    }
}

fn credentials(args: &Args) -> Result<Credentials, EaselError> {
    let token = non_blank(args.token.as_deref())
        .ok_or_else(|| EaselError::MissingCredentials("no access token".to_string()))?;
    let board = non_blank(args.board.as_deref())
        .ok_or_else(|| EaselError::MissingCredentials("no board id".to_string()))?;
    Ok(Credentials::new(token, board))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn select_files(args: &Args) -> Result<Vec<PathBuf>, EaselError> {
    if !args.files.is_empty() {
        return Ok(args.files.iter().map(PathBuf::from).collect());
    }

    let instructions_dir = Path::new(&args.instructions_dir);
    let files = discovery::discover_files(instructions_dir, Path::new("."));
    if files.is_empty() {
        return Err(EaselError::NoInstructionFiles(instructions_dir.to_path_buf()));
    }
    Ok(files)
}

fn execute<C: BoardClient>(client: C, config: &AppConfig, files: Vec<PathBuf>) -> Summary {
    let mut engine = Engine::new(client, config);
    let reports = engine.process_files(&files);

    for report in &reports {
        for rejected in report.rejected() {
            warn!("{}", render(&DiagnosticAdapter::for_rejected(report.path(), rejected)));
        }
        info!(
            path = report.path().display().to_string(),
            succeeded = report.succeeded(),
            total = report.total(),
            rejected = report.rejected().len();
            "Executed {}/{} instructions", report.succeeded(), report.total()
        );
    }

    let stats = *engine.stats();
    info!("{stats}");

    Summary {
        files,
        reports,
        stats,
    }
}

fn check(files: Vec<PathBuf>) -> Result<Summary, EaselError> {
    let mut parser = InstructionParser::new();
    let mut failures = Vec::new();

    for path in &files {
        let instructions = parser.load_file(path)?;
        let (commands, rejected) = instructions.into_parts();
        if rejected.is_empty() {
            info!(path = path.display().to_string(), commands = commands.len(); "File is valid");
        } else {
            failures.push(FileParseError::new(path, rejected.into()));
        }
    }

    if !failures.is_empty() {
        return Err(EaselError::Parse(failures));
    }

    Ok(Summary {
        files,
        reports: Vec::new(),
        stats: RunStats::default(),
    })
}
