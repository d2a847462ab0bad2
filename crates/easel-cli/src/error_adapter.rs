//! Error adapter for converting Easel errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! An [`EaselError::Parse`] holds every rejected line of every file that
//! failed a strict parse. Each rejected line is rendered independently, with
//! its expanded text as the source snippet.

use std::{fmt, path::Path};

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use easel::EaselError;
use easel_parser::{RejectedLine, error::Diagnostic};

/// Adapter for a single parser diagnostic.
///
/// Wraps a [`Diagnostic`] together with the line it was raised on and
/// implements [`MietteDiagnostic`] for rich formatting.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Expanded line text the diagnostic's spans refer to
    src: &'a str,
    /// `file:line` location shown before the message
    location: Option<String>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self {
            diag,
            src,
            location: None,
        }
    }

    /// Create an adapter for a rejected line of the file at `path`.
    pub fn for_rejected(path: &Path, rejected: &'a RejectedLine) -> Self {
        Self {
            diag: rejected.diagnostic(),
            src: rejected.source(),
            location: Some(format!("{}:{}", path.display(), rejected.line())),
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("location", &self.location)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}: {}", self.diag.message()),
            None => write!(f, "{}", self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`EaselError`] variants.
pub struct ErrorAdapter<'a>(pub &'a EaselError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            EaselError::Io(_) => "easel::io",
            EaselError::Load(_) => "easel::load",
            EaselError::Parse(_) => "easel::parse",
            EaselError::Config(_) => "easel::config",
            EaselError::MissingCredentials(_) => "easel::credentials",
            EaselError::NoInstructionFiles(_) => "easel::discovery",
            EaselError::Http(_) => "easel::http",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            EaselError::MissingCredentials(_) => {
                "pass --token and --board, set EASEL_TOKEN and EASEL_BOARD_ID, or use --dry-run"
            }
            EaselError::NoInstructionFiles(_) => {
                "name instruction files on the command line or add `*.txt` files to --instructions-dir"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an easel [`Span`](easel_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: easel_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`EaselError`] into a list of reportable errors.
///
/// For [`EaselError::Parse`], this returns one [`Reportable`] for each
/// rejected line of each failing file. For other error variants, this
/// returns a single [`Reportable`].
pub fn to_reportables(err: &EaselError) -> Vec<Reportable<'_>> {
    match err {
        EaselError::Parse(failures) => failures
            .iter()
            .flat_map(|failure| {
                failure.err().rejected().iter().map(|rejected| {
                    Reportable::Diagnostic(DiagnosticAdapter::for_rejected(
                        failure.path(),
                        rejected,
                    ))
                })
            })
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render a report into a string with miette's graphical handler.
pub fn render(report: &dyn MietteDiagnostic) -> String {
    render_with(&GraphicalReportHandler::new(), report)
}

fn render_with(handler: &GraphicalReportHandler, report: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    match handler.render_report(&mut writer, report) {
        Ok(()) => writer,
        Err(_) => report.to_string(),
    }
}
