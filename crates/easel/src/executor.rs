//! Command execution.
//!
//! The [`Executor`] dispatches parsed commands to a [`BoardClient`] one at a
//! time. Every command yields its own [`Result`]: a failed creation or an
//! unresolved link is returned as an [`ExecError`] and leaves the executor
//! ready for the next command.

use std::{fmt, io, io::Write, thread, time::Duration};

use log::debug;
use thiserror::Error;

use easel_core::command::{Command, ElementKind, Link};

use crate::{
    client::{BoardClient, ClientError, Endpoint, ItemId},
    registry::NameRegistry,
    stats::RunStats,
};

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A board item was created.
    Created { kind: ElementKind, id: ItemId },
    /// The run paused.
    Slept(Duration),
    /// A message was written to the output channel.
    Printed,
    /// A variable assignment, already applied while parsing.
    VariableSet,
}

/// Failure to execute a single command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("cannot link '{start}' -> '{end}': no element named {}", quoted(.missing))]
    UnresolvedLink {
        start: String,
        end: String,
        missing: Vec<String>,
    },

    #[error("failed to create {kind}: {source}")]
    Remote {
        kind: ElementKind,
        #[source]
        source: ClientError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Runs commands against a board, tracking created shapes and statistics.
pub struct Executor<C> {
    client: C,
    registry: NameRegistry,
    stats: RunStats,
    output: Box<dyn Write>,
}

impl<C: BoardClient> Executor<C> {
    /// Creates an executor that prints to standard output.
    pub fn new(client: C) -> Self {
        Self::with_output(client, io::stdout())
    }

    /// Creates an executor that writes `PRINT` messages to `output`.
    pub fn with_output(client: C, output: impl Write + 'static) -> Self {
        Self {
            client,
            registry: NameRegistry::new(),
            stats: RunStats::new(),
            output: Box::new(output),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Executes one command.
    ///
    /// Counters are only incremented, and shape names only registered, once
    /// the board has returned a non-empty identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the board rejects the item, a link endpoint has
    /// not been created, or a message cannot be written.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome, ExecError> {
        match command {
            Command::Frame(frame) => {
                let id = self.create(ElementKind::Frame, |client| client.create_frame(frame))?;
                Ok(self.created(ElementKind::Frame, id))
            }
            Command::Shape(shape) => {
                let id = self.create(ElementKind::Shape, |client| client.create_shape(shape))?;
                if let Some(previous) = self.registry.register(shape.name(), id.clone()) {
                    debug!(
                        name = shape.name(), previous = previous.as_str(), id = id.as_str();
                        "Name now refers to a newer shape"
                    );
                }
                Ok(self.created(ElementKind::Shape, id))
            }
            Command::Sticky(sticky) => {
                let id = self.create(ElementKind::Sticky, |client| client.create_sticky(sticky))?;
                Ok(self.created(ElementKind::Sticky, id))
            }
            Command::Text(text) => {
                let id = self.create(ElementKind::Text, |client| client.create_text(text))?;
                Ok(self.created(ElementKind::Text, id))
            }
            Command::Link(link) => self.link(link),
            Command::Sleep(sleep) => {
                thread::sleep(sleep.duration());
                Ok(Outcome::Slept(sleep.duration()))
            }
            Command::Print(print) => {
                writeln!(self.output, "{}", print.message())?;
                self.output.flush()?;
                Ok(Outcome::Printed)
            }
            Command::SetVar(_) => Ok(Outcome::VariableSet),
        }
    }

    fn link(&mut self, link: &Link) -> Result<Outcome, ExecError> {
        let start = self.registry.resolve(link.start()).cloned();
        let end = self.registry.resolve(link.end()).cloned();

        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                let mut missing = Vec::new();
                if start.is_none() {
                    missing.push(link.start().to_string());
                }
                if end.is_none() && (start.is_some() || link.end() != link.start()) {
                    missing.push(link.end().to_string());
                }
                return Err(ExecError::UnresolvedLink {
                    start: link.start().to_string(),
                    end: link.end().to_string(),
                    missing,
                });
            }
        };

        let id = self.create(ElementKind::Connector, |client| {
            client.create_connector(&start, &end, link.label())
        })?;
        Ok(self.created(ElementKind::Connector, id))
    }

    fn create<F>(&mut self, kind: ElementKind, call: F) -> Result<ItemId, ExecError>
    where
        F: FnOnce(&mut C) -> Result<ItemId, ClientError>,
    {
        let id = call(&mut self.client).map_err(|source| ExecError::Remote { kind, source })?;
        if id.is_empty() {
            return Err(ExecError::Remote {
                kind,
                source: ClientError::MissingId {
                    endpoint: Endpoint::for_element(kind),
                },
            });
        }
        Ok(id)
    }

    fn created(&mut self, kind: ElementKind, id: ItemId) -> Outcome {
        self.stats.record(kind);
        Outcome::Created { kind, id }
    }
}

impl<C> fmt::Debug for Executor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("registry", &self.registry)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
