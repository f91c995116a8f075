//! Transfer report types.
//!
//! Put and get never stop at a failed invocation; every command issued is
//! recorded here with its exit status so that failures can be reported once
//! the sequence has finished.

use std::fmt;
use std::path::PathBuf;

use crate::error::DirodsError;
use crate::irods::{CommandStatus, IrodsCommand};

/// Outcome of a put or get against one remote collection.
#[derive(Clone, Debug, Default)]
pub struct TransferReport {
    /// The remote collection, `<zone>/<uuid>`.
    pub collection: String,
    /// Every `run` invocation in the order it was issued.
    pub invocations: Vec<Invocation>,
    /// Local files not fetched because they already exist.
    pub skipped: Vec<PathBuf>,
}

/// A finished icommands invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub status: CommandStatus,
}

impl TransferReport {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Default::default()
        }
    }

    /// Records a finished invocation, logging it if it failed.
    pub fn record(&mut self, cmd: &IrodsCommand, status: CommandStatus) {
        if !status.is_success() {
            tracing::warn!(command = %cmd, %status, "icommand failed");
        }
        self.invocations.push(Invocation {
            command: cmd.to_string(),
            status,
        });
    }

    pub fn skip(&mut self, path: PathBuf) {
        tracing::debug!(path = %path.display(), "already present, skipping");
        self.skipped.push(path);
    }

    pub fn total(&self) -> usize {
        self.invocations.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Invocation> {
        self.invocations.iter().filter(|i| !i.status.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Returns true if every invocation exited successfully.
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }

    /// Converts a report with failures into [`DirodsError::TransferIncomplete`].
    pub fn into_result(self) -> Result<Self, DirodsError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(DirodsError::TransferIncomplete {
                failed: self.failed_count(),
                total: self.total(),
            })
        }
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} invocation(s), {} failed, {} skipped",
            self.collection,
            self.total(),
            self.failed_count(),
            self.skipped.len()
        )?;

        for failure in self.failures() {
            writeln!(f, "  - {} ({})", failure.command, failure.status)?;
        }

        Ok(())
    }
}
