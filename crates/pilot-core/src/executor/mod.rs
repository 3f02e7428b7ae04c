//! Boundary to the external rebase executor.
//!
//! The executor rewrites history; this crate only decides what happens at
//! each step. An executor runs synchronously on a worker thread and calls
//! back through the narrow [`InteractiveHandler`] capability at its two
//! decision points. The [`InteractiveCoordinator`](crate::InteractiveCoordinator)
//! is the handler the runner passes in.

use thiserror::Error;

use crate::{
    error::PilotError,
    models::{PrepareOutcome, RebaseOperation, RebaseStatus, RewordOutcome, Step},
};

pub mod git_cli;

pub use git_cli::GitCliExecutor;

/// Decision points an executor calls back into, on its own thread.
pub trait InteractiveHandler: Send + Sync {
    /// The step list is prepared; blocks until the interactive side has
    /// edited it or aborted.
    fn prepare_steps(&self, steps: Vec<Step>) -> PrepareOutcome;

    /// A commit is being reworded; blocks until a message is supplied or the
    /// rebase is aborted.
    fn modify_commit_message(&self, original: &str) -> RewordOutcome;
}

/// Runs one rebase operation to a terminal status.
pub trait RebaseExecutor: Send + Sync {
    fn run(
        &self,
        operation: &RebaseOperation,
        handler: &dyn InteractiveHandler,
    ) -> Result<RebaseStatus, ExecutorError>;
}

/// Failures raised inside the executor.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The repository has no HEAD commit
    #[error("HEAD does not point to a commit")]
    NoHead,
    /// A reference could not be resolved
    #[error("Reference '{name}' not found")]
    RefNotFound { name: String },
    /// An external command exited unsuccessfully
    #[error("Command failed: {command} (exit {status}) {stderr}")]
    Command {
        command: String,
        status: i32,
        stderr: String,
    },
    /// An external command could not be run
    #[error("Failed to {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    /// Any other failure inside the executor
    #[error("Internal executor error: {message}")]
    Internal { message: String },
    /// The executor panicked
    #[error("Executor panicked: {message}")]
    Panicked { message: String },
}

impl From<PilotError> for ExecutorError {
    fn from(error: PilotError) -> Self {
        match error {
            PilotError::Executor(inner) => inner,
            other => ExecutorError::Internal {
                message: other.to_string(),
            },
        }
    }
}
