//! Error types for the rebase coordination library.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    executor::ExecutorError,
    models::{RunnerState, Step},
};

/// Comprehensive error type for all pilot operations.
#[derive(Error, Debug)]
pub enum PilotError {
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A todo index outside the current step list
    #[error("Index {index} is out of range for a todo list of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
    /// The authoritative step list no longer matches the last snapshot
    #[error("The step list was changed by another actor ({} steps now queued)", steps.len())]
    StepListChanged { steps: Vec<Step> },
    /// The repository is not in an interactive rebase
    #[error("No interactive rebase is in progress")]
    NotRebasing,
    /// `continue` was requested with no decision outstanding and no stopped rebase
    #[error("Nothing to continue: no decision is pending and no rebase is stopped")]
    NothingToContinue,
    /// An operation that is not valid in the runner's current state
    #[error("Cannot {operation} while the rebase is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: RunnerState,
    },
    /// Malformed line in a todo list
    #[error("Malformed todo line {line}: {reason}")]
    Parse { line: usize, reason: String },
    /// Failure reported by the rebase executor
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PilotError {
        PilotError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PilotError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether this error reports a concurrent change of the step list.
    pub fn is_step_list_changed(&self) -> bool {
        matches!(self, PilotError::StepListChanged { .. })
    }
}

/// Extension trait for I/O results that attaches the offending path.
pub trait IoResultExt<T> {
    /// Map an I/O error into [`PilotError::FileSystem`] for `path`.
    fn fs_context(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| PilotError::FileSystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Result type alias for pilot operations
pub type Result<T> = std::result::Result<T, PilotError>;
