//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::models::{InteractiveResult, RebaseStatus};

/// How an operation ended, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    /// Neither done nor broken: the rebase waits for the user, or was
    /// abandoned on request.
    Notice,
    Error,
}

impl StatusKind {
    fn label(self) -> &'static str {
        match self {
            StatusKind::Success => "Success:",
            StatusKind::Notice => "Note:",
            StatusKind::Error => "Error:",
        }
    }
}

/// Wrapper type for displaying operation confirmation messages.
///
/// This provides consistent formatting for operations that require
/// user confirmation or status updates.
pub struct OperationStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            kind: StatusKind::Success,
        }
    }

    /// Create a new neutral status.
    pub fn notice(message: String) -> Self {
        Self {
            message,
            kind: StatusKind::Notice,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            kind: StatusKind::Error,
        }
    }

    /// Summarize a terminal result; decision requests are not terminal and
    /// yield `None`.
    pub fn from_result(result: &InteractiveResult) -> Option<Self> {
        match result {
            InteractiveResult::Terminal { status } => {
                let message = format!("Rebase {status}");
                Some(match status {
                    RebaseStatus::Ok | RebaseStatus::UpToDate => Self::success(message),
                    RebaseStatus::Stopped | RebaseStatus::Edit | RebaseStatus::Aborted => {
                        Self::notice(message)
                    }
                    RebaseStatus::Conflicts
                    | RebaseStatus::Failed
                    | RebaseStatus::UncommittedChanges => Self::failure(message),
                })
            }
            InteractiveResult::Exception { error } => {
                Some(Self::failure(format!("Rebase failed: {error}")))
            }
            InteractiveResult::Prepare { .. } | InteractiveResult::Reword { .. } => None,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.kind.label(), self.message)
    }
}
