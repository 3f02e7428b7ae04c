//! Operations the executor can be asked to perform.

use std::fmt;

/// One unit of work handed to the rebase executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOperation {
    /// Start an interactive rebase onto `upstream`
    Begin { upstream: String },

    /// Resume a stopped rebase
    Continue,

    /// Drop the current step and resume
    Skip,

    /// Restore the pre-rebase state
    Abort,
}

impl RebaseOperation {
    pub fn name(&self) -> &'static str {
        match self {
            RebaseOperation::Begin { .. } => "begin",
            RebaseOperation::Continue => "continue",
            RebaseOperation::Skip => "skip",
            RebaseOperation::Abort => "abort",
        }
    }
}

impl fmt::Display for RebaseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebaseOperation::Begin { upstream } => write!(f, "begin onto {upstream}"),
            other => f.write_str(other.name()),
        }
    }
}
