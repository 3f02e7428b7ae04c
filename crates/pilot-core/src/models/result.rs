//! Values exchanged between the worker and the interactive side.

use super::{RebaseStatus, Step};
use crate::executor::ExecutorError;

/// A decision request or a terminal outcome, delivered to the caller in
/// executor-emission order.
#[derive(Debug)]
pub enum InteractiveResult {
    /// The executor prepared the step list and waits for it to be edited
    Prepare { steps: Vec<Step> },

    /// The executor waits for a replacement commit message
    Reword { commit_message: String },

    /// An operation finished with the given status
    Terminal { status: RebaseStatus },

    /// An operation failed inside the executor
    Exception { error: ExecutorError },
}

impl InteractiveResult {
    /// Whether the worker is blocked waiting for an answer to this result.
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            InteractiveResult::Prepare { .. } | InteractiveResult::Reword { .. }
        )
    }

    /// Whether the result ends an operation.
    pub fn is_terminal(&self) -> bool {
        !self.is_decision()
    }
}

/// Answer to a step-list preparation callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// Execute these steps (the authoritative list after editing)
    Proceed(Vec<Step>),

    /// The rebase was aborted while the worker waited
    Aborted,
}

/// Answer to a reword callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewordOutcome {
    /// Use this message
    Message(String),

    /// Abort the whole rebase
    Abort,
}
