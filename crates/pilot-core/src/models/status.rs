//! Status enumerations for steps, executor results and the operation runner.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the executor does with a step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Apply the commit as is
    Pick,

    /// Apply the commit and ask for a new message
    Reword,

    /// Apply the commit and stop for amending
    Edit,

    /// Meld into the previous commit, combining messages
    Squash,

    /// Meld into the previous commit, discarding this message
    Fixup,

    /// Keep the line commented out; the executor ignores it
    Comment,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pick" | "p" => Ok(Action::Pick),
            "reword" | "r" => Ok(Action::Reword),
            "edit" | "e" => Ok(Action::Edit),
            "squash" | "s" => Ok(Action::Squash),
            "fixup" | "f" => Ok(Action::Fixup),
            "comment" => Ok(Action::Comment),
            _ => Err(format!("Invalid action: {s}")),
        }
    }
}

impl Action {
    /// Todo list token for the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Pick => "pick",
            Action::Reword => "reword",
            Action::Edit => "edit",
            Action::Squash => "squash",
            Action::Fixup => "fixup",
            Action::Comment => "comment",
        }
    }
}

/// Terminal status reported by the rebase executor for one operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RebaseStatus {
    /// All steps were applied
    Ok,

    /// There was nothing to rebase
    UpToDate,

    /// The rebase stopped and waits for the user
    Stopped,

    /// The rebase stopped on an `edit` step
    Edit,

    /// The rebase stopped on conflicts
    Conflicts,

    /// The working tree has changes that block the rebase
    UncommittedChanges,

    /// The rebase was aborted
    Aborted,

    /// The executor could not complete the operation
    Failed,
}

impl RebaseStatus {
    /// Whether the rebase finished without stopping.
    pub fn is_successful(&self) -> bool {
        matches!(self, RebaseStatus::Ok | RebaseStatus::UpToDate)
    }

    /// Runner state an operation with this status resolves to.
    pub fn runner_state(&self) -> RunnerState {
        match self {
            RebaseStatus::Ok | RebaseStatus::UpToDate => RunnerState::Completed,
            RebaseStatus::Stopped | RebaseStatus::Edit | RebaseStatus::Conflicts => {
                RunnerState::Stopped
            }
            RebaseStatus::Aborted => RunnerState::Aborted,
            RebaseStatus::Failed | RebaseStatus::UncommittedChanges => RunnerState::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RebaseStatus::Ok => "ok",
            RebaseStatus::UpToDate => "up to date",
            RebaseStatus::Stopped => "stopped",
            RebaseStatus::Edit => "stopped for edit",
            RebaseStatus::Conflicts => "stopped on conflicts",
            RebaseStatus::UncommittedChanges => "blocked by uncommitted changes",
            RebaseStatus::Aborted => "aborted",
            RebaseStatus::Failed => "failed",
        }
    }
}

/// State of the operation runner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    /// No operation has run in this session
    #[default]
    Idle,

    /// An operation is scheduled or executing
    Running,

    /// The rebase stopped and can be continued, skipped or aborted
    Stopped,

    /// The rebase finished
    Completed,

    /// The rebase was aborted
    Aborted,

    /// The last operation failed
    Failed,
}

impl RunnerState {
    /// Idle, or a terminal state from which a new rebase may begin.
    pub fn is_at_rest(&self) -> bool {
        matches!(
            self,
            RunnerState::Idle | RunnerState::Completed | RunnerState::Aborted | RunnerState::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerState::Idle => "idle",
            RunnerState::Running => "running",
            RunnerState::Stopped => "stopped",
            RunnerState::Completed => "completed",
            RunnerState::Aborted => "aborted",
            RunnerState::Failed => "failed",
        }
    }
}
