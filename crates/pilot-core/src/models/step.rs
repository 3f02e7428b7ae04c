//! Step model definition and related functionality.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Action;

/// Abbreviated object id of the commit a step applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Wraps an (abbreviated) object id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as written in the todo list.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `other` names the same commit, allowing either side to be an
    /// abbreviation of the other.
    pub fn matches(&self, other: &str) -> bool {
        !self.0.is_empty()
            && !other.is_empty()
            && (self.0.starts_with(other) || other.starts_with(self.0.as_str()))
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Represents one commit to be processed during the rebase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Abbreviated id of the commit
    pub commit_id: CommitId,

    /// What to do with the commit; `None` marks the step as dropped
    pub action: Option<Action>,

    /// Subject line of the commit as it was when the step was read
    short_message: String,
}

impl Step {
    /// Creates a step with the given action.
    pub fn new(
        commit_id: impl Into<CommitId>,
        short_message: impl Into<String>,
        action: Action,
    ) -> Self {
        Self::with_action(commit_id, short_message, Some(action))
    }

    /// Creates a step with an optional action; `None` creates a drop marker.
    pub fn with_action(
        commit_id: impl Into<CommitId>,
        short_message: impl Into<String>,
        action: Option<Action>,
    ) -> Self {
        Self {
            commit_id: commit_id.into(),
            action,
            short_message: short_message.into(),
        }
    }

    /// Subject line snapshot.
    pub fn short_message(&self) -> &str {
        &self.short_message
    }

    /// A step without an action is dropped from the rebase.
    pub fn is_drop(&self) -> bool {
        self.action.is_none()
    }

    /// Whether the step is a commented-out skip marker.
    pub fn is_comment(&self) -> bool {
        self.action == Some(Action::Comment)
    }

    /// Compares commit identity and action, ignoring the message.
    pub fn same_decision(&self, other: &Step) -> bool {
        self.commit_id == other.commit_id && self.action == other.action
    }
}

/// Compares two step lists by size, order, commit id and action.
pub fn same_decisions(left: &[Step], right: &[Step]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|(l, r)| l.same_decision(r))
}
