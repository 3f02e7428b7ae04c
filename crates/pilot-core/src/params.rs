//! Parameter structures shared by the interfaces.
//!
//! These carry no framework derives; the CLI wraps them with clap and
//! converts into them. Each edit parses from the compact text form the CLI
//! accepts:
//!
//! ```text
//! 2:0            move the step at index 2 to index 0
//! squash:1,3     mark steps 1 and 3 as squash
//! drop:2         drop step 2
//! ```

use std::str::FromStr;

use crate::{
    error::{PilotError, Result},
    models::Action,
    plan::Plan,
};

/// Move the step at `from` to `to`, shifting the steps in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStep {
    pub from: usize,
    pub to: usize,
}

impl FromStr for MoveStep {
    type Err = PilotError;

    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s.split_once(':').ok_or_else(|| {
            PilotError::invalid_input("move").with_reason(format!("expected FROM:TO, got '{s}'"))
        })?;
        Ok(Self {
            from: parse_index("move", from)?,
            to: parse_index("move", to)?,
        })
    }
}

/// Set the action of every step in `indices`; `None` drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSteps {
    pub indices: Vec<usize>,
    pub action: Option<Action>,
}

impl FromStr for MarkSteps {
    type Err = PilotError;

    fn from_str(s: &str) -> Result<Self> {
        let (action, indices) = s.split_once(':').ok_or_else(|| {
            PilotError::invalid_input("mark")
                .with_reason(format!("expected ACTION:INDEX[,INDEX...], got '{s}'"))
        })?;
        let action = parse_action(action)?;
        let indices = indices
            .split(',')
            .map(|index| parse_index("mark", index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { indices, action })
    }
}

/// One edit of the todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEdit {
    Move(MoveStep),
    MoveUp(usize),
    MoveDown(usize),
    Mark(MarkSteps),
}

impl PlanEdit {
    /// Apply this edit to `plan`.
    pub fn apply(&self, plan: &mut Plan) -> Result<()> {
        match self {
            PlanEdit::Move(MoveStep { from, to }) => plan.move_step(*from, *to),
            PlanEdit::MoveUp(index) => {
                plan.check_index(*index)?;
                plan.move_up(*index);
                Ok(())
            }
            PlanEdit::MoveDown(index) => {
                plan.check_index(*index)?;
                plan.move_down(*index);
                Ok(())
            }
            PlanEdit::Mark(MarkSteps { indices, action }) => plan.mark_all(indices, *action),
        }
    }
}

impl From<MoveStep> for PlanEdit {
    fn from(params: MoveStep) -> Self {
        PlanEdit::Move(params)
    }
}

impl From<MarkSteps> for PlanEdit {
    fn from(params: MarkSteps) -> Self {
        PlanEdit::Mark(params)
    }
}

/// Start a rebase and answer its decisions from these values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeginRebase {
    pub upstream: String,
    /// Edits applied when the todo list is first prepared
    pub edits: Vec<PlanEdit>,
    /// Replacement messages for rewords, in order
    pub messages: Vec<String>,
}

/// Resume a stopped rebase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinueRebase {
    /// Replacement messages for rewords, in order
    pub messages: Vec<String>,
    /// Continue even if the todo list changed behind our back
    pub force: bool,
}

/// Apply `edits` in order, stopping at the first invalid one.
pub fn apply_edits(plan: &mut Plan, edits: &[PlanEdit]) -> Result<()> {
    edits.iter().try_for_each(|edit| edit.apply(plan))
}

/// Parse an action token; `drop` (or `d`) yields `None`.
pub fn parse_action(token: &str) -> Result<Option<Action>> {
    match token.trim() {
        "drop" | "d" => Ok(None),
        other => other.parse().map(Some).map_err(|_| {
            PilotError::invalid_input("action").with_reason(format!("unknown action '{other}'"))
        }),
    }
}

fn parse_index(field: &str, text: &str) -> Result<usize> {
    text.trim().parse().map_err(|_| {
        PilotError::invalid_input(field).with_reason(format!("'{text}' is not a step index"))
    })
}
