//! Non-interactive drivers for whole rebase operations.
//!
//! A handler starts an operation and then answers every decision the worker
//! asks for from values decided up front, until the operation completes or
//! stops. Each result is passed to an observer as it arrives, so interfaces
//! can render progress.
//!
//! ```text
//! Prepare  → apply the planned edits, write the todo list, continue
//! Reword   → supply the next planned message (or keep the original), continue
//! Terminal → observed; the drive ends when no job is left
//! ```
//!
//! ```rust,no_run
//! # use pilot_core::{handlers::handle_begin, params::BeginRebase, PilotBuilder};
//! # async {
//! let pilot = PilotBuilder::new().build().await?;
//! let params = BeginRebase {
//!     upstream: "main".to_string(),
//!     ..Default::default()
//! };
//! let state = handle_begin(&pilot, &params, |result| println!("{result}")).await?;
//! # Result::<(), pilot_core::PilotError>::Ok(())
//! # };
//! ```

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::{
    models::{InteractiveResult, RunnerState},
    params::{BeginRebase, ContinueRebase, PlanEdit},
    Pilot, Result,
};

/// Answers to the decisions of one operation.
#[derive(Debug, Clone, Default)]
pub struct Decisions {
    /// Edits for the first `Prepare` request
    pub edits: Vec<PlanEdit>,
    /// Messages for `Reword` requests, consumed in order
    pub messages: VecDeque<String>,
    /// Skip the step-list conflict check when continuing
    pub force: bool,
}

/// Handle beginning a rebase onto `params.upstream` and driving it.
///
/// Returns the runner state once the rebase completed, stopped, or failed.
pub async fn handle_begin<F>(
    pilot: &Pilot,
    params: &BeginRebase,
    observe: F,
) -> Result<RunnerState>
where
    F: FnMut(&InteractiveResult),
{
    let mut decisions = Decisions {
        edits: params.edits.clone(),
        messages: params.messages.iter().cloned().collect(),
        force: false,
    };
    pilot.begin(&params.upstream).await?;
    handle_drive(pilot, &mut decisions, observe).await
}

/// Handle resuming a stopped rebase and driving it.
pub async fn handle_continue<F>(
    pilot: &Pilot,
    params: &ContinueRebase,
    observe: F,
) -> Result<RunnerState>
where
    F: FnMut(&InteractiveResult),
{
    let mut decisions = Decisions {
        edits: Vec::new(),
        messages: params.messages.iter().cloned().collect(),
        force: params.force,
    };
    pilot.continue_rebase_with(throw_on_change(pilot, params.force)).await?;
    handle_drive(pilot, &mut decisions, observe).await
}

/// Handle skipping the commit the rebase stopped at.
pub async fn handle_skip<F>(pilot: &Pilot, observe: F) -> Result<RunnerState>
where
    F: FnMut(&InteractiveResult),
{
    pilot.skip().await?;
    handle_drive(pilot, &mut Decisions::default(), observe).await
}

/// Handle aborting the rebase.
pub async fn handle_abort<F>(pilot: &Pilot, observe: F) -> Result<RunnerState>
where
    F: FnMut(&InteractiveResult),
{
    pilot.abort().await?;
    handle_drive(pilot, &mut Decisions::default(), observe).await
}

/// Answer decisions from `decisions` until no job is left.
pub async fn handle_drive<F>(
    pilot: &Pilot,
    decisions: &mut Decisions,
    mut observe: F,
) -> Result<RunnerState>
where
    F: FnMut(&InteractiveResult),
{
    let throw = throw_on_change(pilot, decisions.force);

    while let Some(result) = pilot.next_result().await? {
        observe(&result);
        let answered = match &result {
            InteractiveResult::Prepare { steps } => {
                debug!("Preparing {} steps", steps.len());
                answer_prepare(pilot, decisions, throw).await
            }
            InteractiveResult::Reword { .. } => {
                if let Some(message) = decisions.messages.pop_front() {
                    pilot.supply_commit_message(message);
                }
                pilot.continue_rebase_with(throw).await
            }
            InteractiveResult::Terminal { status } => {
                info!("Rebase {status}");
                Ok(())
            }
            InteractiveResult::Exception { error } => {
                info!("Rebase failed: {error}");
                Ok(())
            }
        };

        if let Err(error) = answered {
            warn!("Could not answer {}, aborting: {error}", describe(&result));
            abandon(pilot).await?;
            return Err(error);
        }
    }

    Ok(pilot.state())
}

async fn answer_prepare(pilot: &Pilot, decisions: &mut Decisions, throw: bool) -> Result<()> {
    if !decisions.edits.is_empty() {
        let edits = std::mem::take(&mut decisions.edits);
        let plan = pilot.edit_plan(edits).await?;
        info!("Todo list edited ({} steps)", plan.len());
    }
    pilot.force_update_last_step_list_to_current().await?;
    pilot.continue_rebase_with(throw).await
}

/// Abort the operation and wait for its job to finish, so no worker is left
/// blocked on a decision nobody will answer.
async fn abandon(pilot: &Pilot) -> Result<()> {
    pilot.abort().await?;
    while let Some(result) = pilot.next_result().await? {
        debug!("Drained {} after abort", describe(&result));
    }
    Ok(())
}

fn describe(result: &InteractiveResult) -> &'static str {
    match result {
        InteractiveResult::Prepare { .. } => "prepare request",
        InteractiveResult::Reword { .. } => "reword request",
        InteractiveResult::Terminal { .. } => "terminal result",
        InteractiveResult::Exception { .. } => "exception",
    }
}

fn throw_on_change(pilot: &Pilot, force: bool) -> bool {
    pilot.config().throw_on_step_list_change && !force
}
