//! Lifecycle of rebase operations in one repository.
//!
//! ```text
//! Idle ──begin──▶ Running ──▶ Completed | Aborted | Failed
//!                   │  ▲
//!            stops  ▼  │ continue / skip
//!                 Stopped
//! ```
//!
//! Every operation runs as a background job keyed by the repository, so two
//! operations on the same repository never overlap. Decision points inside a
//! job are answered through the [`InteractiveCoordinator`].

use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;

use crate::{
    coordinator::InteractiveCoordinator,
    error::{PilotError, Result},
    executor::RebaseExecutor,
    models::{InteractiveResult, RebaseOperation, RebaseStatus, RunnerState},
    store::StepStore,
};

pub mod scheduler;

pub use scheduler::{Completion, ExclusivityKey, Job, JobOutcome, Scheduler, TokioScheduler};

pub struct OperationRunner {
    key: ExclusivityKey,
    store: Arc<dyn StepStore>,
    executor: Arc<dyn RebaseExecutor>,
    scheduler: Arc<dyn Scheduler>,
    coordinator: Arc<InteractiveCoordinator>,
    state: Arc<Mutex<RunnerState>>,
}

impl OperationRunner {
    pub fn new(
        key: ExclusivityKey,
        executor: Arc<dyn RebaseExecutor>,
        scheduler: Arc<dyn Scheduler>,
        coordinator: Arc<InteractiveCoordinator>,
    ) -> Self {
        Self {
            key,
            store: Arc::clone(coordinator.store()),
            executor,
            scheduler,
            coordinator,
            state: Arc::new(Mutex::new(RunnerState::Idle)),
        }
    }

    pub fn state(&self) -> RunnerState {
        *self.state.lock()
    }

    pub fn coordinator(&self) -> &Arc<InteractiveCoordinator> {
        &self.coordinator
    }

    /// Start an interactive rebase onto `upstream`.
    pub fn begin(&self, upstream: &str) -> Result<()> {
        let upstream = upstream.trim();
        if upstream.is_empty() {
            return Err(PilotError::invalid_input("upstream").with_reason("cannot be empty"));
        }
        self.transition("begin", |state| state.is_at_rest())?;
        self.schedule(RebaseOperation::Begin {
            upstream: upstream.to_string(),
        });
        Ok(())
    }

    /// Release a pending decision, or resume a stopped rebase.
    ///
    /// With `throw_on_step_list_change`, a pending decision is only released
    /// when the todo list still matches the last snapshot; otherwise
    /// [`PilotError::StepListChanged`] carries the current list.
    pub fn continue_rebase(&self, throw_on_step_list_change: bool) -> Result<()> {
        if self.coordinator.is_waiting() {
            self.coordinator.continue_decision(throw_on_step_list_change)?;
            return Ok(());
        }

        let state = self.state();
        if state == RunnerState::Running {
            return Err(PilotError::InvalidTransition {
                operation: "continue",
                state,
            });
        }
        if state != RunnerState::Stopped && !self.store.is_interactive_rebase()? {
            return Err(PilotError::NothingToContinue);
        }
        self.transition("continue", |state| state != RunnerState::Running)?;
        self.schedule(RebaseOperation::Continue);
        Ok(())
    }

    /// Skip the commit the rebase stopped at.
    pub fn skip(&self) -> Result<()> {
        let state = self.state();
        let resumable = state == RunnerState::Stopped
            || (state.is_at_rest() && self.store.is_interactive_rebase()?);
        if !resumable {
            return Err(PilotError::InvalidTransition {
                operation: "skip",
                state,
            });
        }
        self.transition("skip", |state| state != RunnerState::Running)?;
        self.schedule(RebaseOperation::Skip);
        Ok(())
    }

    /// Abort the rebase. Safe in any state.
    ///
    /// A worker blocked on a decision is released and aborts itself. Otherwise
    /// an abort job is queued, which finds nothing to do if the rebase ended
    /// meanwhile. The runner stays `Running` until that job reports, so
    /// `continue` and `skip` cannot slip in behind it. With nothing to abort
    /// the runner moves straight to `Aborted`.
    pub fn abort(&self) -> Result<()> {
        let released = self.coordinator.request_abort();
        if released {
            return Ok(());
        }

        let mut state = self.state.lock();
        if *state == RunnerState::Running || self.store.is_interactive_rebase()? {
            *state = RunnerState::Running;
            drop(state);
            self.coordinator.job_started();
            self.submit(RebaseOperation::Abort);
        } else {
            info!("Nothing to abort");
            *state = RunnerState::Aborted;
        }
        Ok(())
    }

    fn transition(
        &self,
        operation: &'static str,
        allowed: impl Fn(RunnerState) -> bool,
    ) -> Result<()> {
        let mut state = self.state.lock();
        if !allowed(*state) {
            return Err(PilotError::InvalidTransition {
                operation,
                state: *state,
            });
        }
        *state = RunnerState::Running;
        Ok(())
    }

    fn schedule(&self, operation: RebaseOperation) {
        self.coordinator.start_operation();
        self.coordinator.job_started();
        self.submit(operation);
    }

    fn submit(&self, operation: RebaseOperation) {
        info!("Scheduling {operation}");
        let executor = Arc::clone(&self.executor);
        let coordinator = Arc::clone(&self.coordinator);
        let store = Arc::clone(&self.store);
        let job: Job = Box::new(move || {
            if operation == RebaseOperation::Abort && !store.is_interactive_rebase()? {
                info!("Rebase already finished, nothing to abort");
                return Ok(RebaseStatus::Aborted);
            }
            executor.run(&operation, coordinator.as_ref())
        });

        let coordinator = Arc::clone(&self.coordinator);
        let state = Arc::clone(&self.state);
        let on_complete: Completion = Box::new(move |outcome| {
            let (result, next) = match outcome {
                Ok(status) => (InteractiveResult::Terminal { status }, status.runner_state()),
                Err(error) => {
                    warn!("Rebase job failed: {error}");
                    (InteractiveResult::Exception { error }, RunnerState::Failed)
                }
            };
            *state.lock() = next;
            coordinator.finish_job(result);
        });

        self.scheduler.schedule(&self.key, job, on_complete);
    }
}
