//! Hand-off between the rebase worker and the interactive side.
//!
//! The worker reaches a decision point, publishes it on the result queue and
//! blocks on the [`RendezvousChannel`]. The interactive side edits the todo
//! list or supplies a message through the store and this coordinator, then
//! continues (or aborts) the worker.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::{
    error::Result,
    executor::InteractiveHandler,
    models::{InteractiveResult, PrepareOutcome, RebaseStatus, RewordOutcome, Step},
    rendezvous::RendezvousChannel,
    store::StepStore,
};

mod queue;

pub use queue::ResultQueue;

pub struct InteractiveCoordinator {
    store: Arc<dyn StepStore>,
    queue: Arc<ResultQueue>,
    channel: RendezvousChannel,
    abort_requested: AtomicBool,
    abort_pending: AtomicBool,
    last_step_list: Mutex<Option<Vec<Step>>>,
    supplied_message: Mutex<Option<String>>,
}

impl InteractiveCoordinator {
    pub fn new(store: Arc<dyn StepStore>) -> Self {
        let queue = Arc::new(ResultQueue::new());
        Self {
            store,
            channel: RendezvousChannel::new(Arc::clone(&queue)),
            queue,
            abort_requested: AtomicBool::new(false),
            abort_pending: AtomicBool::new(false),
            last_step_list: Mutex::new(None),
            supplied_message: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<dyn StepStore> {
        &self.store
    }

    pub fn queue(&self) -> &ResultQueue {
        &self.queue
    }

    /// Whether the worker is blocked on a decision.
    pub fn is_waiting(&self) -> bool {
        self.channel.is_waiting()
    }

    /// Reset per-operation state before a new job is scheduled.
    pub fn start_operation(&self) {
        if !self.channel.is_waiting() {
            self.abort_requested.store(false, Ordering::SeqCst);
            self.abort_pending.store(false, Ordering::SeqCst);
            self.channel.reset();
        }
        self.supplied_message.lock().take();
    }

    /// The step list as last observed at a decision point or forced update.
    pub fn last_step_list(&self) -> Option<Vec<Step>> {
        self.last_step_list.lock().clone()
    }

    /// Adopt the store's current list as the snapshot, after the interactive
    /// side wrote its own edits.
    pub fn force_update_last_step_list_to_current(&self) -> Result<()> {
        let current = self.store.read_steps()?;
        debug!("Step list snapshot updated ({} steps)", current.len());
        *self.last_step_list.lock() = Some(current);
        Ok(())
    }

    /// Message the next reword decision resolves to.
    pub fn supply_commit_message(&self, message: impl Into<String>) {
        *self.supplied_message.lock() = Some(message.into());
    }

    /// Release the waiting worker. With `check_conflicts`, refuse when the
    /// store's list no longer matches the last snapshot.
    pub fn continue_decision(&self, check_conflicts: bool) -> Result<bool> {
        if !check_conflicts {
            return Ok(self.channel.release());
        }
        let current = self.store.read_steps()?;
        let expected = self.last_step_list().unwrap_or_default();
        self.channel.release_with_conflict_check(&current, &expected)
    }

    /// Ask the worker to abort at its next decision point, releasing it if it
    /// is waiting now. Returns whether a waiting worker was released.
    pub fn request_abort(&self) -> bool {
        self.abort_pending.store(true, Ordering::SeqCst);
        self.abort_requested.store(true, Ordering::SeqCst);
        let released = self.channel.release();
        info!("Abort requested (worker waiting: {released})");
        released
    }

    pub fn is_abort_requested(&self) -> bool {
        self.abort_requested.load(Ordering::SeqCst)
    }

    pub fn job_started(&self) {
        self.queue.job_started();
    }

    /// Publish a job's final result.
    pub fn finish_job(&self, result: InteractiveResult) {
        self.queue.finish_job(result);
    }

    /// Next result for the interactive side, blocking while a job may still
    /// produce one.
    ///
    /// After an abort request, decision requests and non-aborted terminal
    /// results are discarded until the abort surfaces. Exceptions always
    /// surface.
    pub fn next_result(&self) -> Option<InteractiveResult> {
        loop {
            let result = self.queue.next()?;
            if !self.abort_pending.load(Ordering::SeqCst) {
                return Some(result);
            }
            match result {
                InteractiveResult::Terminal {
                    status: RebaseStatus::Aborted,
                }
                | InteractiveResult::Exception { .. } => {
                    self.abort_pending.store(false, Ordering::SeqCst);
                    return Some(result);
                }
                other => debug!("Discarding {other:?} after abort"),
            }
        }
    }
}

impl InteractiveHandler for InteractiveCoordinator {
    fn prepare_steps(&self, steps: Vec<Step>) -> PrepareOutcome {
        if self.is_abort_requested() {
            return PrepareOutcome::Aborted;
        }

        *self.last_step_list.lock() = Some(steps.clone());
        info!("Waiting for the todo list to be prepared ({} steps)", steps.len());
        self.channel.deposit(InteractiveResult::Prepare {
            steps: steps.clone(),
        });

        if self.is_abort_requested() {
            return PrepareOutcome::Aborted;
        }
        match self.store.read_steps() {
            Ok(current) => PrepareOutcome::Proceed(current),
            Err(e) => {
                warn!("Failed to re-read the todo list, keeping the prepared one: {e}");
                PrepareOutcome::Proceed(steps)
            }
        }
    }

    fn modify_commit_message(&self, original: &str) -> RewordOutcome {
        if self.is_abort_requested() {
            return RewordOutcome::Abort;
        }

        match self.store.read_steps() {
            Ok(current) => *self.last_step_list.lock() = Some(current),
            Err(e) => warn!("Failed to snapshot the todo list before reword: {e}"),
        }
        self.supplied_message.lock().take();
        info!("Waiting for a new commit message");
        self.channel.deposit(InteractiveResult::Reword {
            commit_message: original.to_string(),
        });

        if self.is_abort_requested() {
            return RewordOutcome::Abort;
        }
        let message = self
            .supplied_message
            .lock()
            .take()
            .unwrap_or_else(|| original.to_string());
        RewordOutcome::Message(message)
    }
}

#[cfg(test)]
mod tests;
