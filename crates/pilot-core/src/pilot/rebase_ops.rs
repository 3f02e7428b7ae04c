//! Rebase lifecycle operations for the Pilot.

use std::sync::Arc;

use super::{blocking, Pilot};
use crate::{
    error::Result,
    models::{InteractiveResult, RunnerState},
};

impl Pilot {
    /// Starts an interactive rebase of the current branch onto `upstream`.
    ///
    /// The first result is a `Prepare` request once the todo list is ready.
    pub async fn begin(&self, upstream: &str) -> Result<()> {
        self.runner.begin(upstream)
    }

    /// Continues with the configured step-list conflict check.
    pub async fn continue_rebase(&self) -> Result<()> {
        self.continue_rebase_with(self.config.throw_on_step_list_change)
            .await
    }

    /// Releases a pending decision or resumes a stopped rebase.
    pub async fn continue_rebase_with(&self, throw_on_step_list_change: bool) -> Result<()> {
        let runner = Arc::clone(&self.runner);

        blocking(move || runner.continue_rebase(throw_on_step_list_change)).await
    }

    /// Skips the commit the rebase stopped at.
    pub async fn skip(&self) -> Result<()> {
        let runner = Arc::clone(&self.runner);

        blocking(move || runner.skip()).await
    }

    /// Aborts the rebase, whatever state it is in.
    pub async fn abort(&self) -> Result<()> {
        let runner = Arc::clone(&self.runner);

        blocking(move || runner.abort()).await
    }

    /// Message used when the pending reword is continued.
    pub fn supply_commit_message(&self, message: impl Into<String>) {
        self.runner.coordinator().supply_commit_message(message);
    }

    /// Waits for the next decision request or terminal result. `None` once
    /// no job is left to produce one.
    pub async fn next_result(&self) -> Result<Option<InteractiveResult>> {
        let runner = Arc::clone(&self.runner);

        blocking(move || Ok(runner.coordinator().next_result())).await
    }

    pub fn state(&self) -> RunnerState {
        self.runner.state()
    }
}
