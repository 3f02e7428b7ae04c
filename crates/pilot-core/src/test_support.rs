//! Scripted executor over a [`MemoryStore`] for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    executor::{ExecutorError, InteractiveHandler, RebaseExecutor},
    models::{Action, PrepareOutcome, RebaseOperation, RebaseStatus, RewordOutcome, Step},
    store::{MemoryStore, StepStore},
};

pub const MISSING_UPSTREAM: &str = "missing";
pub const PANIC_UPSTREAM: &str = "explode";

pub fn commits() -> Vec<Step> {
    vec![
        Step::new("aaa1111", "A", Action::Pick),
        Step::new("bbb2222", "B", Action::Pick),
        Step::new("ccc3333", "C", Action::Pick),
    ]
}

/// Applies the todo list one step at a time, stopping on `edit` and asking
/// for a message on `reword`.
pub struct ScriptedExecutor {
    store: Arc<MemoryStore>,
    commits: Vec<Step>,
    runs: Mutex<Vec<RebaseOperation>>,
    applied: Mutex<Vec<Step>>,
    messages: Mutex<Vec<(String, String)>>,
}

impl ScriptedExecutor {
    pub fn new(store: Arc<MemoryStore>, commits: Vec<Step>) -> Self {
        Self {
            store,
            commits,
            runs: Mutex::new(Vec::new()),
            applied: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn runs(&self) -> Vec<RebaseOperation> {
        self.runs.lock().clone()
    }

    pub fn applied(&self) -> Vec<Step> {
        self.applied.lock().clone()
    }

    /// Replacement messages as `(commit id, message)`.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().clone()
    }

    fn apply(&self, handler: &dyn InteractiveHandler) -> Result<RebaseStatus, ExecutorError> {
        loop {
            let Some(step) = self.store.apply_next() else {
                self.store.finish();
                return Ok(RebaseStatus::Ok);
            };
            match step.action {
                Some(Action::Reword) => match handler.modify_commit_message(step.short_message()) {
                    RewordOutcome::Abort => {
                        self.store.finish();
                        return Ok(RebaseStatus::Aborted);
                    }
                    RewordOutcome::Message(message) => {
                        self.messages
                            .lock()
                            .push((step.commit_id.to_string(), message));
                    }
                },
                Some(Action::Edit) => {
                    self.applied.lock().push(step);
                    return Ok(RebaseStatus::Edit);
                }
                Some(Action::Comment) | None => continue,
                Some(_) => {}
            }
            self.applied.lock().push(step);
        }
    }
}

impl RebaseExecutor for ScriptedExecutor {
    fn run(
        &self,
        operation: &RebaseOperation,
        handler: &dyn InteractiveHandler,
    ) -> Result<RebaseStatus, ExecutorError> {
        self.runs.lock().push(operation.clone());
        match operation {
            RebaseOperation::Begin { upstream } => {
                if upstream == MISSING_UPSTREAM {
                    return Err(ExecutorError::RefNotFound {
                        name: upstream.clone(),
                    });
                }
                if upstream == PANIC_UPSTREAM {
                    panic!("executor blew up");
                }
                if self.commits.is_empty() {
                    return Ok(RebaseStatus::UpToDate);
                }
                self.store.start(self.commits.clone());
                match handler.prepare_steps(self.commits.clone()) {
                    PrepareOutcome::Aborted => {
                        self.store.finish();
                        Ok(RebaseStatus::Aborted)
                    }
                    PrepareOutcome::Proceed(steps) => {
                        self.store.write_steps(&steps)?;
                        self.apply(handler)
                    }
                }
            }
            RebaseOperation::Continue => {
                if !self.store.is_interactive_rebase()? {
                    return Err(ExecutorError::Internal {
                        message: "no rebase in progress".to_string(),
                    });
                }
                self.apply(handler)
            }
            RebaseOperation::Skip => {
                self.applied.lock().pop();
                self.apply(handler)
            }
            RebaseOperation::Abort => {
                self.store.finish();
                Ok(RebaseStatus::Aborted)
            }
        }
    }
}
