//! In-process step store.

use jiff::Timestamp;
use parking_lot::Mutex;

use super::StepStore;
use crate::{
    error::{PilotError, Result},
    models::Step,
};

#[derive(Debug, Default)]
struct MemoryState {
    rebasing: bool,
    started_at: Option<Timestamp>,
    todo: Vec<Step>,
    done: Vec<Step>,
    writes: usize,
}

/// Step store held in memory, for executors that keep their state in
/// process and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates a store with no rebase in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with an interactive rebase in progress over `todo`.
    pub fn rebasing(todo: Vec<Step>) -> Self {
        let store = Self::new();
        store.start(todo);
        store
    }

    /// Begin a rebase over `todo`, forgetting any previous state.
    pub fn start(&self, todo: Vec<Step>) {
        let mut state = self.state.lock();
        state.rebasing = true;
        state.started_at = Some(Timestamp::now());
        state.todo = todo;
        state.done.clear();
    }

    /// End the rebase; the store stops reporting a rebase in progress.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        state.rebasing = false;
        state.started_at = None;
        state.todo.clear();
        state.done.clear();
    }

    /// Move the first todo step to the done list, returning it.
    pub fn apply_next(&self) -> Option<Step> {
        let mut state = self.state.lock();
        if state.todo.is_empty() {
            return None;
        }
        let step = state.todo.remove(0);
        state.done.push(step.clone());
        Some(step)
    }

    /// Number of successful [`StepStore::write_steps`] calls.
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }
}

impl StepStore for MemoryStore {
    fn is_interactive_rebase(&self) -> Result<bool> {
        Ok(self.state.lock().rebasing)
    }

    fn read_steps(&self) -> Result<Vec<Step>> {
        let state = self.state.lock();
        if !state.rebasing {
            return Err(PilotError::NotRebasing);
        }
        Ok(state.todo.clone())
    }

    fn read_done(&self) -> Result<Vec<Step>> {
        let state = self.state.lock();
        if !state.rebasing {
            return Err(PilotError::NotRebasing);
        }
        Ok(state.done.clone())
    }

    fn write_steps(&self, steps: &[Step]) -> Result<()> {
        let mut state = self.state.lock();
        if !state.rebasing {
            return Err(PilotError::NotRebasing);
        }
        state.todo = steps.to_vec();
        state.writes += 1;
        Ok(())
    }

    fn started_at(&self) -> Result<Option<Timestamp>> {
        Ok(self.state.lock().started_at)
    }
}
