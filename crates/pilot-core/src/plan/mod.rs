//! The editable step list of an interactive rebase.
//!
//! A [`Plan`] is a cached projection of the authoritative list held by a
//! [`StepStore`]: [`Plan::parse`] loads it, reorder and mark operations edit
//! it in memory, and [`Plan::persist`] writes the non-dropped steps back.
//! Applied steps (`done`) are read-only.
//!
//! ```rust
//! use pilot_core::{
//!     models::{Action, Step},
//!     plan::Plan,
//! };
//!
//! # fn main() -> pilot_core::Result<()> {
//! let mut plan = Plan::from_todo(vec![
//!     Step::new("aaa1111", "A", Action::Pick),
//!     Step::new("bbb2222", "B", Action::Pick),
//!     Step::new("ccc3333", "C", Action::Pick),
//! ]);
//! plan.move_step(2, 0)?;
//! plan.mark(1, Some(Action::Squash))?;
//!
//! let ids: Vec<_> = plan.create_steps_list().iter().map(|s| s.to_string()).collect();
//! assert_eq!(ids, ["pick ccc3333 C", "squash aaa1111 A", "pick bbb2222 B"]);
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::{
    error::Result,
    models::{same_decisions, Step},
    store::StepStore,
};

mod reorder;


/// Ordered todo list, applied steps and the list as first loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    todo: Vec<Step>,
    done: Vec<Step>,
    initial_snapshot: Option<Vec<Step>>,
}

impl Plan {
    /// Creates an empty plan; call [`Plan::parse`] to load it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plan already loaded with `todo`.
    pub fn from_todo(todo: Vec<Step>) -> Self {
        Self {
            initial_snapshot: Some(todo.clone()),
            todo,
            done: Vec::new(),
        }
    }

    /// Steps still to be applied, in execution order.
    pub fn todo(&self) -> &[Step] {
        &self.todo
    }

    /// Steps the executor already applied.
    pub fn done(&self) -> &[Step] {
        &self.done
    }

    /// The todo list as it was on the first successful load.
    pub fn initial_snapshot(&self) -> Option<&[Step]> {
        self.initial_snapshot.as_deref()
    }

    /// Get the todo step at `index`.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.todo.get(index)
    }

    pub fn len(&self) -> usize {
        self.todo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todo.is_empty()
    }

    /// The steps to persist: the todo list without drop markers.
    pub fn create_steps_list(&self) -> Vec<Step> {
        self.todo
            .iter()
            .filter(|step| !step.is_drop())
            .cloned()
            .collect()
    }

    /// Whether the executor has applied at least one step.
    pub fn has_started(&self) -> bool {
        !self.done.is_empty()
    }

    /// Whether the todo list differs from the initial snapshot in order,
    /// commit or action.
    pub fn is_modified(&self) -> bool {
        match &self.initial_snapshot {
            Some(initial) => !same_decisions(initial, &self.todo),
            None => false,
        }
    }

    /// Restore the todo list to the initial snapshot.
    pub fn reset(&mut self) {
        if let Some(initial) = &self.initial_snapshot {
            self.todo = initial.clone();
        }
    }

    /// Load `todo` and `done` from the store.
    ///
    /// Returns `Ok(false)` and leaves the plan untouched when the store does
    /// not report an interactive rebase in progress.
    pub fn parse(&mut self, store: &dyn StepStore) -> Result<bool> {
        if !store.is_interactive_rebase()? {
            debug!("Not parsing plan: no interactive rebase in progress");
            return Ok(false);
        }

        let todo = store.read_steps()?;
        let done = store.read_done()?;
        debug!("Parsed plan with {} todo and {} done steps", todo.len(), done.len());

        if self.initial_snapshot.is_none() {
            self.initial_snapshot = Some(todo.clone());
        }
        self.todo = todo;
        self.done = done;
        Ok(true)
    }

    /// Write the non-dropped todo steps back to the store.
    ///
    /// Returns `Ok(false)` when the store no longer reports an interactive
    /// rebase in progress.
    pub fn persist(&self, store: &dyn StepStore) -> Result<bool> {
        if !store.is_interactive_rebase()? {
            debug!("Not persisting plan: no interactive rebase in progress");
            return Ok(false);
        }

        let steps = self.create_steps_list();
        debug!("Persisting {} of {} todo steps", steps.len(), self.todo.len());
        store.write_steps(&steps)?;
        Ok(true)
    }
}
