//! Authoritative step lists consulted by the rebase executor.
//!
//! A [`StepStore`] answers whether an interactive rebase is in progress and
//! reads or writes its todo list. The [`Plan`](crate::plan::Plan) is an
//! editable projection of it; the executor reads it back when it resumes.
//!
//! - [`GitTodoStore`]: git's on-disk todo list under the repository's git dir
//! - [`MemoryStore`]: an in-process store for embedding and tests
//! - [`todo_file`]: the line format shared by both

use jiff::Timestamp;

use crate::{error::Result, models::Step};

pub mod git;
pub mod memory;
pub mod todo_file;

pub use git::GitTodoStore;
pub use memory::MemoryStore;

/// Reads and writes the step list of an interactive rebase.
///
/// Every method re-reads the underlying state; implementations must not cache
/// the "rebase in progress" answer.
pub trait StepStore: Send + Sync {
    /// Whether an interactive rebase is in progress.
    fn is_interactive_rebase(&self) -> Result<bool>;

    /// Steps still to be applied.
    ///
    /// # Errors
    ///
    /// Returns [`PilotError::NotRebasing`](crate::PilotError::NotRebasing)
    /// when no interactive rebase is in progress.
    fn read_steps(&self) -> Result<Vec<Step>>;

    /// Steps already applied.
    fn read_done(&self) -> Result<Vec<Step>>;

    /// Replace the steps still to be applied.
    fn write_steps(&self, steps: &[Step]) -> Result<()>;

    /// When the rebase started, if known.
    fn started_at(&self) -> Result<Option<Timestamp>> {
        Ok(None)
    }
}
