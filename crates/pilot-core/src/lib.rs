//! Core library for coordinating interactive rebases.
//!
//! An interactive rebase runs on a background worker that hands control back
//! at two decision points: once the todo list is prepared, and whenever a
//! commit is reworded. This crate owns the editable todo list, the handshake
//! that blocks the worker until a decision is made, and the lifecycle of the
//! operations around it.
//!
//! # Architecture
//!
//! ```text
//!  Interface ──▶ Pilot ──▶ OperationRunner ──▶ Scheduler ──▶ RebaseExecutor
//!      ▲           │              │                               │
//!      │           ▼              ▼                               ▼
//!      │         Plan ◀──▶ StepStore ◀──────────── InteractiveCoordinator
//!      │                                                 │
//!      └──────────── next_result ◀── ResultQueue ◀───────┘
//! ```
//!
//! - [`plan`]: the todo list being edited and its reorder/mark operations
//! - [`store`]: authoritative step lists ([`GitTodoStore`], [`MemoryStore`])
//! - [`rendezvous`]: the one-slot worker/interactive handshake
//! - [`coordinator`]: decision callbacks and result delivery
//! - [`runner`]: begin/continue/skip/abort state machine and job scheduling
//! - [`executor`]: the rebase executor boundary and the git implementation
//! - [`pilot`]: the async facade used by interfaces
//! - [`handlers`]: drivers answering decisions from values given up front
//! - [`display`]: markdown formatting for terminal rendering
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pilot_core::{params::MoveStep, PilotBuilder, InteractiveResult};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pilot = PilotBuilder::new()
//!     .with_repository(Some("/path/to/repo"))
//!     .build()
//!     .await?;
//!
//! pilot.begin("origin/main").await?;
//! while let Some(result) = pilot.next_result().await? {
//!     match result {
//!         InteractiveResult::Prepare { .. } => {
//!             pilot.edit_plan(vec![MoveStep { from: 2, to: 0 }.into()]).await?;
//!             pilot.force_update_last_step_list_to_current().await?;
//!             pilot.continue_rebase().await?;
//!         }
//!         InteractiveResult::Reword { commit_message } => {
//!             pilot.supply_commit_message(commit_message.to_uppercase());
//!             pilot.continue_rebase().await?;
//!         }
//!         other => println!("{other}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coordinator;
pub mod display;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod params;
pub mod pilot;
pub mod plan;
pub mod rendezvous;
pub mod runner;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::PilotConfig;
pub use coordinator::{InteractiveCoordinator, ResultQueue};
pub use display::{LocalDateTime, OperationStatus, SessionStatus, StatusKind, Steps};
pub use error::{PilotError, Result};
pub use executor::{ExecutorError, GitCliExecutor, InteractiveHandler, RebaseExecutor};
pub use models::{
    Action, CommitId, InteractiveResult, PrepareOutcome, RebaseOperation, RebaseStatus,
    RewordOutcome, RunnerState, Step,
};
pub use params::{BeginRebase, ContinueRebase, MarkSteps, MoveStep, PlanEdit};
pub use pilot::{Pilot, PilotBuilder};
pub use plan::Plan;
pub use rendezvous::RendezvousChannel;
pub use runner::{ExclusivityKey, OperationRunner, Scheduler, TokioScheduler};
pub use store::{GitTodoStore, MemoryStore, StepStore};
