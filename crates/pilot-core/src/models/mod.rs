//! Data models for rebase steps, statuses and interactive results.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures apart from
//! presentation.
//!
//! # Examples
//!
//! ```rust
//! use pilot_core::models::{Action, Step};
//!
//! let step = Step::new("a1b2c3d", "Fix parser", Action::Pick);
//! assert_eq!(format!("{step}"), "pick a1b2c3d Fix parser");
//!
//! let dropped = Step::with_action("a1b2c3d", "Fix parser", None);
//! assert!(dropped.is_drop());
//! ```

pub mod operation;
pub mod result;
pub mod status;
pub mod step;


pub use operation::RebaseOperation;
pub use result::{InteractiveResult, PrepareOutcome, RewordOutcome};
pub use status::{Action, RebaseStatus, RunnerState};
pub use step::{same_decisions, CommitId, Step};
