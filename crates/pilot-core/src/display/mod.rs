//! Display formatting for steps, plans and session status.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collection and status wrappers live in the submodules below. All output
//! is markdown so the CLI renderer can style it.
//!
//! - [`collections`]: indexed step lists ([`Steps`])
//! - [`session`]: repository rebase status ([`SessionStatus`])
//! - [`status`]: confirmation messages ([`OperationStatus`])
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod models;
pub mod session;
pub mod status;

pub use collections::Steps;
pub use session::{LocalDateTime, SessionStatus};
pub use status::{OperationStatus, StatusKind};
