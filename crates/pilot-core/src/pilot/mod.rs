//! Async facade over one repository's rebase session.
//!
//! [`Pilot`] ties a [`StepStore`], an [`OperationRunner`] and the
//! [`InteractiveCoordinator`](crate::InteractiveCoordinator) together and
//! exposes them to async callers. Blocking work (file I/O, waiting for the
//! worker) runs on tokio's blocking pool.
//!
//! - [`builder`]: resolves the repository and wires the parts together
//! - `plan_ops`: reading, editing and saving the todo list
//! - `rebase_ops`: begin, continue, skip, abort and result delivery
//!
//! ```no_run
//! use pilot_core::{params::MarkSteps, PilotBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pilot = PilotBuilder::new()
//!     .with_repository(Some("/path/to/repo"))
//!     .build()
//!     .await?;
//!
//! pilot.begin("main").await?;
//! while let Some(result) = pilot.next_result().await? {
//!     if result.is_decision() {
//!         let mark: MarkSteps = "squash:1".parse()?;
//!         pilot.edit_plan(vec![mark.into()]).await?;
//!         pilot.force_update_last_step_list_to_current().await?;
//!         pilot.continue_rebase().await?;
//!     } else {
//!         println!("{result}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use crate::{
    config::PilotConfig,
    error::{PilotError, Result},
    runner::OperationRunner,
    store::StepStore,
};

pub mod builder;
mod plan_ops;
mod rebase_ops;

pub use builder::PilotBuilder;

/// Rebase session of one repository.
pub struct Pilot {
    repository: PathBuf,
    config: PilotConfig,
    store: Arc<dyn StepStore>,
    runner: Arc<OperationRunner>,
}

impl Pilot {
    fn new(
        repository: PathBuf,
        config: PilotConfig,
        store: Arc<dyn StepStore>,
        runner: Arc<OperationRunner>,
    ) -> Self {
        Self {
            repository,
            config,
            store,
            runner,
        }
    }

    pub fn repository(&self) -> &Path {
        &self.repository
    }

    pub fn config(&self) -> &PilotConfig {
        &self.config
    }
}

/// Run blocking work on tokio's blocking pool.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| PilotError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
