//! Builder for creating and configuring Pilot instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::task;

use super::Pilot;
use crate::{
    config::PilotConfig,
    coordinator::InteractiveCoordinator,
    error::{IoResultExt, PilotError, Result},
    executor::{GitCliExecutor, RebaseExecutor},
    runner::{ExclusivityKey, OperationRunner, Scheduler, TokioScheduler},
    store::StepStore,
};

/// Builder for creating and configuring Pilot instances.
#[derive(Clone, Default)]
pub struct PilotBuilder {
    repository: Option<PathBuf>,
    config: Option<PilotConfig>,
    store: Option<Arc<dyn StepStore>>,
    executor: Option<Arc<dyn RebaseExecutor>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl PilotBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the repository to operate on.
    ///
    /// If not specified, the current working directory is used.
    pub fn with_repository<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.repository = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the configuration. Defaults to [`PilotConfig::default`].
    pub fn with_config(mut self, config: PilotConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses `store` instead of git's todo list.
    pub fn with_store(mut self, store: Arc<dyn StepStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses `executor` instead of the git command line.
    pub fn with_executor(mut self, executor: Arc<dyn RebaseExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Uses `scheduler` instead of one on the current tokio runtime.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Builds the configured pilot.
    ///
    /// Unless both a store and an executor were supplied, the repository's
    /// git dir is located with `git rev-parse`.
    ///
    /// # Errors
    ///
    /// Returns `PilotError::FileSystem` if the current directory is unusable
    /// Returns `PilotError::Executor` if the repository cannot be located
    ///
    /// # Panics
    ///
    /// Panics when no scheduler was supplied and this is called outside a
    /// tokio runtime.
    pub async fn build(self) -> Result<Pilot> {
        let repository = match self.repository {
            Some(path) => path,
            None => std::env::current_dir().fs_context(Path::new("."))?,
        };
        let config = self.config.unwrap_or_default();

        let (store, executor, key) = match (self.store, self.executor) {
            (Some(store), Some(executor)) => {
                (store, executor, ExclusivityKey::new(repository.clone()))
            }
            (store, executor) => {
                let git_binary = config.git_binary.clone();
                let repo = repository.clone();
                let git =
                    task::spawn_blocking(move || GitCliExecutor::discover(&git_binary, &repo))
                        .await
                        .map_err(|e| PilotError::Configuration {
                            message: format!("Task join error: {e}"),
                        })??;
                let key = ExclusivityKey::new(git.store().git_dir());
                let store: Arc<dyn StepStore> = match store {
                    Some(store) => store,
                    None => Arc::new(git.store().clone()),
                };
                let executor: Arc<dyn RebaseExecutor> = match executor {
                    Some(executor) => executor,
                    None => Arc::new(git),
                };
                (store, executor, key)
            }
        };
        debug!("Pilot for {} keyed on {key}", repository.display());

        let scheduler: Arc<dyn Scheduler> = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::current()),
        };
        let coordinator = Arc::new(InteractiveCoordinator::new(Arc::clone(&store)));
        let runner = Arc::new(OperationRunner::new(key, executor, scheduler, coordinator));

        Ok(Pilot::new(repository, config, store, runner))
    }
}
