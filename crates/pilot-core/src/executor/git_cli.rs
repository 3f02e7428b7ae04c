//! Rebase executor that drives the `git` command line.
//!
//! The initial todo list is staged in the git dir and handed to
//! `git rebase -i` through `GIT_SEQUENCE_EDITOR`, so the interactive side can
//! edit it before git starts. Later decisions (rewords) are taken whenever git
//! stops on a commit that was marked for rewording.

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use log::{debug, info, warn};

use super::{ExecutorError, InteractiveHandler, RebaseExecutor};
use crate::{
    models::{
        Action, CommitId, PrepareOutcome, RebaseOperation, RebaseStatus, RewordOutcome, Step,
    },
    store::GitTodoStore,
};

/// Runs rebases in one repository with the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCliExecutor {
    git_binary: String,
    repository: PathBuf,
    store: GitTodoStore,
}

impl GitCliExecutor {
    pub fn new(
        git_binary: impl Into<String>,
        repository: impl Into<PathBuf>,
        store: GitTodoStore,
    ) -> Self {
        Self {
            git_binary: git_binary.into(),
            repository: repository.into(),
            store,
        }
    }

    /// Locate the git dir of `repository` and build an executor for it.
    pub fn discover(git_binary: &str, repository: &Path) -> Result<Self, ExecutorError> {
        let output = Command::new(git_binary)
            .args(["rev-parse", "--absolute-git-dir"])
            .current_dir(repository)
            .output()
            .map_err(|source| ExecutorError::Io {
                context: format!("run {git_binary}"),
                source,
            })?;
        let git_dir = checked("rev-parse --absolute-git-dir", output)?;
        let git_dir = PathBuf::from(git_dir.trim());
        debug!("Using git dir {}", git_dir.display());

        Ok(Self::new(git_binary, repository, GitTodoStore::new(git_dir)))
    }

    pub fn store(&self) -> &GitTodoStore {
        &self.store
    }

    fn git_command(&self) -> Command {
        let mut command = Command::new(&self.git_binary);
        command
            .current_dir(&self.repository)
            .env("GIT_EDITOR", "true")
            .env_remove("GIT_SEQUENCE_EDITOR");
        command
    }

    fn git_output(&self, args: &[&str]) -> Result<Output, ExecutorError> {
        self.git_command()
            .args(args)
            .output()
            .map_err(|source| ExecutorError::Io {
                context: format!("run git {}", args.join(" ")),
                source,
            })
    }

    fn git_run(&self, args: &[&str]) -> Result<String, ExecutorError> {
        let output = self.git_output(args)?;
        checked(&args.join(" "), output)
    }

    fn begin(
        &self,
        upstream: &str,
        handler: &dyn InteractiveHandler,
    ) -> Result<RebaseStatus, ExecutorError> {
        if self.store.is_git_rebasing() {
            return Err(ExecutorError::Internal {
                message: "a rebase is already in progress".to_string(),
            });
        }
        if !self.git_output(&["rev-parse", "--verify", "--quiet", "HEAD"])?.status.success() {
            return Err(ExecutorError::NoHead);
        }
        let upstream_commit = format!("{upstream}^{{commit}}");
        if !self
            .git_output(&["rev-parse", "--verify", "--quiet", &upstream_commit])?
            .status
            .success()
        {
            return Err(ExecutorError::RefNotFound {
                name: upstream.to_string(),
            });
        }
        let dirty = self.git_run(&["status", "--porcelain", "--untracked-files=no"])?;
        if !dirty.trim().is_empty() {
            return Ok(RebaseStatus::UncommittedChanges);
        }

        let steps = self.commits_to_rebase(upstream)?;
        if steps.is_empty() {
            info!("Nothing to rebase onto {upstream}");
            return Ok(RebaseStatus::UpToDate);
        }

        self.store.stage(&steps)?;
        let steps = match handler.prepare_steps(steps) {
            PrepareOutcome::Proceed(steps) => steps,
            PrepareOutcome::Aborted => {
                info!("Rebase onto {upstream} aborted before it started");
                self.store.clear()?;
                return Ok(RebaseStatus::Aborted);
            }
        };
        if steps.iter().all(|step| step.is_drop() || step.is_comment()) {
            info!("Every step was dropped, not starting the rebase");
            self.store.clear()?;
            return Ok(RebaseStatus::Aborted);
        }

        self.store.stage(&steps)?;
        let pending = self.store.pending_path();
        let output = self
            .git_command()
            .env("GIT_SEQUENCE_EDITOR", format!("cp {}", shell_quote(&pending)))
            .args(["rebase", "-i", upstream])
            .output()
            .map_err(|source| ExecutorError::Io {
                context: format!("run git rebase -i {upstream}"),
                source,
            })?;
        self.store.unstage()?;
        self.settle(output, handler)
    }

    /// Commits between `upstream` and HEAD in the order git would pick them.
    fn commits_to_rebase(&self, upstream: &str) -> Result<Vec<Step>, ExecutorError> {
        let range = format!("{upstream}...HEAD");
        let log = self.git_run(&[
            "log",
            "--reverse",
            "--no-merges",
            "--cherry-pick",
            "--right-only",
            "--format=%h %s",
            &range,
        ])?;
        Ok(log
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let (id, subject) = line.split_once(' ').unwrap_or((line, ""));
                Step::new(id, subject, Action::Pick)
            })
            .collect())
    }

    /// Follow git after it returned, answering rewords until it completes or
    /// stops for something only a person can resolve.
    fn settle(
        &self,
        mut output: Output,
        handler: &dyn InteractiveHandler,
    ) -> Result<RebaseStatus, ExecutorError> {
        loop {
            if !self.store.is_git_rebasing() {
                self.store.clear()?;
                if output.status.success() {
                    return Ok(RebaseStatus::Ok);
                }
                warn!(
                    "git rebase failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                return Ok(RebaseStatus::Failed);
            }

            let unmerged = self.git_run(&["diff", "--name-only", "--diff-filter=U"])?;
            if !unmerged.trim().is_empty() {
                return Ok(RebaseStatus::Conflicts);
            }

            let Some(stopped) = self.stopped_reword()? else {
                return Ok(match self.store.stopped_commit() {
                    Some(_) => RebaseStatus::Edit,
                    None => RebaseStatus::Stopped,
                });
            };

            let original = self.git_run(&["log", "-1", "--format=%B", "HEAD"])?;
            match handler.modify_commit_message(original.trim_end()) {
                RewordOutcome::Abort => return self.abort_reword(&stopped),
                RewordOutcome::Message(message) => {
                    self.amend_message(&message)?;
                    self.store.forget_reword(&stopped)?;
                    output = self.git_output(&["rebase", "--continue"])?;
                }
            }
        }
    }

    /// Resume after a stop.
    ///
    /// A reword whose pick conflicted stops before its commit exists, and
    /// `git rebase --continue` would commit the resolution with the original
    /// message without stopping again. Its message is asked for here and the
    /// resolution committed with it first.
    fn resume(&self, handler: &dyn InteractiveHandler) -> Result<RebaseStatus, ExecutorError> {
        if let Some(stopped) = self.stopped_reword()? {
            let unmerged = self.git_run(&["diff", "--name-only", "--diff-filter=U"])?;
            if !self.store.is_stopped_commit_made() && unmerged.trim().is_empty() {
                let original = self.git_run(&["log", "-1", "--format=%B", &stopped])?;
                match handler.modify_commit_message(original.trim_end()) {
                    RewordOutcome::Abort => return self.abort_reword(&stopped),
                    RewordOutcome::Message(message) => {
                        info!("Committing resolved reword of {stopped}");
                        // Reuse the original commit for its authorship.
                        self.git_run(&["commit", "--allow-empty", "-C", &stopped])?;
                        self.amend_message(&message)?;
                        self.store.forget_reword(&stopped)?;
                    }
                }
            }
        }

        let output = self.git_output(&["rebase", "--continue"])?;
        self.settle(output, handler)
    }

    /// The commit git stopped at, when it was marked for rewording.
    fn stopped_reword(&self) -> Result<Option<String>, ExecutorError> {
        let Some(stopped) = self.store.stopped_commit() else {
            return Ok(None);
        };
        let stopped_id = CommitId::new(stopped.as_str());
        let is_reword = self
            .store
            .reword_ids()?
            .iter()
            .any(|id| stopped_id.matches(id));
        Ok(is_reword.then_some(stopped))
    }

    fn abort_reword(&self, stopped: &str) -> Result<RebaseStatus, ExecutorError> {
        info!("Reword of {stopped} aborted, aborting the rebase");
        self.git_run(&["rebase", "--abort"])?;
        self.store.clear()?;
        Ok(RebaseStatus::Aborted)
    }

    fn amend_message(&self, message: &str) -> Result<(), ExecutorError> {
        let path = self.store.message_path();
        fs::write(&path, message).map_err(|source| ExecutorError::Io {
            context: format!("write {}", path.display()),
            source,
        })?;
        let path_arg = path.to_string_lossy();
        self.git_run(&[
            "commit",
            "--amend",
            "--only",
            "--allow-empty",
            "--cleanup=strip",
            "-F",
            path_arg.as_ref(),
        ])?;
        Ok(())
    }
}

impl RebaseExecutor for GitCliExecutor {
    fn run(
        &self,
        operation: &RebaseOperation,
        handler: &dyn InteractiveHandler,
    ) -> Result<RebaseStatus, ExecutorError> {
        debug!("git executor running {operation}");
        match operation {
            RebaseOperation::Begin { upstream } => self.begin(upstream, handler),
            RebaseOperation::Continue => self.resume(handler),
            RebaseOperation::Skip => {
                let output = self.git_output(&["rebase", "--skip"])?;
                self.settle(output, handler)
            }
            RebaseOperation::Abort => {
                if self.store.is_git_rebasing() {
                    self.git_run(&["rebase", "--abort"])?;
                }
                self.store.clear()?;
                Ok(RebaseStatus::Aborted)
            }
        }
    }
}

fn checked(command: &str, output: Output) -> Result<String, ExecutorError> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(ExecutorError::Command {
            command: format!("git {command}"),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', r"'\''"))
}
