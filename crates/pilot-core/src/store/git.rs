//! Step store backed by git's on-disk rebase state.
//!
//! Layout under the repository's git dir:
//!
//! ```text
//! rebase-merge/interactive       present while `git rebase -i` runs
//! rebase-merge/git-rebase-todo   steps still to apply
//! rebase-merge/done              steps already applied
//! rebase-merge/stopped-sha        commit git stopped at, if any
//! rebase-merge/amend              present when that commit was already made
//! pilot/git-rebase-todo          staged todo while the first plan is edited
//! pilot/rewords                  commits to reword, one id per line
//! pilot/COMMIT_EDITMSG           replacement message for the current reword
//! ```
//!
//! Git stops for `edit` but has no hook to hand a reword to another process,
//! so reword steps are written as `edit` and remembered in `pilot/rewords`;
//! reading maps them back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use log::debug;

use super::{todo_file, StepStore};
use crate::{
    error::{IoResultExt, PilotError, Result},
    models::{Action, CommitId, Step},
};

const REBASE_DIR: &str = "rebase-merge";
const PILOT_DIR: &str = "pilot";
const TODO_FILE: &str = "git-rebase-todo";
const DONE_FILE: &str = "done";
const INTERACTIVE_MARKER: &str = "interactive";
const REWORDS_FILE: &str = "rewords";
const MESSAGE_FILE: &str = "COMMIT_EDITMSG";
const STOPPED_FILE: &str = "stopped-sha";
const AMEND_FILE: &str = "amend";
const REBASE_HEAD: &str = "REBASE_HEAD";

/// Todo list of the interactive rebase in one repository.
#[derive(Debug, Clone)]
pub struct GitTodoStore {
    git_dir: PathBuf,
}

impl GitTodoStore {
    /// Creates a store for the repository whose git dir is `git_dir`.
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
        }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Directory git keeps its interactive rebase state in.
    pub fn rebase_dir(&self) -> PathBuf {
        self.git_dir.join(REBASE_DIR)
    }

    /// Location of the staged todo list used before git starts.
    pub fn pending_path(&self) -> PathBuf {
        self.git_dir.join(PILOT_DIR).join(TODO_FILE)
    }

    /// Whether git itself is running an interactive rebase.
    pub fn is_git_rebasing(&self) -> bool {
        self.rebase_dir().join(INTERACTIVE_MARKER).is_file()
    }

    /// Whether a todo list is staged for a rebase that has not started yet.
    pub fn is_staged(&self) -> bool {
        self.pending_path().is_file()
    }

    /// Stage the initial todo list before git starts.
    pub fn stage(&self, steps: &[Step]) -> Result<()> {
        let pilot_dir = self.git_dir.join(PILOT_DIR);
        fs::create_dir_all(&pilot_dir).fs_context(&pilot_dir)?;
        self.write_todo(&self.pending_path(), steps)
    }

    /// Remove the staged todo list once git has consumed it.
    pub fn unstage(&self) -> Result<()> {
        remove_if_exists(&self.pending_path())
    }

    /// Remove everything this store added to the git dir.
    pub fn clear(&self) -> Result<()> {
        let pilot_dir = self.git_dir.join(PILOT_DIR);
        if pilot_dir.exists() {
            fs::remove_dir_all(&pilot_dir).fs_context(&pilot_dir)?;
        }
        Ok(())
    }

    /// Commit ids whose `edit` line stands for a reword.
    pub fn reword_ids(&self) -> Result<Vec<String>> {
        let path = self.git_dir.join(PILOT_DIR).join(REWORDS_FILE);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(PilotError::FileSystem { path, source: e }),
        }
    }

    /// Stop treating `commit` as a reword once its message has been replaced.
    pub fn forget_reword(&self, commit: &str) -> Result<()> {
        let remaining: Vec<String> = self
            .reword_ids()?
            .into_iter()
            .filter(|id| !CommitId::new(id.as_str()).matches(commit))
            .collect();
        let path = self.git_dir.join(PILOT_DIR).join(REWORDS_FILE);
        if remaining.is_empty() {
            return remove_if_exists(&path);
        }
        let mut text = remaining.join("\n");
        text.push('\n');
        write_atomically(&path, &text)
    }

    /// Commit git last stopped at, while the rebase is stopped.
    ///
    /// Falls back to `REBASE_HEAD` for git versions that do not write
    /// `stopped-sha` when a pick conflicts.
    pub fn stopped_commit(&self) -> Option<String> {
        [self.rebase_dir().join(STOPPED_FILE), self.git_dir.join(REBASE_HEAD)]
            .iter()
            .filter_map(|path| fs::read_to_string(path).ok())
            .map(|text| text.trim().to_string())
            .find(|id| !id.is_empty())
    }

    /// Whether git stopped after making the commit (an `edit`) rather than
    /// before it (a conflicting pick).
    pub fn is_stopped_commit_made(&self) -> bool {
        self.rebase_dir().join(AMEND_FILE).is_file()
    }

    /// Path the executor writes replacement commit messages to.
    pub fn message_path(&self) -> PathBuf {
        self.git_dir.join(PILOT_DIR).join(MESSAGE_FILE)
    }

    fn todo_path(&self) -> Result<PathBuf> {
        if self.is_git_rebasing() {
            Ok(self.rebase_dir().join(TODO_FILE))
        } else if self.is_staged() {
            Ok(self.pending_path())
        } else {
            Err(PilotError::NotRebasing)
        }
    }

    fn read_todo(&self, path: &Path) -> Result<Vec<Step>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(PilotError::FileSystem { path: path.to_path_buf(), source: e }),
        };
        let mut steps = todo_file::parse_todo(&text)?;

        let rewords = self.reword_ids()?;
        for step in &mut steps {
            if step.action == Some(Action::Edit)
                && rewords.iter().any(|id| step.commit_id.matches(id))
            {
                step.action = Some(Action::Reword);
            }
        }
        Ok(steps)
    }

    fn write_todo(&self, path: &Path, steps: &[Step]) -> Result<()> {
        let rewords: Vec<&str> = steps
            .iter()
            .filter(|step| step.action == Some(Action::Reword))
            .map(|step| step.commit_id.as_str())
            .collect();
        let for_git: Vec<Step> = steps
            .iter()
            .cloned()
            .map(|mut step| {
                if step.action == Some(Action::Reword) {
                    step.action = Some(Action::Edit);
                }
                step
            })
            .collect();

        let pilot_dir = self.git_dir.join(PILOT_DIR);
        if rewords.is_empty() {
            remove_if_exists(&pilot_dir.join(REWORDS_FILE))?;
        } else {
            fs::create_dir_all(&pilot_dir).fs_context(&pilot_dir)?;
            let mut text = rewords.join("\n");
            text.push('\n');
            write_atomically(&pilot_dir.join(REWORDS_FILE), &text)?;
        }

        debug!("Writing {} steps to {}", steps.len(), path.display());
        write_atomically(path, &todo_file::format_todo(&for_git))
    }
}

impl StepStore for GitTodoStore {
    fn is_interactive_rebase(&self) -> Result<bool> {
        Ok(self.is_git_rebasing() || self.is_staged())
    }

    fn read_steps(&self) -> Result<Vec<Step>> {
        let path = self.todo_path()?;
        self.read_todo(&path)
    }

    fn read_done(&self) -> Result<Vec<Step>> {
        if self.is_git_rebasing() {
            self.read_todo(&self.rebase_dir().join(DONE_FILE))
        } else if self.is_staged() {
            Ok(Vec::new())
        } else {
            Err(PilotError::NotRebasing)
        }
    }

    fn write_steps(&self, steps: &[Step]) -> Result<()> {
        let path = self.todo_path()?;
        self.write_todo(&path, steps)
    }

    fn started_at(&self) -> Result<Option<Timestamp>> {
        if !self.is_git_rebasing() {
            return Ok(None);
        }
        let dir = self.rebase_dir();
        let modified = fs::metadata(&dir).and_then(|m| m.modified()).fs_context(&dir)?;
        Ok(Timestamp::try_from(modified).ok())
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).fs_context(&tmp)?;
    fs::rename(&tmp, path).fs_context(path)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PilotError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
