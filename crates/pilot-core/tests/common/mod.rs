#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use pilot_core::{Pilot, PilotBuilder};
use tempfile::TempDir;

/// Whether a `git` binary can be run; tests that need one skip otherwise.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

pub fn run_git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .expect("git command should execute");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Repository with a `main` branch holding one commit and a checked out
/// `feature` branch on top of it.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("repo");
        fs::create_dir_all(&path).expect("repo dir");

        run_git(&path, &["init", "-q"]);
        run_git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        run_git(&path, &["config", "user.name", "pilot-test"]);
        run_git(&path, &["config", "user.email", "pilot-test@example.com"]);
        run_git(&path, &["config", "commit.gpgsign", "false"]);

        let repo = Self {
            _temp_dir: temp_dir,
            path,
        };
        repo.commit("README.md", "hello\n", "initial");
        run_git(&repo.path, &["checkout", "-q", "-b", "feature"]);
        repo
    }

    /// Repository whose feature branch holds commits `A`, `B` and `C`, each
    /// touching its own file.
    pub fn with_feature_commits() -> Self {
        let repo = Self::new();
        for name in ["A", "B", "C"] {
            repo.commit(&format!("{}.txt", name.to_lowercase()), name, name);
        }
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git(&self, args: &[&str]) -> String {
        run_git(&self.path, args)
    }

    pub fn commit(&self, file: &str, contents: &str, subject: &str) {
        fs::write(self.path.join(file), contents).expect("write file");
        self.git(&["add", file]);
        self.git(&["commit", "-q", "-m", subject]);
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Subjects of the commits on top of `main`, oldest first.
    pub fn subjects(&self) -> Vec<String> {
        self.git(&["log", "--reverse", "--format=%s", "main..HEAD"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn is_rebasing(&self) -> bool {
        self.path.join(".git").join("rebase-merge").exists()
    }

    /// Whether the pilot left its own files in the git dir.
    pub fn has_pilot_files(&self) -> bool {
        self.path.join(".git").join("pilot").exists()
    }

    pub async fn pilot(&self) -> Pilot {
        PilotBuilder::new()
            .with_repository(Some(&self.path))
            .build()
            .await
            .expect("Failed to create pilot")
    }
}
