//! User configuration.
//!
//! Read from `$XDG_CONFIG_HOME/rebase-pilot/config.json` (or the path given
//! explicitly). Every key is optional:
//!
//! ```json
//! {
//!   "git_binary": "git",
//!   "throw_on_step_list_change": true,
//!   "rich_output": true
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, PilotError, Result};

const APP_PREFIX: &str = "rebase-pilot";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    /// Git executable used by the git executor
    pub git_binary: String,
    /// Refuse to continue when the todo list changed behind our back
    pub throw_on_step_list_change: bool,
    /// Render markdown output with colors
    pub rich_output: bool,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            throw_on_step_list_change: true,
            rich_output: true,
        }
    }
}

impl PilotConfig {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, the XDG config file is
    /// used when present and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX);
        match dirs.find_config_file(CONFIG_FILE) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path).fs_context(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Where the configuration is read from when no path is given.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_PREFIX)
            .place_config_file(CONFIG_FILE)
            .map_err(|e| PilotError::XdgDirectory(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.git_binary.trim().is_empty() {
            return Err(PilotError::invalid_input("git_binary").with_reason("cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = PilotConfig::default();
        assert_eq!(config.git_binary, "git");
        assert!(config.throw_on_step_list_change);
        assert!(config.rich_output);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_temp_dir, path) = write_config(r#"{ "rich_output": false }"#);
        let config = PilotConfig::load(Some(&path)).unwrap();

        assert!(!config.rich_output);
        assert_eq!(config.git_binary, "git");
        assert!(config.throw_on_step_list_change);
    }

    #[test]
    fn test_full_file() {
        let (_temp_dir, path) = write_config(
            r#"{ "git_binary": "/usr/local/bin/git", "throw_on_step_list_change": false, "rich_output": true }"#,
        );
        let config = PilotConfig::from_file(&path).unwrap();
        assert_eq!(config.git_binary, "/usr/local/bin/git");
        assert!(!config.throw_on_step_list_change);
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = PilotConfig::load(Some(&temp_dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, PilotError::FileSystem { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let (_temp_dir, path) = write_config("{ not json");
        assert!(matches!(
            PilotConfig::from_file(&path),
            Err(PilotError::Serialization { .. })
        ));
    }

    #[test]
    fn test_empty_git_binary_is_rejected() {
        let (_temp_dir, path) = write_config(r#"{ "git_binary": " " }"#);
        assert!(matches!(
            PilotConfig::from_file(&path),
            Err(PilotError::InvalidInput { .. })
        ));
    }
}
