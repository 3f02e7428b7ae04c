use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BeginArgs, ContinueArgs, TodoCommands};

/// Drive and edit interactive git rebases
///
/// The pilot runs `git rebase -i` for you and answers its questions from the
/// command line: the todo list can be reordered, squashed, reworded or
/// dropped before the rebase starts and while it is stopped, and reworded
/// messages can be given up front.
#[derive(Parser)]
#[command(version, about, name = "pilot")]
pub struct Args {
    /// Repository to operate on. Defaults to the current directory
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/rebase-pilot/config.json
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the pilot CLI
///
/// - `status`, `todo`: inspect and edit the rebase in progress
/// - `begin`, `continue`, `skip`, `abort`: run rebase operations
/// - `config`: show the effective configuration
#[derive(Subcommand)]
pub enum Commands {
    /// Show whether a rebase is in progress and its todo list
    #[command(alias = "st")]
    Status,
    /// Inspect and edit the todo list of the rebase in progress
    #[command(alias = "t")]
    Todo {
        #[command(subcommand)]
        command: TodoCommands,
    },
    /// Start an interactive rebase onto an upstream
    #[command(alias = "b")]
    Begin(BeginArgs),
    /// Resume a stopped rebase
    #[command(alias = "c")]
    Continue(ContinueArgs),
    /// Skip the commit the rebase stopped at
    Skip,
    /// Abort the rebase and restore the original branch
    Abort,
    /// Show the effective configuration
    Config,
}
