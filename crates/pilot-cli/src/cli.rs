//! Command arguments and their handlers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, which stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Pilot
//! ```
//!
//! [`Cli`] runs each command against a [`Pilot`] and renders the results.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use pilot_core::{
    handlers::{handle_abort, handle_begin, handle_continue, handle_skip},
    params::{BeginRebase, ContinueRebase, MarkSteps, MoveStep, PlanEdit},
    InteractiveResult, OperationStatus, Pilot, PilotConfig, RunnerState,
};

use crate::renderer::TerminalRenderer;

/// Start an interactive rebase
///
/// The todo list is edited before git starts: moves are applied first, in
/// the order given, then marks.
#[derive(Args)]
pub struct BeginArgs {
    /// Branch or commit to rebase onto
    pub upstream: String,
    /// Move a step, as FROM:TO (0-based indices)
    #[arg(long = "move", value_name = "FROM:TO")]
    pub moves: Vec<MoveStep>,
    /// Set the action of steps, as ACTION:INDEX[,INDEX...] (e.g. squash:1,2
    /// or drop:0)
    #[arg(long = "mark", value_name = "ACTION:INDICES")]
    pub marks: Vec<MarkSteps>,
    /// New message for the next reworded commit; repeat for later ones
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,
}

impl From<BeginArgs> for BeginRebase {
    fn from(val: BeginArgs) -> Self {
        let edits = val
            .moves
            .into_iter()
            .map(PlanEdit::from)
            .chain(val.marks.into_iter().map(PlanEdit::from))
            .collect();
        BeginRebase {
            upstream: val.upstream,
            edits,
            messages: val.messages,
        }
    }
}

/// Resume a stopped rebase
#[derive(Args)]
pub struct ContinueArgs {
    /// New message for the next reworded commit; repeat for later ones
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,
    /// Continue even if the todo list was changed by someone else
    #[arg(long)]
    pub force: bool,
}

impl From<ContinueArgs> for ContinueRebase {
    fn from(val: ContinueArgs) -> Self {
        ContinueRebase {
            messages: val.messages,
            force: val.force,
        }
    }
}

/// Move a step to another position
#[derive(Args)]
pub struct MoveArgs {
    /// Index of the step to move
    pub from: usize,
    /// Index the step ends up at
    pub to: usize,
}

impl From<MoveArgs> for PlanEdit {
    fn from(val: MoveArgs) -> Self {
        PlanEdit::Move(MoveStep {
            from: val.from,
            to: val.to,
        })
    }
}

/// Set the action of one or more steps
#[derive(Args)]
pub struct MarkArgs {
    /// ACTION:INDEX[,INDEX...], e.g. fixup:2 or drop:0,1
    #[arg(value_name = "ACTION:INDICES")]
    pub mark: MarkSteps,
}

impl From<MarkArgs> for PlanEdit {
    fn from(val: MarkArgs) -> Self {
        PlanEdit::Mark(val.mark)
    }
}

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Show the todo list
    #[command(aliases = ["s", "ls"])]
    Show,
    /// Move a step to another position
    #[command(alias = "mv")]
    Move(MoveArgs),
    /// Swap a step with the one before it
    Up {
        /// Index of the step
        index: usize,
    },
    /// Swap a step with the one after it
    Down {
        /// Index of the step
        index: usize,
    },
    /// Set the action of one or more steps
    #[command(alias = "m")]
    Mark(MarkArgs),
}

impl TodoCommands {
    /// The edit this command makes, or `None` for read-only commands.
    fn into_edit(self) -> Option<PlanEdit> {
        match self {
            TodoCommands::Show => None,
            TodoCommands::Move(args) => Some(args.into()),
            TodoCommands::Up { index } => Some(PlanEdit::MoveUp(index)),
            TodoCommands::Down { index } => Some(PlanEdit::MoveDown(index)),
            TodoCommands::Mark(args) => Some(args.into()),
        }
    }
}

/// Runs commands against one repository.
pub struct Cli {
    pilot: Pilot,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(pilot: Pilot, renderer: TerminalRenderer) -> Self {
        Self { pilot, renderer }
    }

    pub async fn status(&self) -> Result<()> {
        let status = self
            .pilot
            .status()
            .await
            .context("Failed to read rebase status")?;
        self.renderer.render(&status.to_string())
    }

    pub async fn handle_todo_command(&self, command: TodoCommands) -> Result<()> {
        let Some(edit) = command.into_edit() else {
            return match self.pilot.load_plan().await? {
                Some(plan) => self.renderer.render(&plan.to_string()),
                None => self.renderer.render("No interactive rebase in progress.\n"),
            };
        };

        debug!("Editing todo list: {edit:?}");
        let plan = self
            .pilot
            .edit_plan(vec![edit])
            .await
            .context("Failed to edit the todo list")?;
        self.renderer.render(&format!(
            "{}\n{plan}",
            OperationStatus::success("Todo list updated".to_string())
        ))
    }

    pub async fn begin(&self, args: BeginArgs) -> Result<()> {
        let params = BeginRebase::from(args);
        let mut output = String::new();
        let state = handle_begin(&self.pilot, &params, |result| {
            collect(&mut output, result)
        })
        .await
        .with_context(|| format!("Failed to rebase onto {}", params.upstream))?;
        self.finish(&output, state)
    }

    pub async fn continue_rebase(&self, args: ContinueArgs) -> Result<()> {
        let mut output = String::new();
        let state = handle_continue(&self.pilot, &ContinueRebase::from(args), |result| {
            collect(&mut output, result)
        })
        .await
        .context("Failed to continue the rebase")?;
        self.finish(&output, state)
    }

    pub async fn skip(&self) -> Result<()> {
        let mut output = String::new();
        let state = handle_skip(&self.pilot, |result| collect(&mut output, result))
            .await
            .context("Failed to skip")?;
        self.finish(&output, state)
    }

    pub async fn abort(&self) -> Result<()> {
        let mut output = String::new();
        let state = handle_abort(&self.pilot, |result| collect(&mut output, result))
            .await
            .context("Failed to abort the rebase")?;
        self.finish(&output, state)
    }

    /// Render what the operation reported, then exit non-zero if it failed.
    fn finish(&self, output: &str, state: RunnerState) -> Result<()> {
        self.renderer.render(output)?;
        if state == RunnerState::Failed {
            bail!("The rebase did not complete");
        }
        Ok(())
    }
}

/// Show the configuration in effect.
pub fn show_config(config: &PilotConfig, renderer: &TerminalRenderer) -> Result<()> {
    let source = match PilotConfig::default_path() {
        Ok(path) => path.display().to_string(),
        Err(e) => format!("unavailable ({e})"),
    };
    renderer.render(&format!(
        "# Configuration\n\n\
         - **Default file**: {source}\n\
         - **git_binary**: {}\n\
         - **throw_on_step_list_change**: {}\n\
         - **rich_output**: {}\n",
        config.git_binary, config.throw_on_step_list_change, config.rich_output
    ))
}

fn collect(output: &mut String, result: &InteractiveResult) {
    match OperationStatus::from_result(result) {
        Some(status) => output.push_str(&status.to_string()),
        None => {
            output.push_str(&result.to_string());
            output.push('\n');
        }
    }
}
