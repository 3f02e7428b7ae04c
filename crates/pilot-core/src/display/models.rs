//! Display implementations for domain models.
//!
//! Steps format exactly as a todo line (`pick a1b2c3d Subject`); plans and
//! results format as markdown for the terminal renderer.

use std::fmt;

use super::Steps;
use crate::{
    models::{Action, InteractiveResult, RebaseStatus, RunnerState, Step},
    plan::Plan,
};

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RebaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.action.map_or("drop", |action| action.as_str());
        write!(f, "{token} {} {}", self.commit_id, self.short_message())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Todo")?;
        writeln!(f)?;
        write!(f, "{}", Steps(self.todo().to_vec()))?;

        if !self.done().is_empty() {
            writeln!(f)?;
            writeln!(f, "## Done")?;
            writeln!(f)?;
            write!(f, "{}", Steps(self.done().to_vec()))?;
        }

        if self.is_modified() {
            writeln!(f)?;
            writeln!(f, "*The todo list has been edited.*")?;
        }

        Ok(())
    }
}

impl fmt::Display for InteractiveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractiveResult::Prepare { steps } => {
                writeln!(f, "## Prepared {} steps", steps.len())?;
                writeln!(f)?;
                write!(f, "{}", Steps(steps.clone()))
            }
            InteractiveResult::Reword { commit_message } => {
                writeln!(f, "## Reword requested")?;
                writeln!(f)?;
                for line in commit_message.lines() {
                    writeln!(f, "> {line}")?;
                }
                Ok(())
            }
            InteractiveResult::Terminal { status } => writeln!(f, "Rebase {status}."),
            InteractiveResult::Exception { error } => writeln!(f, "Rebase failed: {error}"),
        }
    }
}
