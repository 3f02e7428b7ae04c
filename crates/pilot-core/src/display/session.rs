//! Rebase status of a repository.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::{models::RunnerState, plan::Plan};

/// Formats a timestamp in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Snapshot shown by `pilot status`.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub state: RunnerState,
    pub rebasing: bool,
    pub started_at: Option<Timestamp>,
    pub plan: Option<Plan>,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Rebase status")?;
        writeln!(f)?;
        writeln!(f, "- **State**: {}", self.state)?;
        writeln!(
            f,
            "- **In progress**: {}",
            if self.rebasing { "yes" } else { "no" }
        )?;
        if let Some(started_at) = &self.started_at {
            writeln!(f, "- **Started**: {}", LocalDateTime(started_at))?;
        }

        if let Some(plan) = &self.plan {
            writeln!(
                f,
                "- **Progress**: {} done, {} to go",
                plan.done().len(),
                plan.todo().iter().filter(|step| !step.is_drop()).count()
            )?;
            writeln!(f)?;
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Step};

    #[test]
    fn test_local_date_time_format() {
        let timestamp: Timestamp = "2024-03-01T12:30:45Z".parse().unwrap();
        let formatted = LocalDateTime(&timestamp).to_string();

        // Zone-dependent, so only the shape is checked.
        assert!(formatted.len() >= "2024-03-01 12:30:45 X".len());
        assert!(formatted.starts_with("2024-0"));
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[13..14], ":");
    }

    #[test]
    fn test_idle_status() {
        let status = SessionStatus {
            state: RunnerState::Idle,
            rebasing: false,
            started_at: None,
            plan: None,
        };
        let output = status.to_string();

        assert!(output.starts_with("# Rebase status\n"));
        assert!(output.contains("- **State**: idle"));
        assert!(output.contains("- **In progress**: no"));
        assert!(!output.contains("Started"));
        assert!(!output.contains("## Todo"));
    }

    #[test]
    fn test_status_with_plan() {
        let mut plan = Plan::from_todo(vec![
            Step::new("bbb2222", "B", Action::Pick),
            Step::new("ccc3333", "C", Action::Pick),
        ]);
        plan.mark(1, None).unwrap();
        let status = SessionStatus {
            state: RunnerState::Stopped,
            rebasing: true,
            started_at: Some(Timestamp::now()),
            plan: Some(plan),
        };
        let output = status.to_string();

        assert!(output.contains("- **State**: stopped"));
        assert!(output.contains("- **In progress**: yes"));
        assert!(output.contains("- **Started**: "));
        assert!(output.contains("- **Progress**: 0 done, 1 to go"));
        assert!(output.contains("## Todo"));
        assert!(output.contains("~~drop `ccc3333` C~~"));
    }
}
