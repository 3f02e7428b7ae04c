//! Collection wrapper types for displaying step lists.

use std::fmt;

use crate::models::Step;

/// Newtype wrapper for displaying a todo or done list.
///
/// Each step is written as a markdown list item prefixed with its 0-based
/// index, which is the index the reorder and mark operations take. Drop
/// markers are struck through so they stay visible for un-dropping.
///
/// # Examples
///
/// ```rust
/// use pilot_core::{
///     display::Steps,
///     models::{Action, Step},
/// };
///
/// let steps = Steps(vec![
///     Step::new("a1b2c3d", "Fix parser", Action::Pick),
///     Step::with_action("e4f5a6b", "WIP", None),
/// ]);
/// let output = format!("{steps}");
/// assert!(output.contains("- `0` pick `a1b2c3d` Fix parser"));
/// assert!(output.contains("- `1` ~~drop `e4f5a6b` WIP~~"));
/// ```
pub struct Steps(pub Vec<Step>);

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps.");
        }
        for (index, step) in self.0.iter().enumerate() {
            let token = step.action.map_or("drop", |action| action.as_str());
            if step.is_drop() {
                writeln!(
                    f,
                    "- `{index}` ~~{token} `{}` {}~~",
                    step.commit_id,
                    step.short_message()
                )?;
            } else {
                writeln!(
                    f,
                    "- `{index}` {token} `{}` {}",
                    step.commit_id,
                    step.short_message()
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    #[test]
    fn test_steps_display_empty() {
        let steps = Steps(vec![]);
        assert_eq!(format!("{steps}"), "No steps.\n");
    }

    #[test]
    fn test_steps_display_uses_indices() {
        let steps = Steps(vec![
            Step::new("aaa1111", "First", Action::Pick),
            Step::new("bbb2222", "Second", Action::Squash),
        ]);
        let output = format!("{steps}");

        assert!(output.contains("- `0` pick `aaa1111` First"));
        assert!(output.contains("- `1` squash `bbb2222` Second"));
    }

    #[test]
    fn test_steps_display_strikes_drops() {
        let steps = Steps(vec![Step::with_action("ccc3333", "Gone", None)]);
        let output = format!("{steps}");

        assert_eq!(output, "- `0` ~~drop `ccc3333` Gone~~\n");
    }
}
