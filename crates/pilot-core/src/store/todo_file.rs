//! Line format of a rebase todo list.
//!
//! Each step is one line, `<action> <commit> <subject>`. Short action tokens
//! are accepted, `drop` lines become drop markers and a commented-out step
//! line (`# pick <commit> <subject>`) becomes a [`Action::Comment`] step.
//! Other comments, blank lines and commands that do not name a commit
//! (`exec`, `break`, `label`, ...) are skipped.

use log::debug;

use crate::{
    error::{PilotError, Result},
    models::{Action, Step},
};

const COMMENT_CHAR: char = '#';

/// Parse a whole todo list.
pub fn parse_todo(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if let Some(step) = parse_line(line, number + 1)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parse one todo line; `number` is 1-based and only used in errors.
pub fn parse_line(line: &str, number: usize) -> Result<Option<Step>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(commented) = line.strip_prefix(COMMENT_CHAR) {
        // Free-form comments (git's help text) are not steps.
        let step = parse_line(commented, number).ok().flatten();
        return Ok(step.map(|mut step| {
            step.action = Some(Action::Comment);
            step
        }));
    }

    let (token, rest) = split_word(line);
    let action = match token {
        "drop" | "d" => None,
        "comment" => {
            return Err(PilotError::Parse {
                line: number,
                reason: "'comment' is not a todo command".to_string(),
            })
        }
        other => match other.parse::<Action>() {
            Ok(action) => Some(action),
            Err(_) => {
                debug!("Skipping todo line {number}: unsupported command '{other}'");
                return Ok(None);
            }
        },
    };

    let mut rest = rest;
    if action == Some(Action::Fixup) {
        // `fixup -C <commit>` / `fixup -c <commit>`
        let (flag, after) = split_word(rest);
        if flag == "-C" || flag == "-c" {
            rest = after;
        }
    }

    let (commit, subject) = split_word(rest);
    if commit.is_empty() {
        return Err(PilotError::Parse {
            line: number,
            reason: format!("'{token}' is missing a commit"),
        });
    }

    Ok(Some(Step::with_action(commit, subject, action)))
}

/// Format steps as todo lines, one per step.
pub fn format_todo(steps: &[Step]) -> String {
    let mut text = String::new();
    for step in steps {
        text.push_str(&format_line(step));
        text.push('\n');
    }
    text
}

/// Format one step as a todo line.
pub fn format_line(step: &Step) -> String {
    let body = |token: &str| {
        if step.short_message().is_empty() {
            format!("{token} {}", step.commit_id)
        } else {
            format!("{token} {} {}", step.commit_id, step.short_message())
        }
    };
    match step.action {
        None => body("drop"),
        Some(Action::Comment) => format!("{COMMENT_CHAR} {}", body(Action::Pick.as_str())),
        Some(action) => body(action.as_str()),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_todo_skips_help_and_commands() {
        let text = "\
pick a1b2c3d Add parser
s e4f5a6b Fix typo in parser
exec cargo test
break

# Rebase 0123abc..e4f5a6b onto 0123abc (2 commands)
#
# Commands:
# p, pick <commit> = use commit
";
        let steps = parse_todo(text).expect("parse todo");

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].commit_id.as_str(), "a1b2c3d");
        assert_eq!(steps[0].action, Some(Action::Pick));
        assert_eq!(steps[0].short_message(), "Add parser");
        assert_eq!(steps[1].action, Some(Action::Squash));
        assert_eq!(steps[1].short_message(), "Fix typo in parser");
    }

    #[test]
    fn test_parse_line_variants() {
        let drop = parse_line("drop 1234567 Remove me", 1).unwrap().unwrap();
        assert!(drop.is_drop());

        let comment = parse_line("# reword 1234567 Keep for later", 1).unwrap().unwrap();
        assert_eq!(comment.action, Some(Action::Comment));
        assert_eq!(comment.short_message(), "Keep for later");

        let fixup = parse_line("fixup -C 7654321 Better message", 1).unwrap().unwrap();
        assert_eq!(fixup.action, Some(Action::Fixup));
        assert_eq!(fixup.commit_id.as_str(), "7654321");

        let no_subject = parse_line("edit 7654321", 1).unwrap().unwrap();
        assert_eq!(no_subject.short_message(), "");
    }

    #[test]
    fn test_parse_line_missing_commit() {
        let err = parse_line("pick", 4).unwrap_err();
        assert!(matches!(err, PilotError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_format_line_variants() {
        assert_eq!(
            format_line(&Step::new("abc1234", "Subject line", Action::Reword)),
            "reword abc1234 Subject line"
        );
        assert_eq!(
            format_line(&Step::new("abc1234", "Subject line", Action::Comment)),
            "# pick abc1234 Subject line"
        );
        assert_eq!(
            format_line(&Step::with_action("abc1234", "", None)),
            "drop abc1234"
        );
    }

    #[test]
    fn test_format_then_parse_keeps_decisions() {
        let steps = vec![
            Step::new("aaa1111", "First", Action::Edit),
            Step::new("bbb2222", "Second", Action::Comment),
            Step::new("ccc3333", "Third", Action::Fixup),
        ];
        let parsed = parse_todo(&format_todo(&steps)).expect("parse formatted todo");
        assert_eq!(parsed, steps);
    }
}
