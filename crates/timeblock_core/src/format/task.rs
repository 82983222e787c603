//! Task line syntax helpers.
//!
//! A task line starts (after optional indentation) with `- [` + one status
//! character + `] `. Everything after that prefix is the task body.

use crate::time::canonical::TIMEBLOCK_PATTERN;
use once_cell::sync::Lazy;
use regex::Regex;

static TASK_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*- \[(.)\] )").expect("valid task prefix regex"));
static EMPTY_TASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*- \[.\]\s*$").expect("valid empty task regex"));
static LEADING_TIMEBLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{TIMEBLOCK_PATTERN}")).expect("valid leading timeblock regex")
});

/// Borrowed view of one task line split at the checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    /// Indentation plus `- [x] `, including the trailing space.
    pub prefix: &'a str,
    /// Single status character inside the brackets.
    pub status: char,
    /// Text after the prefix.
    pub body: &'a str,
}

/// Splits a task line into prefix, status and body.
///
/// Returns `None` for lines that are not checkbox tasks.
pub fn parse_task_line(line: &str) -> Option<TaskLine<'_>> {
    let caps = TASK_PREFIX_RE.captures(line)?;
    let prefix = caps.get(1)?;
    let status = caps.get(2)?.as_str().chars().next()?;
    Some(TaskLine {
        prefix: prefix.as_str(),
        status,
        body: &line[prefix.end()..],
    })
}

/// Returns whether the line is a checkbox with nothing after it.
pub fn is_empty_task(line: &str) -> bool {
    EMPTY_TASK_RE.is_match(line)
}

/// Returns whether the text begins with a canonical `HH:MM - HH:MM` block.
pub fn starts_with_timeblock(text: &str) -> bool {
    LEADING_TIMEBLOCK_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::{is_empty_task, parse_task_line, starts_with_timeblock};

    #[test]
    fn parses_indented_task_with_status() {
        let task = parse_task_line("  - [x] done thing").expect("task line");
        assert_eq!(task.prefix, "  - [x] ");
        assert_eq!(task.status, 'x');
        assert_eq!(task.body, "done thing");
    }

    #[test]
    fn rejects_plain_bullets() {
        assert!(parse_task_line("- plain bullet").is_none());
        assert!(parse_task_line("- [] missing status").is_none());
    }

    #[test]
    fn empty_task_accepts_trailing_whitespace_only() {
        assert!(is_empty_task("- [ ] "));
        assert!(is_empty_task("- [ ]"));
        assert!(is_empty_task("\t- [x]   "));
        assert!(!is_empty_task("- [ ] a"));
    }

    #[test]
    fn leading_timeblock_requires_exact_shape() {
        assert!(starts_with_timeblock("09:00 - 09:30 standup"));
        assert!(!starts_with_timeblock("9:00 - 09:30 standup"));
        assert!(!starts_with_timeblock(" 09:00 - 09:30"));
    }
}
