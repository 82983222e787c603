//! Post-chain passes over task lines.
//!
//! # Invariants
//! - Only task lines are touched; other lines pass through unchanged.
//! - After `reposition_line`, at most one timeblock remains and it sits right
//!   after the checkbox.

use crate::format::task::{parse_task_line, starts_with_timeblock};
use crate::highlight::TIMEBLOCK_RE;
use once_cell::sync::Lazy;
use regex::Regex;

static RUN_OF_BLANKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("valid blank run regex"));

/// Drops every timeblock after the leading one on a task line.
///
/// Lines without a leading timeblock, or with nothing to drop, are returned
/// unchanged so user spacing survives.
pub fn dedup_line(line: &str) -> String {
    let Some(task) = parse_task_line(line) else {
        return line.to_string();
    };
    if !starts_with_timeblock(task.body) {
        return line.to_string();
    }
    let Some(leading) = TIMEBLOCK_RE.find(task.body) else {
        return line.to_string();
    };
    let rest = &task.body[leading.end()..];
    if !TIMEBLOCK_RE.is_match(rest) {
        return line.to_string();
    }

    let stripped = TIMEBLOCK_RE.replace_all(rest, "");
    let collapsed = RUN_OF_BLANKS_RE.replace_all(&stripped, " ");
    format!(
        "{}{}{}",
        task.prefix,
        leading.as_str(),
        collapsed.trim_end()
    )
}

/// Moves the first timeblock found after task text to the front.
///
/// `- [ ] write report 14:00 - 14:30` becomes
/// `- [ ] 14:00 - 14:30 write report`. The relocated line is deduplicated
/// again so a single pass is already a fixed point.
pub fn reposition_line(line: &str) -> String {
    let Some(task) = parse_task_line(line) else {
        return line.to_string();
    };
    if starts_with_timeblock(task.body) {
        return line.to_string();
    }
    let Some(block) = TIMEBLOCK_RE.find(task.body) else {
        return line.to_string();
    };
    let leading = task.body[..block.start()].trim();
    if leading.is_empty() {
        return line.to_string();
    }
    let trailing = task.body[block.end()..].trim();

    let remainder = [leading, trailing]
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    dedup_line(&format!("{}{} {remainder}", task.prefix, block.as_str()))
}
