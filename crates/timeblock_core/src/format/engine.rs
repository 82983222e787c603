//! Line and document entry points.
//!
//! # Responsibility
//! - Classify each line as skipped or transformed.
//! - Run the rule chain, then deduplication and repositioning.
//! - Reassemble the document with original line separators.
//!
//! # Invariants
//! - `format_line(format_line(x)) == format_line(x)`: one call runs the
//!   chain to its fixed point.
//! - Empty task lines and calendar-sourced lines are returned byte-for-byte.
//! - `\n` and `\r\n` separators are preserved exactly.

use crate::format::cleanup::{dedup_line, reposition_line};
use crate::format::rules::apply_rules;
use crate::format::task::{is_empty_task, parse_task_line};
use log::debug;

/// Status character reserved for calendar-imported tasks by default.
pub const DEFAULT_CALENDAR_MARKER: char = 'c';

/// Document-level formatting switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Task status character marking calendar-sourced lines.
    pub calendar_marker: char,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            calendar_marker: DEFAULT_CALENDAR_MARKER,
        }
    }
}

/// How `format_content` treats one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Checkbox with no content.
    EmptyTask,
    /// Timing produced by an upstream calendar import.
    CalendarEntry,
    Transform,
}

/// Result of formatting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    pub content: String,
    /// Number of lines whose text changed.
    pub changed_lines: usize,
}

impl FormatReport {
    pub fn is_changed(&self) -> bool {
        self.changed_lines > 0
    }
}

/// Classifies one line for document formatting.
pub fn classify_line(line: &str, options: &FormatOptions) -> LineClass {
    if is_empty_task(line) {
        return LineClass::EmptyTask;
    }
    match parse_task_line(line) {
        Some(task) if task.status == options.calendar_marker => LineClass::CalendarEntry,
        _ => LineClass::Transform,
    }
}

/// Upper bound on chain passes per line. Each pass that changes text
/// consumes at least one raw time token, so real lines settle in two or three.
const MAX_LINE_PASSES: usize = 8;

/// Normalizes every time expression on one line.
///
/// Cleanup can expose a range that the chain did not see at the end of the
/// line (`sync 14:00 - 14:30 chapters 3-4 10:00 - 11:00`), so the chain is
/// re-run until the text settles.
pub fn format_line(line: &str) -> String {
    let mut current = line.to_string();
    for _ in 0..MAX_LINE_PASSES {
        let next = format_line_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn format_line_once(line: &str) -> String {
    let rewritten = apply_rules(line);
    let deduplicated = dedup_line(&rewritten);
    reposition_line(&deduplicated)
}

/// Formats a whole document with default options.
pub fn format_content(document: &str) -> String {
    format_content_with(document, &FormatOptions::default())
}

/// Formats a whole document honoring `options`.
pub fn format_content_with(document: &str, options: &FormatOptions) -> String {
    format_content_report(document, options).content
}

/// Formats a whole document and counts changed lines.
pub fn format_content_report(document: &str, options: &FormatOptions) -> FormatReport {
    let mut content = String::with_capacity(document.len());
    let mut total_lines = 0usize;
    let mut changed_lines = 0usize;

    for raw in document.split_inclusive('\n') {
        total_lines += 1;
        let (line, separator) = split_separator(raw);
        match classify_line(line, options) {
            LineClass::Transform => {
                let formatted = format_line(line);
                if formatted != line {
                    changed_lines += 1;
                }
                content.push_str(&formatted);
            }
            LineClass::EmptyTask | LineClass::CalendarEntry => content.push_str(line),
        }
        content.push_str(separator);
    }

    debug!(
        "event=format_content module=format status=ok lines={} changed_lines={}",
        total_lines, changed_lines
    );
    FormatReport {
        content,
        changed_lines,
    }
}

fn split_separator(raw: &str) -> (&str, &str) {
    if let Some(line) = raw.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw, "")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        classify_line, format_content_report, format_line, format_line_once, split_separator,
        FormatOptions, LineClass,
    };

    #[test]
    fn classify_honors_custom_calendar_marker() {
        let options = FormatOptions {
            calendar_marker: 'g',
        };
        assert_eq!(
            classify_line("- [g] 9-10 import", &options),
            LineClass::CalendarEntry
        );
        assert_eq!(
            classify_line("- [c] 9-10 import", &options),
            LineClass::Transform
        );
        assert_eq!(classify_line("- [g] ", &options), LineClass::EmptyTask);
    }

    #[test]
    fn cleanup_exposed_ranges_settle_in_one_call() {
        let line = "- [ ] sync 14:00 - 14:30 chapters 3-4 10:00 - 11:00";
        assert_eq!(
            format_line_once(line),
            "- [ ] 14:00 - 14:30 sync chapters 3-4"
        );
        assert_eq!(format_line(line), "- [ ] 14:00 - 14:30 sync chapters");
    }

    #[test]
    fn split_separator_handles_crlf() {
        assert_eq!(split_separator("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_separator("a\n"), ("a", "\n"));
        assert_eq!(split_separator("a"), ("a", ""));
    }

    #[test]
    fn report_counts_changed_lines() {
        let report = format_content_report(
            "- [ ] 3p standup\n- [ ] nothing\n- [ ] lunch 12-1\n",
            &FormatOptions::default(),
        );
        assert_eq!(report.changed_lines, 2);
        assert!(report.is_changed());
    }
}
