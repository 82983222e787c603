//! Canonical timeblock recognition for renderers.
//!
//! # Responsibility
//! - Answer "is this span a canonical timeblock" for the rendering layer.
//! - Split text into plain/highlighted spans without touching any UI type.
//!
//! # Invariants
//! - Recognition uses the same `HH:MM - HH:MM` shape the formatter emits.
//! - Concatenating all span texts reproduces the input exactly.

use crate::time::canonical::TIMEBLOCK_PATTERN;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

pub(crate) static TIMEBLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIMEBLOCK_PATTERN).expect("valid timeblock regex"));
static EXACT_TIMEBLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{TIMEBLOCK_PATTERN}$")).expect("valid exact timeblock regex")
});

/// One rendered fragment of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Plain(&'a str),
    Highlighted(&'a str),
}

impl<'a> Span<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Highlighted(text) => *text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Highlighted(_))
    }
}

/// Returns whether `text` is exactly one canonical timeblock.
pub fn is_canonical_timeblock(text: &str) -> bool {
    EXACT_TIMEBLOCK_RE.is_match(text)
}

/// Byte ranges of every canonical timeblock in `text`.
///
/// Live editors decorate these ranges directly.
pub fn timeblock_ranges(text: &str) -> Vec<Range<usize>> {
    TIMEBLOCK_RE.find_iter(text).map(|m| m.range()).collect()
}

/// Splits `text` into alternating plain and highlighted spans.
///
/// Empty plain spans are never emitted.
pub fn split_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for range in timeblock_ranges(text) {
        if range.start > cursor {
            spans.push(Span::Plain(&text[cursor..range.start]));
        }
        spans.push(Span::Highlighted(&text[range.clone()]));
        cursor = range.end;
    }
    if cursor < text.len() {
        spans.push(Span::Plain(&text[cursor..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::{is_canonical_timeblock, split_spans, timeblock_ranges, Span};

    #[test]
    fn predicate_requires_exact_single_spaced_hyphen() {
        assert!(is_canonical_timeblock("09:00 - 10:30"));
        assert!(!is_canonical_timeblock("09:00-10:30"));
        assert!(!is_canonical_timeblock("9:00 - 10:30"));
        assert!(!is_canonical_timeblock("09:00 – 10:30"));
        assert!(!is_canonical_timeblock(" 09:00 - 10:30"));
    }

    #[test]
    fn ranges_cover_every_block() {
        let text = "09:00 - 09:30 a 10:00 - 11:00";
        assert_eq!(timeblock_ranges(text), vec![0..13, 16..29]);
    }

    #[test]
    fn spans_round_trip_text() {
        let text = "- [ ] 09:00 - 09:30 standup";
        let spans = split_spans(text);
        assert_eq!(
            spans,
            vec![
                Span::Plain("- [ ] "),
                Span::Highlighted("09:00 - 09:30"),
                Span::Plain(" standup"),
            ]
        );
        let joined: String = spans.iter().map(|span| span.text()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn spans_of_plain_text_are_single_plain() {
        assert_eq!(split_spans("no times"), vec![Span::Plain("no times")]);
        assert!(split_spans("").is_empty());
    }
}
