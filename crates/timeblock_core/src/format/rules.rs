//! Ordered rewrite rules for one line of text.
//!
//! # Responsibility
//! - Declare each rule as a `{pattern, rewrite}` record with its own guards.
//! - Apply a rule to a full line with a global, non-overlapping scan.
//!
//! # Invariants
//! - Order matters: each rule sees the output of the rule before it.
//! - A rewrite that returns `None` leaves the matched text byte-for-byte
//!   unchanged; partial substitution never happens.
//! - Every emitted time is a valid canonical `HH:MM`.
//! - Text that is already part of a canonical block is never rewritten by
//!   the meridiem or single-time rules.

use crate::format::task::starts_with_timeblock;
use crate::highlight::TIMEBLOCK_RE;
use crate::time::canonical::{CanonicalTime, Timeblock, TIMEBLOCK_PATTERN};
use crate::time::parser::{parse_digits_inferred, parse_time};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Characters inspected before a digit range when looking for `YYYY-`.
const DATE_GUARD_WINDOW: usize = 6;

/// Time token carrying an explicit meridiem (`3pm`, `4:30 am`, `9a`).
const MERIDIEM_TOKEN: &str = r"\d{1,2}(?::\d{2})?(?: *[ap]m|[ap])";
/// Time token with an optional meridiem.
const LOOSE_TOKEN: &str = r"\d{1,2}(?::\d{2})?(?: *[ap]m|[ap])?";

static DATE_FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-$").expect("valid date fragment regex"));

static UNRESOLVED_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–]\s*\d").expect("valid unresolved range regex"));

static RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::new(
            RuleKind::StripHighlight,
            &format!("==({TIMEBLOCK_PATTERN})==|<mark[^>]*>({TIMEBLOCK_PATTERN})</mark>"),
            strip_highlight,
        ),
        RewriteRule::new(
            RuleKind::CompactRange,
            r"\b(\d{4})[-–](\d{4})\b",
            compact_range,
        ),
        RewriteRule::new(
            RuleKind::MeridiemRange,
            &format!(r"(?i)\b({MERIDIEM_TOKEN})\s*[-–]\s*({MERIDIEM_TOKEN})\b"),
            meridiem_range,
        ),
        RewriteRule::new(
            RuleKind::MixedMeridiemRange,
            r"(?i)\b(\d{1,2}(?::\d{2})?)\s*[-–]\s*(\d{1,2}(?::\d{2})?)( *[ap]m|[ap])\b",
            mixed_meridiem_range,
        ),
        RewriteRule::new(
            RuleKind::TrailingDigitRange,
            r"(\d{1,4})[-–](\d{1,4})(\s*)$",
            trailing_digit_range,
        ),
        RewriteRule::new(
            RuleKind::ColonRange,
            r"\b(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})\b",
            colon_range,
        ),
        RewriteRule::new(
            RuleKind::BareHourRange,
            r"(\] |# )(\d{1,2})\s*[-–]\s*(\d{1,2})(\s|$)",
            bare_hour_range,
        ),
        RewriteRule::new(
            RuleKind::BareToColonRange,
            r"(\] |# )(\d{1,2})\s*[-–]\s*(\d{1,2}:\d{2})(\s|$)",
            bare_to_colon_range,
        ),
        RewriteRule::new(
            RuleKind::LeadingSingleTime,
            &format!(r"(?i)^(\s*- \[.\] )({LOOSE_TOKEN}) (.+)$"),
            leading_single_time,
        ),
        RewriteRule::new(
            RuleKind::TrailingCompactTime,
            r"^(\s*- \[.\] )(.*\S)\s+(\d{3,4})\s*$",
            trailing_compact_time,
        ),
        RewriteRule::new(
            RuleKind::TrailingMeridiemTime,
            &format!(r"(?i)^(\s*- \[.\] )(.*\S)\s+({MERIDIEM_TOKEN})\s*$"),
            trailing_meridiem_time,
        ),
    ]
});

/// Identity of one rule in the chain, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    /// `==09:00 - 10:00==` / `<mark>..</mark>` back to plain text.
    StripHighlight,
    /// `1400-1500`.
    CompactRange,
    /// `3pm - 4:30pm`.
    MeridiemRange,
    /// `3-4pm`, start inherits the end meridiem.
    MixedMeridiemRange,
    /// `9-10` at end of line, outside date fragments.
    TrailingDigitRange,
    /// `9:00 - 10:30`.
    ColonRange,
    /// `] 9-10` / `# 9-10`.
    BareHourRange,
    /// `] 9-10:30` / `# 9-10:30`.
    BareToColonRange,
    /// `- [ ] 3p standup`.
    LeadingSingleTime,
    /// `- [ ] standup 1430`.
    TrailingCompactTime,
    /// `- [ ] standup 3pm`.
    TrailingMeridiemTime,
}

impl RuleKind {
    /// Stable identifier used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StripHighlight => "strip_highlight",
            Self::CompactRange => "compact_range",
            Self::MeridiemRange => "meridiem_range",
            Self::MixedMeridiemRange => "mixed_meridiem_range",
            Self::TrailingDigitRange => "trailing_digit_range",
            Self::ColonRange => "colon_range",
            Self::BareHourRange => "bare_hour_range",
            Self::BareToColonRange => "bare_to_colon_range",
            Self::LeadingSingleTime => "leading_single_time",
            Self::TrailingCompactTime => "trailing_compact_time",
            Self::TrailingMeridiemTime => "trailing_meridiem_time",
        }
    }
}

type RewriteFn = fn(&str, &Captures<'_>) -> Option<String>;

/// One matcher plus its replacement function.
pub struct RewriteRule {
    kind: RuleKind,
    pattern: Regex,
    rewrite: RewriteFn,
}

impl RewriteRule {
    fn new(kind: RuleKind, pattern: &str, rewrite: RewriteFn) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("valid rewrite rule regex"),
            rewrite,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Rewrites every match in `line`.
    ///
    /// Matches whose rewrite declines (guard hit or parse failure) are kept
    /// verbatim. Returns `Cow::Borrowed` when nothing matched.
    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(line, |caps: &Captures<'_>| {
            (self.rewrite)(line, caps).unwrap_or_else(|| caps[0].to_string())
        })
    }
}

/// Returns the full chain in application order.
pub fn rules() -> &'static [RewriteRule] {
    RULES.as_slice()
}

/// Looks up one rule, mainly for rule-by-rule tests.
pub fn rule(kind: RuleKind) -> Option<&'static RewriteRule> {
    rules().iter().find(|rule| rule.kind == kind)
}

/// Runs every rule in order over one line.
pub fn apply_rules(line: &str) -> String {
    rules()
        .iter()
        .fold(line.to_string(), |current, rule| {
            rule.apply(&current).into_owned()
        })
}

fn strip_highlight(_line: &str, caps: &Captures<'_>) -> Option<String> {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|block| block.as_str().to_string())
}

fn compact_range(_line: &str, caps: &Captures<'_>) -> Option<String> {
    range_text(parse_time(&caps[1], false), parse_time(&caps[2], false))
}

fn meridiem_range(_line: &str, caps: &Captures<'_>) -> Option<String> {
    range_text(parse_time(&caps[1], false), parse_time(&caps[2], false))
}

fn mixed_meridiem_range(line: &str, caps: &Captures<'_>) -> Option<String> {
    if within_timeblock(line, caps.get(0)?.start()) {
        return None;
    }
    let meridiem = &caps[3];
    let letter = meridiem.trim_start().chars().next()?;
    let start = format!("{}{letter}", &caps[1]);
    let end = format!("{}{meridiem}", &caps[2]);
    range_text(parse_time(&start, false), parse_time(&end, false))
}

fn trailing_digit_range(line: &str, caps: &Captures<'_>) -> Option<String> {
    let whole = caps.get(0)?;
    if follows_date_fragment(line, whole.start()) || glued_to_number(line, whole.start()) {
        return None;
    }
    let block = range_text(
        parse_digits_inferred(&caps[1]),
        parse_digits_inferred(&caps[2]),
    )?;
    Some(format!("{block}{}", &caps[3]))
}

fn colon_range(_line: &str, caps: &Captures<'_>) -> Option<String> {
    range_text(parse_time(&caps[1], false), parse_time(&caps[2], false))
}

fn bare_hour_range(line: &str, caps: &Captures<'_>) -> Option<String> {
    if follows_date_fragment(line, caps.get(2)?.start()) {
        return None;
    }
    let block = range_text(parse_time(&caps[2], true), parse_time(&caps[3], true))?;
    Some(format!("{}{block}{}", &caps[1], &caps[4]))
}

fn bare_to_colon_range(line: &str, caps: &Captures<'_>) -> Option<String> {
    if follows_date_fragment(line, caps.get(2)?.start()) {
        return None;
    }
    let block = range_text(parse_time(&caps[2], true), parse_time(&caps[3], false))?;
    Some(format!("{}{block}{}", &caps[1], &caps[4]))
}

fn leading_single_time(line: &str, caps: &Captures<'_>) -> Option<String> {
    let rest = &caps[3];
    if within_timeblock(line, caps.get(2)?.start())
        || starts_with_timeblock(rest)
        || UNRESOLVED_RANGE_RE.is_match(rest)
    {
        return None;
    }
    let start = parse_time(&caps[2], true)?;
    Some(format!("{}{} {rest}", &caps[1], Timeblock::starting_at(start)))
}

fn trailing_compact_time(_line: &str, caps: &Captures<'_>) -> Option<String> {
    let body = &caps[2];
    let digits = &caps[3];
    if starts_with_timeblock(body) {
        return None;
    }
    // Anything above 2359 is a stray number, not a clock value.
    if digits.parse::<u32>().ok()? > 2359 {
        return None;
    }
    let start = parse_time(digits, false)?;
    Some(format!("{}{} {body}", &caps[1], Timeblock::starting_at(start)))
}

fn trailing_meridiem_time(line: &str, caps: &Captures<'_>) -> Option<String> {
    let body = &caps[2];
    if starts_with_timeblock(body) || within_timeblock(line, caps.get(3)?.start()) {
        return None;
    }
    let start = parse_time(&caps[3], true)?;
    Some(format!("{}{} {body}", &caps[1], Timeblock::starting_at(start)))
}

fn range_text(start: Option<CanonicalTime>, end: Option<CanonicalTime>) -> Option<String> {
    Some(Timeblock::new(start?, end?).to_string())
}

/// True when byte `at` falls inside a canonical block already on the line.
fn within_timeblock(line: &str, at: usize) -> bool {
    TIMEBLOCK_RE
        .find_iter(line)
        .any(|block| block.range().contains(&at))
}

/// True when the characters just before `start` end in `YYYY-`.
fn follows_date_fragment(line: &str, start: usize) -> bool {
    let before = &line[..start];
    let from = before
        .char_indices()
        .rev()
        .nth(DATE_GUARD_WINDOW - 1)
        .map(|(index, _)| index)
        .unwrap_or(0);
    DATE_FRAGMENT_RE.is_match(&before[from..])
}

/// True when the match continues a longer number (`12345-6`, `01-19-2026`,
/// `10:00-11`).
fn glued_to_number(line: &str, start: usize) -> bool {
    let mut preceding = line[..start].chars().rev();
    match preceding.next() {
        Some(c) if c.is_ascii_digit() || c == ':' => true,
        Some('-' | '/' | '.') => preceding.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_rules, follows_date_fragment, glued_to_number, rule, rules, within_timeblock,
        RuleKind,
    };

    fn run(kind: RuleKind, line: &str) -> String {
        rule(kind).expect("rule registered").apply(line).into_owned()
    }

    #[test]
    fn chain_order_is_stable() {
        let kinds: Vec<&str> = rules().iter().map(|rule| rule.kind().as_str()).collect();
        assert_eq!(
            kinds,
            vec![
                "strip_highlight",
                "compact_range",
                "meridiem_range",
                "mixed_meridiem_range",
                "trailing_digit_range",
                "colon_range",
                "bare_hour_range",
                "bare_to_colon_range",
                "leading_single_time",
                "trailing_compact_time",
                "trailing_meridiem_time",
            ]
        );
    }

    #[test]
    fn strip_highlight_unwraps_both_markup_styles() {
        assert_eq!(
            run(RuleKind::StripHighlight, "- [ ] ==09:00 - 10:00== plan"),
            "- [ ] 09:00 - 10:00 plan"
        );
        assert_eq!(
            run(
                RuleKind::StripHighlight,
                "- [ ] <mark class=\"tb\">09:00 - 10:00</mark> plan"
            ),
            "- [ ] 09:00 - 10:00 plan"
        );
        assert_eq!(run(RuleKind::StripHighlight, "==note=="), "==note==");
    }

    #[test]
    fn compact_range_accepts_en_dash_and_keeps_invalid_values() {
        assert_eq!(
            run(RuleKind::CompactRange, "block 0900–1030 focus"),
            "block 09:00 - 10:30 focus"
        );
        assert_eq!(
            run(RuleKind::CompactRange, "call 1234-5678"),
            "call 1234-5678"
        );
    }

    #[test]
    fn meridiem_range_converts_both_ends() {
        assert_eq!(
            run(RuleKind::MeridiemRange, "11am-12:15pm lunch"),
            "11:00 - 12:15 lunch"
        );
        assert_eq!(
            run(RuleKind::MeridiemRange, "12a - 1a"),
            "00:00 - 01:00"
        );
    }

    #[test]
    fn mixed_meridiem_range_inherits_end_letter() {
        assert_eq!(
            run(RuleKind::MixedMeridiemRange, "gym 6-7:30pm"),
            "gym 18:00 - 19:30"
        );
        assert_eq!(
            run(RuleKind::MixedMeridiemRange, "review 9 - 10 am"),
            "review 09:00 - 10:00"
        );
        assert_eq!(
            run(RuleKind::MixedMeridiemRange, "pages 9-10 amazing"),
            "pages 9-10 amazing"
        );
    }

    #[test]
    fn mixed_meridiem_range_leaves_canonical_blocks_alone() {
        for line in [
            "- [ ] 10:00 - 11:00 PM sync",
            "- [ ] 09:00 - 09:30 am I late",
            "- [ ] 09:00 - 09:30 pm review",
        ] {
            assert_eq!(run(RuleKind::MixedMeridiemRange, line), line);
        }
        assert_eq!(
            run(RuleKind::MixedMeridiemRange, "- [ ] 9:00 - 10:00 pm sync"),
            "- [ ] 21:00 - 22:00 sync"
        );
    }

    #[test]
    fn trailing_digit_range_infers_both_sides() {
        assert_eq!(
            run(RuleKind::TrailingDigitRange, "- [ ] study 2-330"),
            "- [ ] study 14:00 - 15:30"
        );
        assert_eq!(
            run(RuleKind::TrailingDigitRange, "- [ ] study 930-11  "),
            "- [ ] study 09:30 - 11:00  "
        );
    }

    #[test]
    fn trailing_digit_range_skips_date_fragments() {
        assert_eq!(
            run(RuleKind::TrailingDigitRange, "Scheduled 2026-01-19"),
            "Scheduled 2026-01-19"
        );
        assert_eq!(
            run(RuleKind::TrailingDigitRange, "due 01-19-2026"),
            "due 01-19-2026"
        );
        assert_eq!(
            run(RuleKind::TrailingDigitRange, "at 10:00-11"),
            "at 10:00-11"
        );
    }

    #[test]
    fn colon_range_is_a_no_op_on_canonical_text() {
        assert_eq!(
            run(RuleKind::ColonRange, "- [ ] 01:00 - 02:00 night"),
            "- [ ] 01:00 - 02:00 night"
        );
        assert_eq!(
            run(RuleKind::ColonRange, "- [ ] 9:00-10:30 sync"),
            "- [ ] 09:00 - 10:30 sync"
        );
    }

    #[test]
    fn bare_hour_range_requires_bracket_or_heading_prefix() {
        assert_eq!(
            run(RuleKind::BareHourRange, "- [ ] 9 - 5 shift"),
            "- [ ] 09:00 - 17:00 shift"
        );
        assert_eq!(
            run(RuleKind::BareHourRange, "## 1-2"),
            "## 13:00 - 14:00"
        );
        assert_eq!(
            run(RuleKind::BareHourRange, "chapters 1-2 tonight"),
            "chapters 1-2 tonight"
        );
    }

    #[test]
    fn bare_to_colon_range_infers_only_the_bare_side() {
        assert_eq!(
            run(RuleKind::BareToColonRange, "- [ ] 9-10:30 sync"),
            "- [ ] 09:00 - 10:30 sync"
        );
        assert_eq!(
            run(RuleKind::BareToColonRange, "- [ ] 2 - 3:30 sync"),
            "- [ ] 14:00 - 03:30 sync"
        );
    }

    #[test]
    fn leading_single_time_expands_half_hour() {
        assert_eq!(
            run(RuleKind::LeadingSingleTime, "- [ ] 3p standup"),
            "- [ ] 15:00 - 15:30 standup"
        );
        assert_eq!(
            run(RuleKind::LeadingSingleTime, "- [ ] 11:45 pm wrap up"),
            "- [ ] 23:45 - 00:15 wrap up"
        );
        assert_eq!(
            run(RuleKind::LeadingSingleTime, "- [ ] 09:00 - 09:30 standup"),
            "- [ ] 09:00 - 09:30 standup"
        );
    }

    #[test]
    fn leading_single_time_expands_before_a_dash_separated_title() {
        assert_eq!(
            run(RuleKind::LeadingSingleTime, "- [ ] 3pm - call"),
            "- [ ] 15:00 - 15:30 - call"
        );
        assert_eq!(
            run(RuleKind::LeadingSingleTime, "- [ ] 3pm - 4 call"),
            "- [ ] 3pm - 4 call"
        );
    }

    #[test]
    fn trailing_compact_time_moves_range_to_front() {
        assert_eq!(
            run(RuleKind::TrailingCompactTime, "- [ ] call mom 1430"),
            "- [ ] 14:30 - 15:00 call mom"
        );
        assert_eq!(
            run(RuleKind::TrailingCompactTime, "- [ ] order 5000"),
            "- [ ] order 5000"
        );
        assert_eq!(
            run(RuleKind::TrailingCompactTime, "- [ ] 09:00 - 09:30 room 1430"),
            "- [ ] 09:00 - 09:30 room 1430"
        );
    }

    #[test]
    fn trailing_meridiem_time_moves_range_to_front() {
        assert_eq!(
            run(RuleKind::TrailingMeridiemTime, "- [ ] dentist 4:15 PM"),
            "- [ ] 16:15 - 16:45 dentist"
        );
        assert_eq!(
            run(RuleKind::TrailingMeridiemTime, "- [ ] dentist 13pm"),
            "- [ ] dentist 13pm"
        );
        assert_eq!(
            run(RuleKind::TrailingMeridiemTime, "- [ ] 10:00 - 11:00 PM"),
            "- [ ] 10:00 - 11:00 PM"
        );
    }

    #[test]
    fn apply_rules_runs_in_order() {
        assert_eq!(
            apply_rules("- [ ] 1400-1500 meeting"),
            "- [ ] 14:00 - 15:00 meeting"
        );
    }

    #[test]
    fn guards_inspect_preceding_text() {
        let line = "Scheduled 2026-01-19";
        let start = line.find("01-19").expect("fragment present");
        assert!(follows_date_fragment(line, start));
        assert!(!follows_date_fragment("- [ ] 9-10", 6));
        assert!(glued_to_number("12345-6", 1));
        assert!(!glued_to_number("x 9-10", 2));
        assert!(within_timeblock("- [ ] 09:00 - 09:30 pm", 14));
        assert!(!within_timeblock("- [ ] 09:00 - 09:30 pm", 20));
    }
}
