//! Single time-token parser.
//!
//! # Responsibility
//! - Recognize compact, colon, am/pm and bare-hour token shapes.
//! - Apply ambiguous-hour inference only to tokens without an explicit period.
//!
//! # Invariants
//! - Pure: no I/O, no logging, no shared mutable state.
//! - Any unrecognized or out-of-range token yields `None`; callers must keep
//!   the original text in that case.

use crate::time::canonical::CanonicalTime;
use once_cell::sync::Lazy;
use regex::Regex;

static COMPACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(\d{2})$").expect("valid compact time regex"));
static COLON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid colon time regex"));
static MERIDIEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))? *(am?|pm?)$").expect("valid meridiem time regex")
});
static BARE_HOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})$").expect("valid bare hour regex"));
static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,4}$").expect("valid digit run regex"));

/// Whether a token already pins its half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Explicit,
    Ambiguous,
}

#[derive(Debug, Clone, Copy)]
struct RawTime {
    hour: u32,
    minute: u32,
    period: Period,
}

/// Parses one time token into a canonical 24-hour value.
///
/// Shapes are detected in this order: compact digits (`930`, `1400`), colon
/// form (`9:30`, `14:00`), am/pm form (`3pm`, `9:30 a`), bare hour (`3`).
/// When `apply_inference` is set, hours without an explicit period go
/// through [`infer_hour`].
///
/// Bare hours above 12 are taken literally: `"23"` parses as `23:00`, while
/// `"24"` fails validation.
pub fn parse_time(token: &str, apply_inference: bool) -> Option<CanonicalTime> {
    let raw = detect_shape(token.trim())?;
    let hour = if apply_inference && raw.period == Period::Ambiguous {
        infer_hour(raw.hour)
    } else {
        raw.hour
    };
    CanonicalTime::new(hour, raw.minute)
}

/// Parses a 1–4 digit run and always infers the hour when it is 12 or less.
///
/// `"2"` -> `14:00`, `"930"` -> `09:30`, `"130"` -> `13:30`. Used for bare
/// digit ranges where compact values carry no explicit period of their own.
pub fn parse_digits_inferred(token: &str) -> Option<CanonicalTime> {
    let token = token.trim();
    if !DIGITS_RE.is_match(token) {
        return None;
    }
    let (hour, minute) = if token.len() <= 2 {
        (token.parse::<u32>().ok()?, 0)
    } else {
        split_compact(token)?
    };
    let hour = if hour <= 12 { infer_hour(hour) } else { hour };
    CanonicalTime::new(hour, minute)
}

/// Maps an hour without an explicit period to its most likely daytime value.
///
/// - `1..=5` -> afternoon (`+12`)
/// - `6..=8` -> evening (`+12`)
/// - anything else is returned unchanged (`9..=11` morning, `12` noon, `0`)
pub fn infer_hour(hour: u32) -> u32 {
    match hour {
        1..=5 => hour + 12,
        6..=8 => hour + 12,
        other => other,
    }
}

fn detect_shape(token: &str) -> Option<RawTime> {
    if COMPACT_RE.is_match(token) {
        let (hour, minute) = split_compact(token)?;
        return Some(RawTime {
            hour,
            minute,
            period: Period::Explicit,
        });
    }

    if let Some(caps) = COLON_RE.captures(token) {
        let hour = caps[1].parse::<u32>().ok()?;
        let minute = caps[2].parse::<u32>().ok()?;
        return Some(RawTime {
            hour,
            minute,
            period: if hour >= 13 {
                Period::Explicit
            } else {
                Period::Ambiguous
            },
        });
    }

    if let Some(caps) = MERIDIEM_RE.captures(token) {
        let hour = caps[1].parse::<u32>().ok()?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let minute = match caps.get(2) {
            Some(value) => value.as_str().parse::<u32>().ok()?,
            None => 0,
        };
        let is_pm = caps[3].to_ascii_lowercase().starts_with('p');
        let hour = match (is_pm, hour) {
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, 12) => 0,
            (false, h) => h,
        };
        return Some(RawTime {
            hour,
            minute,
            period: Period::Explicit,
        });
    }

    if BARE_HOUR_RE.is_match(token) {
        let hour = token.parse::<u32>().ok()?;
        return Some(RawTime {
            hour,
            minute: 0,
            period: if hour <= 12 {
                Period::Ambiguous
            } else {
                Period::Explicit
            },
        });
    }

    None
}

fn split_compact(token: &str) -> Option<(u32, u32)> {
    let caps = COMPACT_RE.captures(token)?;
    let hour = caps[1].parse::<u32>().ok()?;
    let minute = caps[2].parse::<u32>().ok()?;
    Some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::{infer_hour, parse_digits_inferred, parse_time};

    fn parsed(token: &str, infer: bool) -> Option<String> {
        parse_time(token, infer).map(|time| time.to_string())
    }

    #[test]
    fn inference_table_matches_daily_schedule() {
        let table: Vec<u32> = (0..=12).map(infer_hour).collect();
        assert_eq!(
            table,
            vec![0, 13, 14, 15, 16, 17, 18, 19, 20, 9, 10, 11, 12]
        );
    }

    #[test]
    fn compact_digits_skip_inference() {
        assert_eq!(parsed("930", true).as_deref(), Some("09:30"));
        assert_eq!(parsed("0300", true).as_deref(), Some("03:00"));
        assert_eq!(parsed("2360", false), None);
    }

    #[test]
    fn colon_form_infers_only_below_thirteen() {
        assert_eq!(parsed("3:30", true).as_deref(), Some("15:30"));
        assert_eq!(parsed("3:30", false).as_deref(), Some("03:30"));
        assert_eq!(parsed("14:05", true).as_deref(), Some("14:05"));
        assert_eq!(parsed("24:00", false), None);
    }

    #[test]
    fn meridiem_form_rejects_hours_outside_twelve_hour_clock() {
        assert_eq!(parsed("0am", true), None);
        assert_eq!(parsed("13pm", true), None);
    }

    #[test]
    fn digits_inferred_applies_policy_to_compact_values() {
        assert_eq!(
            parse_digits_inferred("130").map(|t| t.to_string()).as_deref(),
            Some("13:30")
        );
        assert_eq!(
            parse_digits_inferred("1030").map(|t| t.to_string()).as_deref(),
            Some("10:30")
        );
        assert_eq!(parse_digits_inferred("12345"), None);
        assert_eq!(parse_digits_inferred("x1"), None);
    }
}
