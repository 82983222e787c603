//! Canonical clock values.
//!
//! # Responsibility
//! - Hold a validated `HH:MM` value and its `HH:MM - HH:MM` pair form.
//! - Provide minute arithmetic used for end-time synthesis.
//!
//! # Invariants
//! - `hour` is in `0..=23`, `minute` is in `0..=59`.
//! - Display output is always zero-padded to two digits per field.

use std::fmt::{Display, Formatter};

/// Textual shape shared by formatter output and highlight recognition.
pub const TIMEBLOCK_PATTERN: &str = r"\d{2}:\d{2} - \d{2}:\d{2}";

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Validated 24-hour clock value rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalTime {
    hour: u8,
    minute: u8,
}

impl CanonicalTime {
    /// Builds a clock value, rejecting out-of-range fields.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Adds minutes, wrapping past midnight back to `00:00`.
    pub fn plus_minutes(self, minutes: u16) -> Self {
        let total = (self.hour as u16 * MINUTES_PER_HOUR + self.minute as u16 + minutes)
            % MINUTES_PER_DAY;
        Self {
            hour: (total / MINUTES_PER_HOUR) as u8,
            minute: (total % MINUTES_PER_HOUR) as u8,
        }
    }
}

impl Display for CanonicalTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Start/end pair rendered as `HH:MM - HH:MM`.
///
/// The end is not required to follow the start: ranges crossing midnight
/// (`23:00 - 01:00`) are kept as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeblock {
    pub start: CanonicalTime,
    pub end: CanonicalTime,
}

impl Timeblock {
    /// Default length of a block synthesized from a single start time.
    pub const IMPLICIT_DURATION_MINUTES: u16 = 30;

    pub fn new(start: CanonicalTime, end: CanonicalTime) -> Self {
        Self { start, end }
    }

    /// Expands a lone start time into a block of the implicit duration.
    pub fn starting_at(start: CanonicalTime) -> Self {
        Self {
            start,
            end: start.plus_minutes(Self::IMPLICIT_DURATION_MINUTES),
        }
    }
}

impl Display for Timeblock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
