//! Core logic for the timeblock formatter.
//! Normalizes time expressions in note lines into `HH:MM - HH:MM` blocks.

pub mod format;
pub mod highlight;
pub mod host;
pub mod logging;
pub mod settings;
pub mod time;

pub use format::engine::{
    classify_line, format_content, format_content_report, format_content_with, format_line,
    FormatOptions, FormatReport, LineClass, DEFAULT_CALENDAR_MARKER,
};
pub use format::rules::{apply_rules, rule, rules, RewriteRule, RuleKind};
pub use highlight::{is_canonical_timeblock, split_spans, timeblock_ranges, Span};
pub use host::formatter::{DocumentFormatter, FormatOutcome, SkipReason};
pub use host::store::{DocumentStore, FsDocumentStore, HostError};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use settings::{FormatterSettings, SettingsError};
pub use time::canonical::{CanonicalTime, Timeblock, TIMEBLOCK_PATTERN};
pub use time::parser::{infer_hour, parse_digits_inferred, parse_time};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
