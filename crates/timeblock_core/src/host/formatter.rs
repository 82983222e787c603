//! Formatting use-cases driven by host triggers.
//!
//! # Responsibility
//! - React to file-change events inside the configured scope.
//! - Serve the explicit "format current document" command.
//! - Persist text only when formatting changed it.
//!
//! # Invariants
//! - Unchanged documents are never written, so rewrite-triggered events
//!   settle after one extra no-op pass.
//! - Calendar-marked lines are honored on every path.

use crate::format::engine::{format_content_report, FormatOptions};
use crate::host::store::{DocumentStore, HostError};
use crate::settings::FormatterSettings;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Why a trigger did not format anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `format_on_save` is off.
    Disabled,
    /// Path is outside the watched folder or has another extension.
    OutOfScope,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::OutOfScope => "out_of_scope",
        }
    }
}

/// Result of one formatting trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    Unchanged,
    Rewritten { changed_lines: usize },
    Skipped(SkipReason),
}

/// Formatter service over a host document store.
pub struct DocumentFormatter<S: DocumentStore> {
    store: S,
    settings: FormatterSettings,
    root: PathBuf,
}

impl<S: DocumentStore> DocumentFormatter<S> {
    /// Creates a service; `root` anchors the watched-folder filter.
    pub fn new(store: S, settings: FormatterSettings, root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            settings,
            root: root.into(),
        }
    }

    pub fn settings(&self) -> &FormatterSettings {
        &self.settings
    }

    /// Replaces settings, e.g. after the user edits them.
    pub fn update_settings(&mut self, settings: FormatterSettings) {
        self.settings = settings;
    }

    /// Handles a saved/modified notification for `path`.
    pub fn handle_file_change(&self, path: &Path) -> Result<FormatOutcome, HostError> {
        if !self.settings.format_on_save {
            return Ok(self.skip(path, SkipReason::Disabled));
        }
        if !self.settings.matches_path(&self.root, path) {
            return Ok(self.skip(path, SkipReason::OutOfScope));
        }
        self.format_document(path)
    }

    /// Formats one document regardless of the save toggle and folder filter.
    pub fn format_document(&self, path: &Path) -> Result<FormatOutcome, HostError> {
        let started_at = Instant::now();
        let original = self.store.read(path).inspect_err(|err| {
            error!(
                "event=format_document module=host status=error stage=read path={} error={}",
                path.display(),
                err
            );
        })?;

        let report = format_content_report(&original, &self.options());
        if !report.is_changed() {
            debug!(
                "event=format_document module=host status=ok result=unchanged path={} duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            return Ok(FormatOutcome::Unchanged);
        }

        self.store
            .write(path, &report.content)
            .inspect_err(|err| {
                error!(
                    "event=format_document module=host status=error stage=write path={} error={}",
                    path.display(),
                    err
                );
            })?;
        info!(
            "event=format_document module=host status=ok result=rewritten path={} changed_lines={} duration_ms={}",
            path.display(),
            report.changed_lines,
            started_at.elapsed().as_millis()
        );
        Ok(FormatOutcome::Rewritten {
            changed_lines: report.changed_lines,
        })
    }

    /// Formats in-editor text; returns `Some` only when it changed.
    pub fn format_text(&self, text: &str) -> Option<String> {
        let report = format_content_report(text, &self.options());
        report.is_changed().then_some(report.content)
    }

    fn options(&self) -> FormatOptions {
        self.settings.format_options()
    }

    fn skip(&self, path: &Path, reason: SkipReason) -> FormatOutcome {
        debug!(
            "event=format_document module=host status=skip reason={} path={}",
            reason.as_str(),
            path.display()
        );
        FormatOutcome::Skipped(reason)
    }
}
