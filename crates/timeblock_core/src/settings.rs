//! Formatter settings persisted by the host.
//!
//! # Responsibility
//! - Define the serializable configuration for automatic formatting.
//! - Decide whether a changed file falls inside the formatting scope.
//!
//! # Invariants
//! - Missing fields deserialize to defaults.
//! - `file_extension` is stored without a leading dot.
//! - A missing settings file is not an error; defaults apply.

use crate::format::engine::{FormatOptions, DEFAULT_CALENDAR_MARKER};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

const DEFAULT_FILE_EXTENSION: &str = "md";

/// Host-facing configuration for the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatterSettings {
    /// Folder, relative to the notes root, whose files are formatted on
    /// save. Empty means the whole root.
    pub watch_folder: String,
    /// Extension of files formatted on save, e.g. `md`.
    pub file_extension: String,
    /// Status character of calendar-imported tasks, which are never touched.
    pub calendar_marker: char,
    /// Whether file-change events trigger formatting at all.
    pub format_on_save: bool,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            watch_folder: String::new(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            calendar_marker: DEFAULT_CALENDAR_MARKER,
            format_on_save: true,
        }
    }
}

impl FormatterSettings {
    /// Parses settings from JSON, normalizing and validating the result.
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = serde_json::from_str(raw)?;
        settings.normalize();
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a JSON file; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let settings = Self::from_json_str(&raw)?;
                info!(
                    "event=settings_load module=settings status=ok path={}",
                    path.display()
                );
                Ok(settings)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "event=settings_load module=settings status=skip reason=missing path={}",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(err) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source: err,
            }),
        }
    }

    /// Writes settings as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|err| SettingsError::Io {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Checks declaration-level invariants.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let extension = self.file_extension.trim();
        if extension.is_empty() {
            return Err(SettingsError::EmptyExtension);
        }
        if extension
            .chars()
            .any(|c| c == '.' || c == '/' || c == '\\' || c.is_whitespace())
        {
            return Err(SettingsError::InvalidExtension(self.file_extension.clone()));
        }
        if self.calendar_marker.is_whitespace() || self.calendar_marker == ']' {
            return Err(SettingsError::InvalidCalendarMarker(self.calendar_marker));
        }
        Ok(())
    }

    /// Formatting switches derived from these settings.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            calendar_marker: self.calendar_marker,
        }
    }

    /// Returns whether `path` is inside the watched folder of `root` and
    /// carries the configured extension.
    pub fn matches_path(&self, root: &Path, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.file_extension.trim()));
        if !has_extension {
            return false;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let folder = self.watch_folder.trim().trim_matches(['/', '\\']);
        if folder.is_empty() {
            return true;
        }
        let folder_components: Vec<Component<'_>> = Path::new(folder).components().collect();
        let path_components: Vec<Component<'_>> = relative.components().collect();
        path_components.len() > folder_components.len()
            && path_components.starts_with(&folder_components)
    }

    fn normalize(&mut self) {
        let trimmed = self.file_extension.trim().trim_start_matches('.');
        self.file_extension = trimmed.to_string();
        self.watch_folder = self.watch_folder.trim().to_string();
    }
}

/// Settings load/validation errors.
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    EmptyExtension,
    InvalidExtension(String),
    InvalidCalendarMarker(char),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "settings file `{}` unavailable: {source}", path.display())
            }
            Self::Json(err) => write!(f, "settings json error: {err}"),
            Self::EmptyExtension => write!(f, "file extension must not be empty"),
            Self::InvalidExtension(value) => write!(f, "file extension is invalid: `{value}`"),
            Self::InvalidCalendarMarker(value) => {
                write!(f, "calendar marker is invalid: `{value}`")
            }
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}
