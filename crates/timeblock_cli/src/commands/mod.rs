pub mod format;
pub mod highlight;
pub mod settings;
pub mod watch;

use std::path::Path;
use timeblock_core::FormatterSettings;

/// Loads settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<FormatterSettings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(FormatterSettings::load(path)?),
        None => Ok(FormatterSettings::default()),
    }
}
