//! Document storage collaborator.
//!
//! The host application owns the files; core only reads and writes whole
//! documents through this seam.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Host-level storage failures.
#[derive(Debug)]
pub enum HostError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document is not valid UTF-8 text.
    NotText(PathBuf),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::NotText(path) => write!(f, "document is not UTF-8 text: `{}`", path.display()),
        }
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::NotText(_) => None,
        }
    }
}

/// Whole-document read/write contract.
pub trait DocumentStore {
    fn read(&self, path: &Path) -> Result<String, HostError>;
    fn write(&self, path: &Path, content: &str) -> Result<(), HostError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn read(&self, path: &Path) -> Result<String, HostError> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), HostError> {
        (**self).write(path, content)
    }
}

/// Filesystem-backed store resolving relative paths against a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn read(&self, path: &Path) -> Result<String, HostError> {
        let resolved = self.resolve(path);
        let bytes = std::fs::read(&resolved).map_err(|err| HostError::Read {
            path: resolved.clone(),
            source: err,
        })?;
        String::from_utf8(bytes).map_err(|_| HostError::NotText(resolved))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), HostError> {
        let resolved = self.resolve(path);
        std::fs::write(&resolved, content).map_err(|err| HostError::Write {
            path: resolved,
            source: err,
        })
    }
}
