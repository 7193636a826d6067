//! Error types for tree building.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal scan failures. Only the root path can fail a scan outright;
/// everything below it is accumulated as [`TreeBuildError`] instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path not found.
    #[error("root path not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Permission denied on the root path.
    #[error("permission denied on root path: {path}")]
    RootPermissionDenied { path: PathBuf },

    /// Root path could not be resolved or read.
    #[error("cannot read root path {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Classify a root I/O failure.
    pub fn root_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::RootNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::RootPermissionDenied { path },
            _ => Self::RootUnreadable { path, source },
        }
    }
}

/// Kind of non-fatal tree build error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Permission/security failure reading an entry.
    PathAccess,
    /// Failure resolving a real/canonical path (dangling link,
    /// not-a-directory component, filesystem error).
    PathResolution,
    /// Generic I/O failure.
    PathIo,
}

/// A recorded, non-fatal failure encountered while enumerating or
/// resolving one path. Never aborts the walk that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeBuildError {
    /// Path where the failure occurred, when known.
    pub path: Option<PathBuf>,
    /// Cause classification.
    pub kind: ErrorKind,
    /// Underlying message.
    pub message: String,
}

impl TreeBuildError {
    /// Create an error with an explicit kind.
    pub fn new(path: Option<PathBuf>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// Record a failure listing or statting an entry, classified from the
    /// I/O error kind.
    pub fn path_error(path: Option<&std::path::Path>, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PathAccess,
            _ => ErrorKind::PathIo,
        };
        Self {
            path: path.map(PathBuf::from),
            kind,
            message: error.to_string(),
        }
    }

    /// Record a failure resolving a real path.
    pub fn resolution_error(path: &std::path::Path, error: &std::io::Error) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            kind: ErrorKind::PathResolution,
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for TreeBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
