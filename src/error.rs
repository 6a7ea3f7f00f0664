//! Error taxonomy for archive builds.
//!
//! Every failure `build` can report maps to exactly one variant here; the
//! CLI translates variants into process exit codes.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// All the ways a build can fail.
///
/// None of these are transient: each one reflects an input or environment
/// condition the caller has to fix, so nothing here is ever retried.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A package root or the output's parent directory does not exist.
    #[error("no such file or directory: {}", path.display())]
    NotFound { path: PathBuf },

    /// Two package roots claim the same archive path with different files.
    #[error(
        "archive path {archive_path:?} is claimed by both {} and {}",
        first.display(),
        second.display()
    )]
    Collision {
        archive_path: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The entry-point string is not of the form `module.path:callable`.
    #[error("invalid entry point {given:?}: {reason}")]
    InvalidEntryPoint { given: String, reason: String },

    /// The destination cannot be created or overwritten.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O fault while reading sources or writing the archive.
    #[error("{context}: {source}")]
    Io { context: String, source: io::Error },
}

impl BuildError {
    /// Process exit code for this error, following the sysexits convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidEntryPoint { .. } => 64,
            Self::Collision { .. } => 65,
            Self::NotFound { .. } => 66,
            Self::Io { .. } => 74,
            Self::PermissionDenied { .. } => 77,
        }
    }

    /// Classify an I/O error against the path it concerned.
    pub(crate) fn io(context: &str, path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::Io {
                context: format!("{context} ({})", path.display()),
                source,
            },
        }
    }
}
