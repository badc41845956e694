//! # Design
//!
//! - Constant error messages; the path and operation live in fields.
//! - Keep the source error so callers and tests can inspect the cause.
//! - `NotFound` never appears here: a missing target is a vacuous success.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for wipe operations.
pub type WipeResult<T> = Result<T, WipeError>;

/// Why a single target could not be destroyed.
#[derive(Debug, Error)]
pub enum WipeError {
    /// Insufficient permission to open, write, or delete.
    #[error("access denied")]
    AccessDenied {
        /// Operation that was refused.
        operation: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Any other IO failure (disk full, device fault, entry changed type).
    #[error("io failure")]
    Io {
        /// Operation that failed.
        operation: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The OS randomness source failed while building a random pass.
    #[error("random source failure")]
    Random {
        /// File whose pass could not be generated.
        path: PathBuf,
        /// Underlying OS error.
        source: rand_core::OsError,
    },
    /// Read-back after the final pass did not match what was written.
    #[error("verification mismatch")]
    Verification {
        /// File that failed verification.
        path: PathBuf,
    },
    /// Directory traversal failed on an entry.
    #[error("traversal failure")]
    Traversal {
        /// Entry the walker was visiting, when known.
        path: PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },
    /// Some entries of a tree were not destroyed.
    #[error("partial tree failure")]
    PartialTree {
        /// Entries that failed.
        failed: usize,
        /// Entries visited.
        total: usize,
    },
    /// The batch was cancelled before this target started.
    #[error("cancelled before start")]
    Cancelled,
}

impl WipeError {
    /// Classify an IO error, mapping permission failures to `AccessDenied`.
    pub(crate) fn io(operation: &'static str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::AccessDenied {
                operation,
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::Io {
                operation,
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Operation name for IO-backed variants.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::AccessDenied { operation, .. } | Self::Io { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Message including the context fields, for logs and terminal output.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::AccessDenied {
                operation,
                path,
                source,
            }
            | Self::Io {
                operation,
                path,
                source,
            } => format!("{self} during {operation} of {}: {source}", path.display()),
            Self::Random { path, source } => {
                format!("{self} for {}: {source}", path.display())
            }
            Self::Verification { path } => format!("{self} for {}", path.display()),
            Self::Traversal { path, source } => {
                format!("{self} at {}: {source}", path.display())
            }
            Self::PartialTree { failed, total } => {
                format!("{self}: {failed} of {total} entries not destroyed")
            }
            Self::Cancelled => self.to_string(),
        }
    }
}

/// Errors produced while validating caller configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Pass count outside the accepted policy range.
    #[error("pass count {passes} outside allowed range {min}..={max}")]
    PassesOutOfRange {
        /// Requested pass count.
        passes: i32,
        /// Smallest accepted value.
        min: i32,
        /// Largest accepted value.
        max: i32,
    },
    /// Worker count must be at least one.
    #[error("worker count must be at least 1")]
    ZeroJobs,
    /// The worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    Pool(String),
}
