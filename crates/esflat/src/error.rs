//! Error taxonomy for a bundling run
//!
//! Unanticipated text shapes are never errors: the stripper passes them
//! through untouched. Everything here aborts the run before any output is
//! written.

use std::path::PathBuf;

/// Failures that abort a bundling run
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// A listed module does not exist on disk
    #[error("{} not found!", .path.display())]
    MissingModule { path: PathBuf },

    /// A listed module exists but could not be read as UTF-8 text
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The assembled bundle could not be persisted
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is missing, unreadable or malformed
    #[error("invalid configuration in {}: {}", .path.display(), .message)]
    Config { path: PathBuf, message: String },

    /// The shared helper description could not be turned into a pattern
    #[error("invalid shared helper description: {0}")]
    InvalidHelper(#[from] regex::Error),
}

pub type BundleResult<T> = Result<T, BundleError>;
