//! Error types for kask
//!
//! All modules use `KaskResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kask operations
pub type KaskResult<T> = Result<T, KaskError>;

/// All errors that can occur in kask
#[derive(Error, Debug)]
pub enum KaskError {
    // Environment errors
    #[error("Could not determine the user home directory")]
    HomeDirectoryUnavailable,

    // Version errors
    #[error("Invalid version string: {raw:?} (expected \"dev\" or \"major.minor.patch\")")]
    InvalidVersionFormat { raw: String },

    // Distribution errors
    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to extract archive {path}: {reason}")]
    ArchiveExtractionFailed { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Failed to launch {command}")]
    ChildProcessLaunchFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KaskError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an extraction error
    pub fn extraction(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ArchiveExtractionFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DownloadFailed { .. } => {
                Some("Check network connectivity, or set KUI_DIST to a mirror host")
            }
            Self::ArchiveExtractionFailed { .. } => {
                Some("Run: kask refresh (re-downloads the distribution)")
            }
            Self::InvalidVersionFormat { .. } => {
                Some("kask was built with a malformed version; rebuild or reinstall it")
            }
            _ => None,
        }
    }
}
