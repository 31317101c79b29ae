//! Error types for the media renamer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media renamer.
#[derive(Error, Debug)]
pub enum Error {
    // Fatal: nothing has been touched yet
    #[error("Cannot rename: {0}")]
    Configuration(String),

    #[error("Could not prepare destination {path}: {reason}")]
    Layout { path: PathBuf, reason: String },

    #[error("File is not accessible: {0}")]
    Access(PathBuf),

    // Recoverable, reported per artifact
    #[error("Failed to relocate {path}: {reason}")]
    Artifact { path: PathBuf, reason: String },

    #[error("Refusing to delete protected path: {0}")]
    SafetyViolation(PathBuf),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Checksum mismatch after copying: {0}")]
    ChecksumMismatch(PathBuf),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a layout error for a directory operation.
    pub fn layout<S: Into<String>>(path: impl Into<PathBuf>, reason: S) -> Self {
        Error::Layout {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an artifact-level error.
    pub fn artifact<S: Into<String>>(path: impl Into<PathBuf>, reason: S) -> Self {
        Error::Artifact {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the whole rename.
    ///
    /// Fatal errors are raised before any artifact-level file action, so the
    /// item's previous state is still intact when one is returned.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::Layout { .. } | Error::Access(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::Configuration("no title".into()).is_fatal());
        assert!(Error::layout("/movies/x", "exists").is_fatal());
        assert!(Error::Access(PathBuf::from("/movies/x.mkv")).is_fatal());
        assert!(!Error::artifact("/movies/poster.jpg", "denied").is_fatal());
        assert!(!Error::SafetyViolation(PathBuf::from("/movies")).is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = Error::artifact("/m/poster.jpg", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to relocate /m/poster.jpg: permission denied"
        );
    }
}
