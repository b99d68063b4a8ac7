//! Error types for linklift.
//!
//! Library crates use [`LinkliftError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all linklift operations.
#[derive(Debug, thiserror::Error)]
pub enum LinkliftError {
    /// The export document has no top-level folder list (`<body> > <dl>`).
    #[error("bookmark export has no top-level folder list")]
    MissingRoot,

    /// An entry in the export is neither a folder nor a bookmark.
    #[error("malformed export entry: {message}")]
    Structure { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Input rejected at a boundary (wrong file type, bad flag value).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LinkliftError>;

impl LinkliftError {
    /// Create a structure error from any displayable message.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = LinkliftError::MissingRoot;
        assert_eq!(
            err.to_string(),
            "bookmark export has no top-level folder list"
        );

        let err = LinkliftError::structure("<dt> with neither folder nor link");
        assert!(err.to_string().contains("neither folder nor link"));

        let err = LinkliftError::config("bad strategy name");
        assert_eq!(err.to_string(), "config error: bad strategy name");
    }
}
