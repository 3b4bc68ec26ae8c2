//! Typed error types for page-find.
//!
//! Search itself has a single failure mode, [`CompilationError`], which is
//! caught at the pattern compiler boundary and surfaced in the panel view.
//! [`StoreError`] covers the file-backed key/value store.

use thiserror::Error;

/// A query could not be turned into a usable matcher.
///
/// Carries the underlying message so it can be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompilationError {
    message: String,
}

impl CompilationError {
    /// Create an error carrying a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message to display.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<regex::Error> for CompilationError {
    fn from(e: regex::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Errors produced by the file-backed key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file did not contain a JSON object of strings.
    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
