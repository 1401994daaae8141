//! Error types for content loading and quiz sessions.
//!
//! Content errors are contained per file by the repository and surfaced as
//! diagnostics; session errors reject an operation without touching state.

use thiserror::Error;

/// Errors raised while discovering or parsing quiz content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The content directory, or a named content file, does not exist.
    #[error("content not found: {0}")]
    ContentNotFound(String),

    /// A file failed structural validation.
    #[error("malformed content in {file}: {reason}")]
    MalformedContent { file: String, reason: String },

    /// A file name does not carry the expected routing tokens.
    #[error("unparseable content file name: {0}")]
    UnparseableFileName(String),

    /// The source could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl ContentError {
    pub(crate) fn malformed(file: &str, reason: impl Into<String>) -> Self {
        ContentError::MalformedContent {
            file: file.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error only means the file is not quiz content.
    pub fn is_skippable(&self) -> bool {
        matches!(self, ContentError::UnparseableFileName(_))
    }
}

/// Operations a quiz session refuses to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session has already moved past its last question.
    #[error("quiz session is already completed")]
    Completed,

    /// The chosen option does not exist on the current question.
    #[error("option {index} is out of range (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    /// A result was requested before the session finished.
    #[error("quiz session is not completed yet")]
    NotCompleted,
}
