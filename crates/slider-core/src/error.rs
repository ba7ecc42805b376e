#![forbid(unsafe_code)]

//! Error types for puzzle construction and session restore.
//!
//! Most rejected interactions (a diagonal `shift`, a pointer-down while a
//! slide is settling, coordinates outside the board) are policy no-ops and
//! never surface here. Only two things are genuine failures: a configuration
//! that cannot produce a board, and a persisted session that does not
//! describe one.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("corrupt persisted state: {reason}")]
    CorruptState { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PuzzleError {
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptState {
            reason: reason.into(),
        }
    }

    /// True for errors raised before any live state was touched.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::CorruptState { .. }
        )
    }
}
