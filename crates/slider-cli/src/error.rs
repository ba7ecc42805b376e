use std::path::PathBuf;

use slider_core::PuzzleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("no saved session at {path}")]
    MissingSession { path: PathBuf },
}

impl CliError {
    /// Process exit status: 2 for rejected input (bad configuration, corrupt
    /// or missing session, bad arguments), 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Puzzle(error) if error.is_rejection() => 2,
            Self::InvalidArgument { .. } | Self::MissingSession { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use slider_core::PuzzleError;

    #[test]
    fn rejections_exit_with_two() {
        assert_eq!(CliError::from(PuzzleError::corrupt("x")).exit_code(), 2);
        assert_eq!(CliError::from(PuzzleError::invalid("x")).exit_code(), 2);
        assert_eq!(CliError::invalid("bad").exit_code(), 2);
    }

    #[test]
    fn io_failures_exit_with_one() {
        let error = CliError::from(std::io::Error::other("disk"));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn puzzle_errors_display_transparently() {
        let error = CliError::from(PuzzleError::corrupt("short"));
        assert_eq!(error.to_string(), "corrupt persisted state: short");
    }
}
