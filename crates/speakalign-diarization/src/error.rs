//! Diarization error types

use speakalign_core::CoreError;
use thiserror::Error;

/// Diarization-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiarizationError {
    /// Malformed interval, empty required sequence, or nothing to align
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<CoreError> for DiarizationError {
    fn from(err: CoreError) -> Self {
        DiarizationError::InvalidInput(err.to_string())
    }
}
