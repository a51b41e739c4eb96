//! Core error types

use thiserror::Error;

/// Errors raised while building or validating transcript values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Timestamp is negative or not a finite number
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(f64),

    /// Interval ends before it starts
    #[error("End time is less than start time: [{start}, {end}]")]
    EndBeforeStart { start: f64, end: f64 },

    /// Only the last chunk of a transcription may have an unknown end
    #[error("Chunk {index} has an unknown end but is not the last chunk")]
    OpenEndedChunk { index: usize },
}
