//! Speaker attribution for transcripts
//!
//! Collapses raw diarization segments into speaker turns, aligns transcript
//! chunks to those turns by nearest end time, and groups adjacent chunks of
//! the same speaker.

pub mod aligner;
pub mod coalescer;
pub mod error;
pub mod grouper;
pub mod pipeline;

pub use aligner::{align, align_with_report, AlignOptions, Alignment, AlignmentReport};
pub use coalescer::coalesce;
pub use error::DiarizationError;
pub use grouper::{group, group_result};
pub use pipeline::diarize_transcript;

// Re-export types from speakalign-core
pub use speakalign_core::{
    RawDiarizationSegment, SpeakerLabeledChunk, SpeakerTurn, TimeInterval, TranscriptChunk,
    Transcription, TranscriptionResult,
};
