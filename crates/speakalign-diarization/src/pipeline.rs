//! Attach speaker labels to a transcription

use speakalign_core::{RawDiarizationSegment, Transcription, TranscriptionResult};
use tracing::{info, warn};

use crate::aligner::{align_with_report, AlignOptions, AlignmentReport};
use crate::coalescer::coalesce;
use crate::error::DiarizationError;

/// Coalesce segments into turns, align the transcription and build the result
///
/// When diarization found no segments the result has no speaker entries and
/// every chunk is reported as dropped.
pub fn diarize_transcript(
    transcription: Transcription,
    segments: &[RawDiarizationSegment],
    options: &AlignOptions,
) -> Result<(TranscriptionResult, AlignmentReport), DiarizationError> {
    let turns = if segments.is_empty() {
        warn!("No speakers detected in diarization output");
        Vec::new()
    } else {
        coalesce(segments)?
    };

    let alignment = align_with_report(&turns, transcription.chunks(), options)?;

    info!(
        "Speaker attribution completed: {} turns, {} speaker entries, {} chunks dropped",
        turns.len(),
        alignment.speakers.len(),
        alignment.report.dropped_chunks
    );

    Ok((
        TranscriptionResult::new(transcription, alignment.speakers),
        alignment.report,
    ))
}
