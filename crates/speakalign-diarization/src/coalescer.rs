//! Collapse raw diarization segments into speaker turns

use speakalign_core::{RawDiarizationSegment, SpeakerTurn, TimeInterval};
use tracing::debug;

use crate::error::DiarizationError;

/// Merge consecutive same-speaker segments into speaker turns
///
/// A turn ends where the next speaker's first segment starts, so any gap the
/// diarizer leaves between two speakers belongs to the earlier turn. The last
/// turn ends at the last segment's end. Segments must be ordered by start
/// time; they are not re-sorted.
pub fn coalesce(segments: &[RawDiarizationSegment]) -> Result<Vec<SpeakerTurn>, DiarizationError> {
    let (first, rest) = segments.split_first().ok_or_else(|| {
        DiarizationError::InvalidInput("no diarization segments to coalesce".to_string())
    })?;

    let mut turns = Vec::new();
    let mut speaker = &first.speaker;
    let mut run_start = first.interval.start();

    for segment in rest {
        if segment.speaker != *speaker {
            turns.push(SpeakerTurn {
                interval: TimeInterval::new(run_start, segment.interval.start())?,
                speaker: speaker.clone(),
            });
            speaker = &segment.speaker;
            run_start = segment.interval.start();
        }
    }

    let last = rest.last().unwrap_or(first);
    turns.push(SpeakerTurn {
        interval: TimeInterval::new(run_start, last.interval.end())?,
        speaker: speaker.clone(),
    });

    debug!(
        "Coalesced {} diarization segments into {} speaker turns",
        segments.len(),
        turns.len()
    );

    Ok(turns)
}
