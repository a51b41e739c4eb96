//! Align transcript chunks with speaker turns

use speakalign_core::{SpeakerLabeledChunk, SpeakerTurn, TimeInterval, TranscriptChunk};
use tracing::{debug, warn};

use crate::error::DiarizationError;

/// Alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOptions {
    /// Emit one chunk per speaker turn instead of one per transcript chunk
    pub group_by_speaker: bool,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            group_by_speaker: false,
        }
    }
}

/// What an alignment consumed and what it had to leave behind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentReport {
    /// Transcript chunks attributed to a speaker
    pub claimed_chunks: usize,
    /// Transcript chunks left over after the last turn
    pub dropped_chunks: usize,
    /// Speaker turns left over after the last chunk
    pub unclaimed_turns: usize,
}

impl AlignmentReport {
    /// True when every chunk and every turn was used
    pub fn is_exhaustive(&self) -> bool {
        self.dropped_chunks == 0 && self.unclaimed_turns == 0
    }
}

/// Speaker-labeled chunks together with the alignment report
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub speakers: Vec<SpeakerLabeledChunk>,
    pub report: AlignmentReport,
}

/// Attribute transcript chunks to speaker turns
///
/// See [`align_with_report`].
pub fn align(
    turns: &[SpeakerTurn],
    chunks: &[TranscriptChunk],
    group_by_speaker: bool,
) -> Result<Vec<SpeakerLabeledChunk>, DiarizationError> {
    align_with_report(turns, chunks, &AlignOptions { group_by_speaker }).map(|a| a.speakers)
}

/// Attribute transcript chunks to speaker turns
///
/// Each turn, in order, claims the remaining chunks up to and including the
/// one whose end is closest to the turn's end. Leftover chunks after the last
/// turn and leftover turns after the last chunk are dropped and counted in
/// the report.
///
/// With no turns the result is empty. Turns without any chunks is an error,
/// as are chunks whose known ends go backwards.
pub fn align_with_report(
    turns: &[SpeakerTurn],
    chunks: &[TranscriptChunk],
    options: &AlignOptions,
) -> Result<Alignment, DiarizationError> {
    if turns.is_empty() {
        if !chunks.is_empty() {
            warn!("No speaker turns, dropping {} transcript chunks", chunks.len());
        }
        return Ok(Alignment {
            speakers: Vec::new(),
            report: AlignmentReport {
                claimed_chunks: 0,
                dropped_chunks: chunks.len(),
                unclaimed_turns: 0,
            },
        });
    }

    if chunks.is_empty() {
        return Err(DiarizationError::InvalidInput(format!(
            "{} speaker turns but no transcript chunks to align",
            turns.len()
        )));
    }

    check_ends_ordered(chunks)?;

    let mut speakers = Vec::new();
    let mut cursor = 0;
    let mut used_turns = 0;

    for turn in turns {
        if cursor == chunks.len() {
            break;
        }

        let upto = cursor + closest_end(&chunks[cursor..], turn.interval.end());
        let claimed = &chunks[cursor..=upto];
        let fallback_end = turn.interval.end();

        if options.group_by_speaker {
            let first = &claimed[0];
            let last = &claimed[claimed.len() - 1];
            speakers.push(SpeakerLabeledChunk {
                speaker: turn.speaker.clone(),
                interval: TimeInterval::new(first.start(), last.interval_or(fallback_end).end())?,
                text: claimed.iter().map(|chunk| chunk.text()).collect(),
            });
        } else {
            speakers.extend(claimed.iter().map(|chunk| SpeakerLabeledChunk {
                speaker: turn.speaker.clone(),
                interval: chunk.interval_or(fallback_end),
                text: chunk.text().to_string(),
            }));
        }

        cursor = upto + 1;
        used_turns += 1;
    }

    let report = AlignmentReport {
        claimed_chunks: cursor,
        dropped_chunks: chunks.len() - cursor,
        unclaimed_turns: turns.len() - used_turns,
    };

    debug!(
        "Aligned {} chunks to {} speaker turns ({} output entries)",
        report.claimed_chunks,
        used_turns,
        speakers.len()
    );
    if report.dropped_chunks > 0 {
        warn!(
            "Diarization ended before the transcript, dropping {} chunks",
            report.dropped_chunks
        );
    }
    if report.unclaimed_turns > 0 {
        warn!(
            "Transcript ended before diarization, {} speaker turns have no text",
            report.unclaimed_turns
        );
    }

    Ok(Alignment { speakers, report })
}

/// Known chunk ends must never decrease
fn check_ends_ordered(chunks: &[TranscriptChunk]) -> Result<(), DiarizationError> {
    let mut previous_end = 0.0;
    for (index, chunk) in chunks.iter().enumerate() {
        if let Some(end) = chunk.end() {
            if end < previous_end {
                return Err(DiarizationError::InvalidInput(format!(
                    "chunk {} ends at {} before the previous chunk's end {}",
                    index, end, previous_end
                )));
            }
            previous_end = end;
        }
    }
    Ok(())
}

/// Index of the chunk whose end is closest to `target`
///
/// Ties go to the earlier chunk. An unknown end counts as infinitely far
/// away, so it only wins when it is the sole candidate. Chunk ends are
/// non-decreasing, so the scan stops once ends have passed `target` and
/// distances stop shrinking.
fn closest_end(chunks: &[TranscriptChunk], target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for (i, chunk) in chunks.iter().enumerate() {
        let end = chunk.end().unwrap_or(f64::INFINITY);
        let distance = (end - target).abs();

        if distance < best_distance {
            best = i;
            best_distance = distance;
        } else if end >= target {
            break;
        }
    }

    best
}
