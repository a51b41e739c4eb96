//! Merge adjacent chunks that belong to the same speaker

use speakalign_core::{SpeakerLabeledChunk, TranscriptionResult};
use tracing::debug;

/// Merge runs of adjacent same-speaker chunks into one chunk each
///
/// The merged interval runs from the first chunk's start to the last chunk's
/// end. Texts are trimmed and joined with a single space. Grouping an
/// already grouped sequence returns it unchanged.
pub fn group(labeled: Vec<SpeakerLabeledChunk>) -> Vec<SpeakerLabeledChunk> {
    let input_len = labeled.len();
    let mut grouped: Vec<SpeakerLabeledChunk> = Vec::new();

    for mut chunk in labeled {
        let text = chunk.text.trim();

        if let Some(last) = grouped.last_mut() {
            if last.speaker == chunk.speaker {
                last.interval = last.interval.extend_to(chunk.interval.end());
                if last.text.is_empty() {
                    last.text = text.to_string();
                } else if !text.is_empty() {
                    last.text.push(' ');
                    last.text.push_str(text);
                }
                continue;
            }
        }

        chunk.text = text.to_string();
        grouped.push(chunk);
    }

    debug!("Grouped {} speaker chunks into {} runs", input_len, grouped.len());
    grouped
}

/// Group the speaker entries of a result
///
/// A result without speaker data is returned as is.
pub fn group_result(mut result: TranscriptionResult) -> TranscriptionResult {
    if !result.has_speakers() {
        return result;
    }

    result.speakers = group(std::mem::take(&mut result.speakers));
    result
}
