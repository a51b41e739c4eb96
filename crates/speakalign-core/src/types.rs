//! Shared transcript and diarization types

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed time span in seconds with `0 <= start <= end`
///
/// Serialized as a two-element `[start, end]` array. Deserialization goes
/// through [`TimeInterval::new`], so malformed intervals are rejected there
/// as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct TimeInterval {
    start: f64,
    end: f64,
}

impl TimeInterval {
    /// Create a validated interval
    pub fn new(start: f64, end: f64) -> Result<Self, CoreError> {
        check_timestamp(start)?;
        check_timestamp(end)?;
        if end < start {
            return Err(CoreError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start time in seconds
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Get the duration of this interval
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Extend the interval so it ends at `end`, never shrinking it
    pub fn extend_to(self, end: f64) -> Self {
        Self {
            start: self.start,
            end: self.end.max(end),
        }
    }
}

impl TryFrom<(f64, f64)> for TimeInterval {
    type Error = CoreError;

    fn try_from((start, end): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<TimeInterval> for (f64, f64) {
    fn from(interval: TimeInterval) -> Self {
        (interval.start, interval.end)
    }
}

fn check_timestamp(value: f64) -> Result<(), CoreError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidTimestamp(value))
    }
}

/// One transcribed span of speech
///
/// The end may be unknown for the last chunk of a transcription that was cut
/// off mid-utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChunkRecord", into = "ChunkRecord")]
pub struct TranscriptChunk {
    start: f64,
    end: Option<f64>,
    text: String,
}

impl TranscriptChunk {
    /// Create a chunk, validating its timestamps
    pub fn new(start: f64, end: Option<f64>, text: impl Into<String>) -> Result<Self, CoreError> {
        match end {
            Some(end) => {
                TimeInterval::new(start, end)?;
            }
            None => check_timestamp(start)?,
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
        })
    }

    /// Create a chunk with a known end
    pub fn closed(start: f64, end: f64, text: impl Into<String>) -> Result<Self, CoreError> {
        Self::new(start, Some(end), text)
    }

    /// Start time in seconds
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End time in seconds, `None` when unknown
    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// Transcribed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The chunk's interval, if its end is known
    pub fn interval(&self) -> Option<TimeInterval> {
        self.end.map(|end| TimeInterval {
            start: self.start,
            end,
        })
    }

    /// Interval closed at `fallback_end` when the real end is unknown
    ///
    /// The fallback is clamped so the result never ends before the chunk
    /// starts.
    pub fn interval_or(&self, fallback_end: f64) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.end.unwrap_or(fallback_end).max(self.start),
        }
    }

    /// Whether the end timestamp is unknown
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct ChunkRecord {
    timestamp: (f64, Option<f64>),
    text: String,
}

impl TryFrom<ChunkRecord> for TranscriptChunk {
    type Error = CoreError;

    fn try_from(record: ChunkRecord) -> Result<Self, Self::Error> {
        let (start, end) = record.timestamp;
        Self::new(start, end, record.text)
    }
}

impl From<TranscriptChunk> for ChunkRecord {
    fn from(chunk: TranscriptChunk) -> Self {
        Self {
            timestamp: (chunk.start, chunk.end),
            text: chunk.text,
        }
    }
}

/// Output of the transcription model: ordered chunks plus the full text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TranscriptionRecord", into = "TranscriptionRecord")]
pub struct Transcription {
    chunks: Vec<TranscriptChunk>,
    text: String,
}

impl Transcription {
    /// Create a transcription; only the last chunk may have an unknown end
    pub fn new(chunks: Vec<TranscriptChunk>, text: impl Into<String>) -> Result<Self, CoreError> {
        let last = chunks.len().saturating_sub(1);
        if let Some(index) = chunks
            .iter()
            .position(|chunk| chunk.is_open_ended())
            .filter(|index| *index != last)
        {
            return Err(CoreError::OpenEndedChunk { index });
        }
        Ok(Self {
            chunks,
            text: text.into(),
        })
    }

    /// Transcribed chunks in time order
    pub fn chunks(&self) -> &[TranscriptChunk] {
        &self.chunks
    }

    /// Full transcribed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Split into chunks and text
    pub fn into_parts(self) -> (Vec<TranscriptChunk>, String) {
        (self.chunks, self.text)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct TranscriptionRecord {
    chunks: Vec<TranscriptChunk>,
    #[serde(default)]
    text: String,
}

impl TryFrom<TranscriptionRecord> for Transcription {
    type Error = CoreError;

    fn try_from(record: TranscriptionRecord) -> Result<Self, Self::Error> {
        Self::new(record.chunks, record.text)
    }
}

impl From<Transcription> for TranscriptionRecord {
    fn from(transcription: Transcription) -> Self {
        Self {
            chunks: transcription.chunks,
            text: transcription.text,
        }
    }
}

/// Atomic speaker decision from the diarization model
///
/// Wire shape is `{"start", "end", "speaker"}`; `label` is accepted in place
/// of `speaker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentRecord", into = "SegmentRecord")]
pub struct RawDiarizationSegment {
    pub interval: TimeInterval,
    pub speaker: String,
}

impl RawDiarizationSegment {
    /// Create a validated segment
    pub fn new(start: f64, end: f64, speaker: impl Into<String>) -> Result<Self, CoreError> {
        Ok(Self {
            interval: TimeInterval::new(start, end)?,
            speaker: speaker.into(),
        })
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct SegmentRecord {
    start: f64,
    end: f64,
    #[serde(alias = "label")]
    speaker: String,
}

impl TryFrom<SegmentRecord> for RawDiarizationSegment {
    type Error = CoreError;

    fn try_from(record: SegmentRecord) -> Result<Self, Self::Error> {
        Self::new(record.start, record.end, record.speaker)
    }
}

impl From<RawDiarizationSegment> for SegmentRecord {
    fn from(segment: RawDiarizationSegment) -> Self {
        Self {
            start: segment.interval.start(),
            end: segment.interval.end(),
            speaker: segment.speaker,
        }
    }
}

/// Maximal run of consecutive same-speaker diarization segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    #[serde(rename = "timestamp")]
    pub interval: TimeInterval,
    pub speaker: String,
}

/// Transcript text attributed to one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerLabeledChunk {
    /// Speaker label (e.g., "SPEAKER_00")
    pub speaker: String,
    #[serde(rename = "timestamp")]
    pub interval: TimeInterval,
    pub text: String,
}

/// Final transcript handed to formatters and persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Speaker-attributed chunks, empty when diarization was not requested
    pub speakers: Vec<SpeakerLabeledChunk>,
    /// Raw transcription chunks
    pub chunks: Vec<TranscriptChunk>,
    /// Full transcribed text
    pub text: String,
}

impl TranscriptionResult {
    /// Assemble a result from a transcription and its speaker attribution
    ///
    /// The full text is trimmed.
    pub fn new(transcription: Transcription, speakers: Vec<SpeakerLabeledChunk>) -> Self {
        let (chunks, text) = transcription.into_parts();
        Self {
            speakers,
            chunks,
            text: text.trim().to_string(),
        }
    }

    /// Whether speaker data is present
    pub fn has_speakers(&self) -> bool {
        !self.speakers.is_empty()
    }
}
