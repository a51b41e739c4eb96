//! Align command

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use speakalign_core::{
    ExportOptions, Exporter, OutputFormat, RawDiarizationSegment, Transcription,
    TranscriptionResult,
};
use speakalign_diarization::{diarize_transcript, group_result, AlignOptions, AlignmentReport};
use tracing::info;

use crate::cli::AlignArgs;

/// One alignment run, as given on the command line or in a batch manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignJob {
    pub transcription: PathBuf,
    #[serde(default)]
    pub diarization: Option<PathBuf>,
    pub output: PathBuf,
    #[serde(default)]
    pub group_by_speaker: bool,
    #[serde(default)]
    pub pretty: bool,
}

impl From<AlignArgs> for AlignJob {
    fn from(args: AlignArgs) -> Self {
        Self {
            transcription: args.transcription,
            diarization: args.diarization,
            output: args.output,
            group_by_speaker: args.group_by_speaker,
            pretty: args.pretty,
        }
    }
}

pub fn run(args: AlignArgs) -> Result<()> {
    let job = AlignJob::from(args);
    let report = execute(&job)?;

    info!(
        "Attributed {} chunks ({} dropped, {} turns without text)",
        report.claimed_chunks, report.dropped_chunks, report.unclaimed_turns
    );
    Ok(())
}

/// Load the inputs, attribute speakers and write the output file
pub fn execute(job: &AlignJob) -> Result<AlignmentReport> {
    let format = OutputFormat::from_path(&job.output)?;

    let transcription: Transcription = load_json(&job.transcription)?;

    let (result, report) = match &job.diarization {
        Some(path) => {
            let segments: Vec<RawDiarizationSegment> = load_json(path)?;
            let options = AlignOptions {
                group_by_speaker: job.group_by_speaker,
            };
            diarize_transcript(transcription, &segments, &options)
                .with_context(|| format!("Failed to align '{}'", job.transcription.display()))?
        }
        None => {
            info!("No diarization given, writing transcript without speakers");
            (
                TranscriptionResult::new(transcription, Vec::new()),
                AlignmentReport::default(),
            )
        }
    };

    // Plain text output reads best one block per speaker turn
    let result = if format == OutputFormat::Txt {
        group_result(result)
    } else {
        result
    };

    let options = ExportOptions {
        pretty: job.pretty,
        format: Some(format),
    };
    Exporter::write(&result, &job.output, &options)
        .with_context(|| format!("Failed to write '{}'", job.output.display()))?;

    Ok(report)
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("File not found: '{}'", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}
