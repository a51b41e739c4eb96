//! Transcript export module

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{TranscriptChunk, TranscriptionResult};

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported output format: '{0}'. Supported formats: JSON, TXT, SRT, VTT")]
    UnsupportedFormat(String),

    #[error("Duration must be a positive number: {0}")]
    NegativeDuration(f64),
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Txt,
    Srt,
    Vtt,
}

impl OutputFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "txt" => Ok(OutputFormat::Txt),
            "srt" => Ok(OutputFormat::Srt),
            "vtt" => Ok(OutputFormat::Vtt),
            _ => Err(ExportError::UnsupportedFormat(extension.to_uppercase())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Txt => write!(f, "txt"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Output format (None = from file extension)
    pub format: Option<OutputFormat>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            format: None,
        }
    }
}

/// Transcript exporter
pub struct Exporter;

impl Exporter {
    /// Render and write a result to `output_path`
    pub fn write<P: AsRef<Path>>(
        result: &TranscriptionResult,
        output_path: P,
        options: &ExportOptions,
    ) -> Result<OutputFormat, ExportError> {
        let output_path = output_path.as_ref();

        let format = match options.format {
            Some(format) => format,
            None => OutputFormat::from_path(output_path)?,
        };

        // Make sure the directory exists
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = Self::render(result, format, options.pretty)?;
        fs::write(output_path, content)?;

        info!("Wrote {} transcript to {}", format, output_path.display());
        Ok(format)
    }

    /// Read a stored JSON result
    pub fn read_json<P: AsRef<Path>>(input_path: P) -> Result<TranscriptionResult, ExportError> {
        let input_path = input_path.as_ref();
        if OutputFormat::from_path(input_path)? != OutputFormat::Json {
            return Err(ExportError::UnsupportedFormat(format!(
                "{} (input must be JSON)",
                input_path.display()
            )));
        }

        let data = fs::read_to_string(input_path)?;
        let result: TranscriptionResult = serde_json::from_str(&data)?;
        debug!(
            "Loaded result with {} chunks and {} speaker entries",
            result.chunks.len(),
            result.speakers.len()
        );
        Ok(result)
    }

    /// Render a result in the given format
    pub fn render(
        result: &TranscriptionResult,
        format: OutputFormat,
        pretty: bool,
    ) -> Result<String, ExportError> {
        match format {
            OutputFormat::Json => {
                if pretty {
                    Ok(serde_json::to_string_pretty(result)?)
                } else {
                    Ok(serde_json::to_string(result)?)
                }
            }
            OutputFormat::Txt => Ok(Self::format_text(result)),
            OutputFormat::Srt => Self::format_subtitles(&result.chunks, "", ','),
            OutputFormat::Vtt => Self::format_subtitles(&result.chunks, "WEBVTT\n\n", '.'),
        }
    }

    /// Plain text: speaker blocks when speakers exist, one chunk per line otherwise
    fn format_text(result: &TranscriptionResult) -> String {
        if result.has_speakers() {
            return result
                .speakers
                .iter()
                .map(|entry| {
                    format!(
                        "{} ({:?}s - {:?}s):\n{}",
                        entry.speaker,
                        entry.interval.start(),
                        entry.interval.end(),
                        entry.text
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n");
        }

        let mut content = String::new();
        for chunk in &result.chunks {
            content.push_str(chunk.text().trim());
            content.push('\n');
        }
        content
    }

    /// Numbered subtitle entries (SRT and VTT share the layout)
    fn format_subtitles(
        chunks: &[TranscriptChunk],
        preamble: &str,
        separator: char,
    ) -> Result<String, ExportError> {
        let mut content = String::from(preamble);

        for (i, chunk) in chunks.iter().enumerate() {
            let start = chunk.start();
            let end = chunk.end().unwrap_or(start);
            content.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                i + 1,
                Self::format_timestamp(start, separator)?,
                Self::format_timestamp(end, separator)?,
                chunk.text().trim()
            ));
        }

        Ok(content)
    }

    /// Convert seconds to `HH:MM:SS<sep>mmm`, truncating to milliseconds
    pub fn format_timestamp(seconds: f64, separator: char) -> Result<String, ExportError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(ExportError::NegativeDuration(seconds));
        }

        let whole_seconds = seconds.trunc() as u64;
        let hours = whole_seconds / 3600;
        let minutes = (whole_seconds % 3600) / 60;
        let secs = whole_seconds % 60;
        let millis = ((seconds - whole_seconds as f64) * 1000.0) as u64;

        Ok(format!(
            "{:02}:{:02}:{:02}{}{:03}",
            hours, minutes, secs, separator, millis
        ))
    }
}
