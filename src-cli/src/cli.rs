use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "speakalign")]
#[command(author, version, about = "Attribute transcript chunks to diarized speakers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align a transcription with diarization output and write the result
    Align(AlignArgs),

    /// Convert a stored JSON result to another format
    Format(FormatArgs),

    /// Run many align jobs from a JSON manifest
    Batch(BatchArgs),
}

#[derive(Args)]
pub struct AlignArgs {
    /// Transcription JSON ({"chunks": [...], "text": ...})
    #[arg(short, long)]
    pub transcription: PathBuf,

    /// Diarization JSON ([{"start", "end", "speaker"}, ...]); omit for no speakers
    #[arg(short, long)]
    pub diarization: Option<PathBuf>,

    /// Output file (.json, .txt, .srt or .vtt)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Emit one entry per speaker turn instead of one per chunk
    #[arg(short, long)]
    pub group_by_speaker: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct FormatArgs {
    /// Stored result JSON
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (.json, .txt, .srt or .vtt)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Merge adjacent entries of the same speaker before writing
    #[arg(short, long)]
    pub group_by_speaker: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Manifest JSON ({"jobs": [...]})
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Maximum number of jobs running at once
    #[arg(short, long, default_value = "4")]
    pub jobs: usize,
}
