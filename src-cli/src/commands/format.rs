//! Format command

use anyhow::{Context, Result};
use speakalign_core::{ExportOptions, Exporter, OutputFormat};
use speakalign_diarization::group_result;

use crate::cli::FormatArgs;

/// Convert a stored JSON result to the format of the output extension
pub fn run(args: FormatArgs) -> Result<()> {
    let format = OutputFormat::from_path(&args.output)?;

    let result = Exporter::read_json(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;

    let result = if args.group_by_speaker {
        group_result(result)
    } else {
        result
    };

    let options = ExportOptions {
        pretty: args.pretty,
        format: Some(format),
    };
    Exporter::write(&result, &args.output, &options)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    Ok(())
}
