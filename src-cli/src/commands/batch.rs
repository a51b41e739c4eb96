//! Batch command: many align jobs on a bounded worker pool

use std::sync::Arc;

use anyhow::{bail, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use speakalign_diarization::AlignmentReport;
use tokio::sync::Semaphore;
use tracing::{error, info};

use super::align::{execute, load_json, AlignJob};
use crate::cli::BatchArgs;

/// Batch manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchManifest {
    pub jobs: Vec<AlignJob>,
}

/// Outcome of one job
#[derive(Debug)]
pub struct JobOutcome {
    pub job: AlignJob,
    pub result: Result<AlignmentReport>,
}

pub async fn run(args: BatchArgs) -> Result<()> {
    let manifest: BatchManifest = load_json(&args.manifest)?;
    let total = manifest.jobs.len();
    info!("Running {} align jobs ({} at a time)", total, args.jobs.max(1));

    let outcomes = run_jobs(manifest.jobs, args.jobs).await;

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => info!(
                "{}: {} chunks attributed, {} dropped",
                outcome.job.output.display(),
                report.claimed_chunks,
                report.dropped_chunks
            ),
            Err(e) => {
                failed += 1;
                error!("{}: {:#}", outcome.job.transcription.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} jobs failed", failed, total);
    }
    Ok(())
}

/// Run jobs concurrently, at most `concurrency` at a time, keeping input order
pub async fn run_jobs(jobs: Vec<AlignJob>, concurrency: usize) -> Vec<JobOutcome> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));

    let tasks = jobs.into_iter().map(|job| {
        let permits = Arc::clone(&permits);
        async move {
            let result = match permits.acquire_owned().await {
                Ok(_permit) => {
                    let worker_job = job.clone();
                    tokio::task::spawn_blocking(move || execute(&worker_job))
                        .await
                        .unwrap_or_else(|e| Err(anyhow::anyhow!("Job panicked: {}", e)))
                }
                Err(e) => Err(anyhow::anyhow!("Worker pool closed: {}", e)),
            };
            JobOutcome { job, result }
        }
    });

    join_all(tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_job(dir: &Path, name: &str, transcription: &str) -> AlignJob {
        let transcription_path = dir.join(format!("{}.transcription.json", name));
        let diarization_path = dir.join(format!("{}.diarization.json", name));
        fs::write(&transcription_path, transcription).unwrap();
        fs::write(
            &diarization_path,
            r#"[{"start": 0.0, "end": 2.0, "speaker": "S0"}, {"start": 2.0, "end": 4.0, "speaker": "S1"}]"#,
        )
        .unwrap();

        AlignJob {
            transcription: transcription_path,
            diarization: Some(diarization_path),
            output: dir.join(format!("{}.json", name)),
            group_by_speaker: true,
            pretty: true,
        }
    }

    #[tokio::test]
    async fn test_failed_job_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_job(
            dir.path(),
            "good",
            r#"{"chunks": [{"timestamp": [0.0, 2.0], "text": "Hi"}, {"timestamp": [2.0, 4.0], "text": "Yo"}], "text": "Hi Yo"}"#,
        );
        let bad = write_job(dir.path(), "bad", r#"{"chunks": [], "text": ""}"#);

        let outcomes = run_jobs(vec![bad, good.clone()], 2).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_err());
        let report = outcomes[1].result.as_ref().unwrap();
        assert_eq!(report.claimed_chunks, 2);
        assert!(good.output.exists());
    }

    #[test]
    fn test_manifest_defaults() {
        let manifest: BatchManifest = serde_json::from_str(
            r#"{"jobs": [{"transcription": "a.json", "output": "a.txt"}]}"#,
        )
        .unwrap();

        let job = &manifest.jobs[0];
        assert!(job.diarization.is_none());
        assert!(!job.group_by_speaker);
    }
}
