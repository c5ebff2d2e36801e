//! Manifest runner.
//!
//! Jobs are decoded on the blocking pool, at most `max_parallel_jobs` at a
//! time, and each output is written as soon as it is ready.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use storm_ingestion::Ingester;

use crate::manifest::{BatchManifest, ManifestJob};
use crate::output::write_json;

/// Counts from one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub outputs: Vec<PathBuf>,
}

/// Run every job of `manifest`. Failed jobs are logged and counted; they
/// never stop the rest of the batch.
#[instrument(skip(ingester, manifest), fields(jobs = manifest.jobs.len()))]
pub async fn run_batch(ingester: Arc<Ingester>, manifest: BatchManifest) -> Result<BatchSummary> {
    let output_dir = manifest
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let parallel = ingester.config().workers_for(manifest.jobs.len());
    let semaphore = Arc::new(Semaphore::new(parallel));

    let tasks = manifest.jobs.into_iter().map(|job| {
        let sem = semaphore.clone();
        let ingester = ingester.clone();
        let output_dir = output_dir.clone();

        async move {
            let _permit = sem.acquire_owned().await?;
            let output = run_job(ingester, &job, &output_dir).await;
            Ok::<_, anyhow::Error>((job, output))
        }
    });

    let results: Vec<_> = stream::iter(tasks)
        .buffer_unordered(parallel)
        .collect()
        .await;

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Ok((job, Ok(path))) => {
                info!(
                    product = %job.product,
                    input = %job.path.display(),
                    output = %path.display(),
                    "Job complete"
                );
                summary.succeeded += 1;
                summary.outputs.push(path);
            }
            Ok((job, Err(e))) => {
                warn!(
                    product = %job.product,
                    input = %job.path.display(),
                    error = %e,
                    "Job failed"
                );
                summary.failed += 1;
            }
            Err(e) => {
                warn!(error = %e, "Job could not be scheduled");
                summary.failed += 1;
            }
        }
    }
    summary.outputs.sort();

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch complete"
    );
    Ok(summary)
}

async fn run_job(ingester: Arc<Ingester>, job: &ManifestJob, output_dir: &Path) -> Result<PathBuf> {
    let product = job.product;
    let path = job.path.clone();
    let storm = job.storm.clone();

    let output = tokio::task::spawn_blocking(move || {
        ingester.ingest_file(product, &path, storm.as_deref())
    })
    .await
    .context("Decode task panicked")??;

    let target = output_dir.join(job.output_name());
    write_json(&output, Some(&target), false).await?;
    Ok(target)
}
