//! Worker loop and per-job processing
//!
//! A worker takes jobs until the queue is closed and drained. Each job is
//! fetched, its log parsed, and its outcome decided once. Per-job failures
//! are logged and never stop the worker; only a fetch tool that cannot be
//! launched does, and then the worker closes the queue so the producer stops.

use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use super::errors::ArchiveResult;
use super::fetch::{FetchInvoker, FetchOutcome};
use super::job::{CompletedJob, FailureReason, Job, JobOutcome};
use super::log_parser::OutcomeLogParser;
use super::progress::ProgressReporter;
use crate::bookmarks::{ArchiveMetadata, BookmarkRecord};
use crate::runtime::JobReceiver;
use crate::utils::display_url;

/// Shared, read-only state every worker gets a handle to
pub(crate) struct WorkerContext<F, L, P> {
    pub invoker: Arc<F>,
    pub parser: Arc<L>,
    pub progress: Arc<P>,
}

impl<F, L, P> Clone for WorkerContext<F, L, P> {
    fn clone(&self) -> Self {
        Self {
            invoker: Arc::clone(&self.invoker),
            parser: Arc::clone(&self.parser),
            progress: Arc::clone(&self.progress),
        }
    }
}

/// Drain the queue, returning every job this worker completed
pub(crate) async fn run_worker<F, L, P>(
    id: usize,
    jobs: JobReceiver<Job>,
    ctx: WorkerContext<F, L, P>,
) -> ArchiveResult<Vec<CompletedJob>>
where
    F: FetchInvoker,
    L: OutcomeLogParser,
    P: ProgressReporter,
{
    let mut done = Vec::new();

    while let Some(Job { slot, record }) = jobs.recv().await {
        ctx.progress.report_job_started(id, &record.url);

        let (record, outcome) = match process_job(record, &ctx).await {
            Ok(finished) => finished,
            Err(e) => {
                jobs.close().await;
                return Err(e);
            }
        };

        ctx.progress.report_job_finished(id, &record.url, outcome);
        done.push(CompletedJob {
            slot,
            record,
            outcome,
        });
    }

    ctx.progress.report_worker_exited(id, done.len());
    Ok(done)
}

/// Fetch one bookmark and attach its metadata when the fetch was usable
pub(crate) async fn process_job<F, L, P>(
    mut record: BookmarkRecord,
    ctx: &WorkerContext<F, L, P>,
) -> ArchiveResult<(BookmarkRecord, JobOutcome)>
where
    F: FetchInvoker,
    L: OutcomeLogParser,
    P: ProgressReporter,
{
    let started = Instant::now();
    let report = ctx.invoker.fetch(&record).await?;

    if let FetchOutcome::Failed { exit_code } = report.outcome {
        match exit_code {
            Some(code) => warn!("Fetch failed with status={code}, url={:?}", display_url(&record.url)),
            None => warn!("Fetch killed by signal, url={:?}", display_url(&record.url)),
        }
        return Ok((
            record,
            JobOutcome::Failed(FailureReason::FetchFailed { exit_code }),
        ));
    }

    let parser = Arc::clone(&ctx.parser);
    let log_path = report.log_path.clone();
    let parsed = match tokio::task::spawn_blocking(move || parser.parse_file(&log_path)).await {
        Ok(Ok(parsed)) => parsed,
        Ok(Err(e)) => {
            warn!(
                "Cannot read fetch log {}: {e}, url={:?}",
                report.log_path.display(),
                display_url(&record.url)
            );
            return Ok((record, JobOutcome::Failed(FailureReason::LogUnreadable)));
        }
        Err(e) => {
            warn!(
                "Fetch log parser aborted on {}: {e}, url={:?}",
                report.log_path.display(),
                display_url(&record.url)
            );
            return Ok((record, JobOutcome::Failed(FailureReason::LogUnreadable)));
        }
    };

    match ArchiveMetadata::from_parsed(parsed, started.elapsed()) {
        Some(meta) => {
            record.archive = Some(meta);
            let outcome = match report.outcome {
                FetchOutcome::PartialFailure { .. } => JobOutcome::PartialFailure,
                _ => JobOutcome::Succeeded,
            };
            Ok((record, outcome))
        }
        None => {
            warn!(
                "Fetch log names no saved file, url={:?}",
                display_url(&record.url)
            );
            Ok((record, JobOutcome::Failed(FailureReason::NothingSaved)))
        }
    }
}
