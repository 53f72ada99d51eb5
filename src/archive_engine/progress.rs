//! Progress reporting abstraction for archive runs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting and
//! provides a no-op and a `tracing`-backed implementation.

use tracing::{debug, error, info};

use super::job::{JobOutcome, RunSummary};
use crate::utils::display_url;

/// Trait for reporting archive progress at key lifecycle events
///
/// Called concurrently from every worker, hence `Send + Sync`.
pub trait ProgressReporter: Send + Sync + 'static {
    /// Report that the pool is starting on `total_jobs` jobs
    fn report_started(&self, total_jobs: usize, workers: usize);

    /// Report that a worker picked up a job
    fn report_job_started(&self, worker: usize, url: &str);

    /// Report a job's terminal outcome
    fn report_job_finished(&self, worker: usize, url: &str, outcome: JobOutcome);

    /// Report that a worker saw the queue closed and exited
    fn report_worker_exited(&self, worker: usize, jobs_done: usize);

    /// Report that every worker has exited
    fn report_completed(&self, summary: &RunSummary);

    /// Report a fatal error that ends the run
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_started(&self, _total_jobs: usize, _workers: usize) {}

    #[inline(always)]
    fn report_job_started(&self, _worker: usize, _url: &str) {}

    #[inline(always)]
    fn report_job_finished(&self, _worker: usize, _url: &str, _outcome: JobOutcome) {}

    #[inline(always)]
    fn report_worker_exited(&self, _worker: usize, _jobs_done: usize) {}

    #[inline(always)]
    fn report_completed(&self, _summary: &RunSummary) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

/// Progress reporter that writes `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_started(&self, total_jobs: usize, workers: usize) {
        debug!("Queueing {total_jobs} bookmarks for {workers} workers");
    }

    fn report_job_started(&self, worker: usize, url: &str) {
        debug!("worker_{worker}: fetching {}", display_url(url));
    }

    fn report_job_finished(&self, worker: usize, url: &str, outcome: JobOutcome) {
        let url = display_url(url);
        match outcome {
            JobOutcome::Succeeded => debug!("worker_{worker}: archived {url}"),
            JobOutcome::PartialFailure => {
                debug!("worker_{worker}: archived {url} with missing page requisites");
            }
            JobOutcome::Failed(reason) => debug!("worker_{worker}: gave up on {url}: {reason:?}"),
        }
    }

    fn report_worker_exited(&self, worker: usize, jobs_done: usize) {
        debug!("worker_{worker}: exiting after {jobs_done} jobs");
    }

    fn report_completed(&self, summary: &RunSummary) {
        info!(
            "Archived {} of {} bookmarks ({} partial), {} missing",
            summary.archived(),
            summary.total,
            summary.partial,
            summary.failed
        );
    }

    fn report_error(&self, error: &str) {
        error!("Archive run aborted: {error}");
    }
}
