//! Archive run orchestration
//!
//! Coordinates one archive run:
//! - spawns a fixed pool of workers on a bounded job queue
//! - dispatches every bookmark exactly once, in input order
//! - joins every worker before looking at any result
//! - rebuilds the record list in its original order
//!
//! Records are moved into the queue and come back only through a worker's
//! join handle, so no record is ever visible to two tasks at once and the
//! orchestrator cannot observe a job before its worker is done with it.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::error::SendError;
use tracing::{debug, info};

use super::errors::{ArchiveError, ArchiveResult};
use super::fetch::{FetchInvoker, WgetInvoker};
use super::job::{Job, RunSummary};
use super::log_parser::{OutcomeLogParser, WgetLogParser};
use super::progress::{NoOpProgress, ProgressReporter};
use super::worker::{WorkerContext, run_worker};
use crate::bookmarks::BookmarkRecord;
use crate::config::ArchiveConfig;
use crate::runtime::job_queue;

/// The annotated record list of a finished run, in input order
#[derive(Debug)]
pub struct ArchiveRun {
    pub records: Vec<BookmarkRecord>,
    pub summary: RunSummary,
}

/// Owns the configuration and the pluggable parts of a run
pub struct Orchestrator<F = WgetInvoker, L = WgetLogParser, P = NoOpProgress> {
    config: ArchiveConfig,
    invoker: Arc<F>,
    parser: Arc<L>,
    progress: Arc<P>,
}

impl Orchestrator {
    /// Orchestrator running wget with the standard log parser
    #[must_use]
    pub fn new(config: ArchiveConfig) -> Self {
        let invoker = WgetInvoker::new(config.clone());
        Self::with_components(config, invoker, WgetLogParser, NoOpProgress)
    }
}

impl<F, L, P> Orchestrator<F, L, P>
where
    F: FetchInvoker,
    L: OutcomeLogParser,
    P: ProgressReporter,
{
    #[must_use]
    pub fn with_components(config: ArchiveConfig, invoker: F, parser: L, progress: P) -> Self {
        Self {
            config,
            invoker: Arc::new(invoker),
            parser: Arc::new(parser),
            progress: Arc::new(progress),
        }
    }

    /// Swap the progress reporter
    #[must_use]
    pub fn with_progress<Q: ProgressReporter>(self, progress: Q) -> Orchestrator<F, L, Q> {
        Orchestrator {
            config: self.config,
            invoker: self.invoker,
            parser: self.parser,
            progress: Arc::new(progress),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Archive every record and return them annotated, in input order.
    ///
    /// Returns only after every worker has exited. Records whose fetch
    /// failed come back without metadata.
    ///
    /// # Errors
    ///
    /// - `ArchiveError::ArchiveRoot` if the archive root cannot be created
    /// - `ArchiveError::Spawn` if the fetch tool cannot be launched
    /// - `ArchiveError::WorkerPanicked` if a worker task dies
    /// - `ArchiveError::Dispatch` if a job was lost or duplicated
    pub async fn run(&self, records: Vec<BookmarkRecord>) -> ArchiveResult<ArchiveRun> {
        let started = Instant::now();
        let root = self.config.archive_root();
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|source| ArchiveError::ArchiveRoot {
                path: root.to_path_buf(),
                source,
            })?;

        let total = records.len();
        let workers = self.config.workers();
        self.progress.report_started(total, workers);
        info!("Starting {workers} workers");

        let (tx, rx) = job_queue::<Job>(self.config.queue_capacity());
        let ctx = WorkerContext {
            invoker: Arc::clone(&self.invoker),
            parser: Arc::clone(&self.parser),
            progress: Arc::clone(&self.progress),
        };
        let handles: Vec<_> = (0..workers)
            .map(|id| tokio::spawn(run_worker(id, rx.clone(), ctx.clone())))
            .collect();
        drop(rx);

        for (slot, record) in records.into_iter().enumerate() {
            if let Err(SendError(job)) = tx.send(Job { slot, record }).await {
                debug!("Job queue closed by workers, dispatch stopped at slot {}", job.slot);
                break;
            }
        }
        tx.close();

        let mut slots: Vec<Option<BookmarkRecord>> =
            std::iter::repeat_with(|| None).take(total).collect();
        let mut summary = RunSummary::default();
        let mut fatal: Option<ArchiveError> = None;

        for (worker, joined) in join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(Ok(done)) => {
                    for job in done {
                        match slots.get_mut(job.slot) {
                            Some(slot) if slot.is_none() => {
                                *slot = Some(job.record);
                                summary.record(job.outcome);
                            }
                            Some(_) => {
                                fatal.get_or_insert(ArchiveError::Dispatch {
                                    slot: job.slot,
                                    problem: "completed twice",
                                });
                            }
                            None => {
                                fatal.get_or_insert(ArchiveError::Dispatch {
                                    slot: job.slot,
                                    problem: "out of range",
                                });
                            }
                        }
                    }
                }
                Ok(Err(e)) => {
                    fatal.get_or_insert(e);
                }
                Err(source) => {
                    fatal.get_or_insert(ArchiveError::WorkerPanicked { worker, source });
                }
            }
        }

        if let Some(e) = fatal {
            self.progress.report_error(&e.to_string());
            return Err(e);
        }

        let records = slots
            .into_iter()
            .enumerate()
            .map(|(slot, record)| {
                record.ok_or(ArchiveError::Dispatch {
                    slot,
                    problem: "never completed",
                })
            })
            .collect::<ArchiveResult<Vec<_>>>()?;

        summary.elapsed = started.elapsed();
        self.progress.report_completed(&summary);
        info!(
            "Done {} urls in {}s",
            summary.total,
            summary.elapsed.as_secs()
        );

        Ok(ArchiveRun { records, summary })
    }
}
