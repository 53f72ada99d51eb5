//! Job types passed between the orchestrator and the workers

use std::time::Duration;

use crate::bookmarks::BookmarkRecord;

/// One bookmark on its way to a worker.
///
/// The record is moved in, so exactly one worker can touch it.
#[derive(Debug)]
pub struct Job {
    /// Position in the input list; fixed at dispatch
    pub slot: usize,
    pub record: BookmarkRecord,
}

/// A job on its way back, with its terminal outcome decided
#[derive(Debug)]
pub struct CompletedJob {
    pub slot: usize,
    pub record: BookmarkRecord,
    pub outcome: JobOutcome,
}

/// Terminal outcome of a job. Decided once; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Fetch exited 0 and metadata is attached
    Succeeded,
    /// Fetch exited 8 and metadata is attached anyway
    PartialFailure,
    /// No metadata attached
    Failed(FailureReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Fetch tool exited with a code other than 0 or 8, or by signal
    FetchFailed { exit_code: Option<i32> },
    /// The fetch log could not be read
    LogUnreadable,
    /// The fetch log named no saved file
    NothingSaved,
}

impl JobOutcome {
    #[must_use]
    pub fn is_archived(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Tally of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub partial: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: JobOutcome) {
        self.total += 1;
        match outcome {
            JobOutcome::Succeeded => self.succeeded += 1,
            JobOutcome::PartialFailure => self.partial += 1,
            JobOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Jobs with metadata attached
    #[must_use]
    pub fn archived(&self) -> usize {
        self.succeeded + self.partial
    }
}
