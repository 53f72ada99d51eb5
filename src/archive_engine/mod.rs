//! Archive Engine Module
//!
//! Runs one fetch per bookmark on a fixed worker pool and attaches the
//! outcome metadata parsed from each fetch log to the record it belongs to.

// Sub-modules
pub mod errors;
pub mod fetch;
pub mod job;
pub mod log_parser;
pub mod orchestrator;
pub mod progress;
mod worker;

// Re-export error types
pub use errors::{ArchiveError, ArchiveResult};

// Re-export fetch invocation types
pub use fetch::{FetchInvoker, FetchOutcome, FetchReport, WGET_ARGS, WgetInvoker};

// Re-export job and outcome types
pub use job::{CompletedJob, FailureReason, Job, JobOutcome, RunSummary};

// Re-export log parsing
pub use log_parser::{OutcomeLogParser, ParsedLog, WgetLogParser};

// Re-export orchestration and progress types
pub use orchestrator::{ArchiveRun, Orchestrator};
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};
