//! Fatal error types for the archive engine
//!
//! Only run-wide failures are errors here. A fetch that fails, a log that
//! cannot be read or a log that names no saved file are per-job outcomes:
//! they are logged and the record is left without metadata.

use std::path::PathBuf;

/// Result type alias for archive engine operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The fetch program could not be started at all
    #[error("Failed to launch fetch program {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive root could not be created
    #[error("Failed to prepare archive root {path}: {source}")]
    ArchiveRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A worker task panicked or was cancelled
    #[error("Worker {worker} terminated abnormally: {source}")]
    WorkerPanicked {
        worker: usize,
        #[source]
        source: tokio::task::JoinError,
    },

    /// A job came back twice or never came back
    #[error("Job slot {slot} was {problem} after all workers exited")]
    Dispatch { slot: usize, problem: &'static str },
}
