//! External page fetch
//!
//! One wget run per bookmark, in the classic "mirror one page for offline
//! reading" profile. The observable contract is the exit code plus the log
//! file wget writes next to the archive.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

use super::errors::{ArchiveError, ArchiveResult};
use crate::bookmarks::BookmarkRecord;
use crate::config::ArchiveConfig;
use crate::utils::{FETCH_TERM, PARTIAL_FAILURE_EXIT_CODE};

/// Fixed wget flags: fetch page requisites, rewrite links for offline
/// viewing, add `.html` where needed, never climb above the start directory.
pub const WGET_ARGS: &[&str] = &[
    "--verbose",
    "--page-requisites",
    "--convert-links",
    "--adjust-extension",
    "--no-parent",
];

/// How a fetch run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Exit code 0
    Complete,
    /// Exit code 8: some request got an error response (typically a 404 on
    /// an image or stylesheet) but the page itself may well be saved
    PartialFailure { exit_code: i32 },
    /// Any other exit code, or `None` when killed by a signal
    Failed { exit_code: Option<i32> },
}

impl FetchOutcome {
    #[must_use]
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Complete,
            Some(PARTIAL_FAILURE_EXIT_CODE) => Self::PartialFailure {
                exit_code: PARTIAL_FAILURE_EXIT_CODE,
            },
            other => Self::Failed { exit_code: other },
        }
    }

    #[must_use]
    pub fn from_status(status: ExitStatus) -> Self {
        Self::from_exit_code(status.code())
    }

    /// True when the log is worth parsing
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Result of one fetch invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub outcome: FetchOutcome,
    /// Log written by the fetch tool; input to the log parser
    pub log_path: PathBuf,
}

/// Runs one fetch for one bookmark
pub trait FetchInvoker: Send + Sync + 'static {
    /// Fetch `record.url` into the archive.
    ///
    /// A fetch that runs and fails is a `FetchOutcome::Failed`, not an error.
    ///
    /// # Errors
    ///
    /// `ArchiveError::Spawn` when the fetch tool cannot be launched; the
    /// whole run stops on it.
    fn fetch(
        &self,
        record: &BookmarkRecord,
    ) -> impl Future<Output = ArchiveResult<FetchReport>> + Send;
}

/// Invokes wget (or the configured replacement) as a subprocess
#[derive(Debug, Clone)]
pub struct WgetInvoker {
    config: ArchiveConfig,
}

impl WgetInvoker {
    #[must_use]
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    fn command(&self, record: &BookmarkRecord, log_path: &Path) -> Command {
        let mut cmd = Command::new(self.config.fetch_program());
        cmd.args(WGET_ARGS)
            .arg("-o")
            .arg(log_path)
            .arg(&record.url)
            .current_dir(self.config.archive_root())
            .env_clear()
            .env("TERM", FETCH_TERM)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        // Keep program lookup working once the environment is cleared
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        cmd
    }
}

impl FetchInvoker for WgetInvoker {
    async fn fetch(&self, record: &BookmarkRecord) -> ArchiveResult<FetchReport> {
        let log_path = self.config.fetch_log_path(record.url_hash);
        debug!("Fetching {} (log: {})", record.url, log_path.display());

        let status = self
            .command(record, &log_path)
            .status()
            .await
            .map_err(|source| ArchiveError::Spawn {
                program: self.config.fetch_program().to_path_buf(),
                source,
            })?;

        Ok(FetchReport {
            outcome: FetchOutcome::from_status(status),
            log_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_complete() {
        assert_eq!(FetchOutcome::from_exit_code(Some(0)), FetchOutcome::Complete);
    }

    #[test]
    fn eight_is_partial_and_usable() {
        let outcome = FetchOutcome::from_exit_code(Some(8));
        assert_eq!(outcome, FetchOutcome::PartialFailure { exit_code: 8 });
        assert!(outcome.is_usable());
    }

    #[test]
    fn other_codes_fail() {
        for code in [1, 2, 3, 4, 5, 6, 7, 9, 127] {
            let outcome = FetchOutcome::from_exit_code(Some(code));
            assert_eq!(outcome, FetchOutcome::Failed { exit_code: Some(code) });
            assert!(!outcome.is_usable());
        }
    }

    #[test]
    fn signal_termination_fails() {
        assert!(!FetchOutcome::from_exit_code(None).is_usable());
    }
}
