//! Core configuration types for archive runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{
    DEFAULT_ARCHIVE_ROOT, DEFAULT_BOOKMARKS_FOLDER, DEFAULT_FETCH_PROGRAM, DEFAULT_PROFILE_SECTION,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS,
};

/// Main configuration struct for an archive run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Directory receiving fetched pages, per-job fetch logs and the report.
    ///
    /// Also the working directory of every fetch invocation, so the saved
    /// paths wget reports are relative to it.
    pub(crate) archive_root: PathBuf,

    /// Title of the bookmark folder to archive
    pub(crate) bookmarks_folder: String,

    /// Number of long-lived workers, and so the maximum number of
    /// concurrently running fetches. Always >= 1 after `build()`.
    pub(crate) workers: usize,

    /// Capacity of the job queue between the orchestrator and the workers.
    /// Always >= 1 after `build()`.
    pub(crate) queue_capacity: usize,

    /// Section of `profiles.ini` naming the profile (e.g. `Profile0`)
    pub(crate) profile_section: String,

    /// Firefox directory holding `profiles.ini`.
    /// `None` means `~/.mozilla/firefox`.
    pub(crate) firefox_dir: Option<PathBuf>,

    /// Program invoked once per bookmark
    pub(crate) fetch_program: PathBuf,

    /// Write `manifest.json` next to the HTML report
    pub(crate) write_manifest: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from(DEFAULT_ARCHIVE_ROOT),
            bookmarks_folder: DEFAULT_BOOKMARKS_FOLDER.to_string(),
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            profile_section: DEFAULT_PROFILE_SECTION.to_string(),
            firefox_dir: None,
            fetch_program: PathBuf::from(DEFAULT_FETCH_PROGRAM),
            write_manifest: true,
        }
    }
}
