//! Getter methods for `ArchiveConfig`

use std::path::{Path, PathBuf};

use super::types::ArchiveConfig;
use crate::utils::{FIREFOX_DIR_IN_HOME, MANIFEST_FILE_NAME, REPORT_FILE_NAME};

impl ArchiveConfig {
    #[must_use]
    pub fn archive_root(&self) -> &Path {
        &self.archive_root
    }

    #[must_use]
    pub fn bookmarks_folder(&self) -> &str {
        &self.bookmarks_folder
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    #[must_use]
    pub fn profile_section(&self) -> &str {
        &self.profile_section
    }

    #[must_use]
    pub fn fetch_program(&self) -> &Path {
        &self.fetch_program
    }

    #[must_use]
    pub fn write_manifest(&self) -> bool {
        self.write_manifest
    }

    /// Firefox directory: the configured one, else `~/.mozilla/firefox`.
    ///
    /// Returns `None` only when no directory was configured and the home
    /// directory cannot be determined.
    #[must_use]
    pub fn firefox_dir(&self) -> Option<PathBuf> {
        match &self.firefox_dir {
            Some(dir) => Some(dir.clone()),
            None => dirs::home_dir().map(|home| home.join(FIREFOX_DIR_IN_HOME)),
        }
    }

    /// Path of the fetch log for a bookmark with the given URL hash
    #[must_use]
    pub fn fetch_log_path(&self, url_hash: i64) -> PathBuf {
        self.archive_root.join(format!("wget-{url_hash}.log"))
    }

    /// Path of the rendered HTML report
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.archive_root.join(REPORT_FILE_NAME)
    }

    /// Path of the JSON manifest
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.archive_root.join(MANIFEST_FILE_NAME)
    }
}
