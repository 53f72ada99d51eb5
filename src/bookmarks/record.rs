//! Bookmark records and archive metadata
//!
//! A `BookmarkRecord` is created once by the bookmark source, moved into
//! exactly one worker for its fetch, and handed back to the orchestrator with
//! its outcome attached. `ArchiveMetadata` can only exist with at least one
//! saved path, so the report never has to guess a link target.

use serde::Serialize;
use std::time::Duration;

use crate::archive_engine::log_parser::ParsedLog;

/// One bookmark to archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRecord {
    /// Display title; may be empty
    pub title: String,
    /// Bookmarked URL; never empty
    pub url: String,
    /// Stable hash of the URL from the bookmark store, names the fetch log
    pub url_hash: i64,
    /// Present once the fetch produced a usable page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveMetadata>,
}

impl BookmarkRecord {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>, url_hash: i64) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            url_hash,
            archive: None,
        }
    }

    /// True when metadata has been attached
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archive.is_some()
    }
}

/// Outcome metadata of a successful or partially successful fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveMetadata {
    saved: Vec<String>,
    finished: String,
    downloaded: String,
    #[serde(rename = "exec_time_ms", serialize_with = "serialize_millis")]
    exec_time: Duration,
}

impl ArchiveMetadata {
    /// Build metadata from a parsed fetch log.
    ///
    /// Returns `None` when the log reported no saved file: such a parse has no
    /// primary artifact and must not be attached to a record. `exec_time` is
    /// truncated to whole milliseconds.
    #[must_use]
    pub fn from_parsed(parsed: ParsedLog, exec_time: Duration) -> Option<Self> {
        if parsed.saved.is_empty() {
            return None;
        }
        let millis = u64::try_from(exec_time.as_millis()).unwrap_or(u64::MAX);
        Some(Self {
            saved: parsed.saved,
            finished: parsed.finished,
            downloaded: parsed.downloaded,
            exec_time: Duration::from_millis(millis),
        })
    }

    /// The primary artifact: the first file the fetch tool saved.
    ///
    /// # Panics
    ///
    /// Panics if `saved` is empty, which `from_parsed` rules out.
    #[must_use]
    pub fn primary(&self) -> &str {
        assert!(
            !self.saved.is_empty(),
            "archive metadata without a saved artifact"
        );
        &self.saved[0]
    }

    /// Every saved path, in the order the fetch tool reported them
    #[must_use]
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    /// Completion token from the fetch log's `FINISHED` line
    #[must_use]
    pub fn finished(&self) -> &str {
        &self.finished
    }

    /// Size/rate token from the fetch log's `Downloaded:` line
    #[must_use]
    pub fn downloaded(&self) -> &str {
        &self.downloaded
    }

    #[must_use]
    pub fn exec_time(&self) -> Duration {
        self.exec_time
    }
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(saved: &[&str]) -> ParsedLog {
        ParsedLog {
            saved: saved.iter().map(|s| (*s).to_string()).collect(),
            finished: "2024-01-01 10:00:00".to_string(),
            downloaded: "1 files, 10K in 0s".to_string(),
        }
    }

    #[test]
    fn empty_parse_yields_no_metadata() {
        assert!(ArchiveMetadata::from_parsed(parsed(&[]), Duration::from_secs(1)).is_none());
    }

    #[test]
    fn primary_is_first_saved_path() {
        let meta = ArchiveMetadata::from_parsed(
            parsed(&["example.com/index.html", "example.com/style.css"]),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(meta.primary(), "example.com/index.html");
        assert_eq!(meta.saved().len(), 2);
    }

    #[test]
    fn exec_time_is_truncated_to_millis() {
        let meta =
            ArchiveMetadata::from_parsed(parsed(&["a.html"]), Duration::from_micros(1_234_567))
                .unwrap();
        assert_eq!(meta.exec_time(), Duration::from_millis(1_234));
    }
}
