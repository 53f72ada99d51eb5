//! Machine-readable companion to the index page

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::index_page::EntryStatus;
use crate::bookmarks::BookmarkRecord;

#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub archived: usize,
    pub entries: Vec<ManifestEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ManifestEntry<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub url_hash: i64,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<&'a str>,
    #[serde(flatten)]
    pub archive: Option<&'a crate::bookmarks::ArchiveMetadata>,
}

impl<'a> Manifest<'a> {
    #[must_use]
    pub fn from_records(records: &'a [BookmarkRecord], generated_at: DateTime<Utc>) -> Self {
        let entries: Vec<_> = records
            .iter()
            .map(|record| {
                let status = if record.is_archived() {
                    EntryStatus::Ok
                } else {
                    EntryStatus::Missing
                };
                ManifestEntry {
                    title: &record.title,
                    url: &record.url,
                    url_hash: record.url_hash,
                    status: status.label(),
                    primary: record.archive.as_ref().map(|meta| meta.primary()),
                    archive: record.archive.as_ref(),
                }
            })
            .collect();
        Self {
            generated_at,
            total: entries.len(),
            archived: records.iter().filter(|r| r.is_archived()).count(),
            entries,
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
