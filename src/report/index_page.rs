//! HTML index of an archive run
//!
//! One ordered list, one entry per bookmark in input order. An archived
//! bookmark links to its primary artifact and is labelled `OK`; anything else
//! links to `#` and is labelled `MISSING`.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::bookmarks::BookmarkRecord;

const PAGE_HEAD: &str = concat!(
    "<!DOCTYPE html><html><head><meta charset=\"utf-8\">",
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
    "<title>μeb-archive</title></head><body><h1>μeb-archive</h1>"
);
const PAGE_TAIL: &str = "</ol></body></html>";

const MISSING_TARGET: &str = "#";

/// Link label of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Ok,
    Missing,
}

impl EntryStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Missing => "MISSING",
        }
    }
}

/// Where an entry links and what it shows, before escaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry<'a> {
    pub target: &'a str,
    pub title: &'a str,
    pub status: EntryStatus,
}

impl<'a> IndexEntry<'a> {
    #[must_use]
    pub fn for_record(record: &'a BookmarkRecord) -> Self {
        let (target, status) = match &record.archive {
            Some(meta) => (meta.primary(), EntryStatus::Ok),
            None => (MISSING_TARGET, EntryStatus::Missing),
        };
        let title = if record.title.is_empty() {
            target
        } else {
            record.title.as_str()
        };
        Self {
            target,
            title,
            status,
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(&format!(
            "<li><a href=\"{}\">{} | {}</a></li>",
            encode_double_quoted_attribute(self.target),
            encode_text(self.title),
            self.status.label()
        ));
    }
}

/// Render the whole index page
#[must_use]
pub fn render_index(records: &[BookmarkRecord], generated_at: DateTime<Utc>) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + records.len() * 96);
    page.push_str(PAGE_HEAD);
    page.push_str(&format!(
        "<p>Generated {}</p><ol>",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    for record in records {
        IndexEntry::for_record(record).write_to(&mut page);
    }
    page.push_str(PAGE_TAIL);
    page
}
