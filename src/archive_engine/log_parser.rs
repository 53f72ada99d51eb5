//! Fetch-log parsing
//!
//! wget writes a free-form log per job. Three kinds of lines matter:
//!
//! ```text
//! Saving to: "example.com/index.html"
//! FINISHED --2024-01-01 12:00:00--
//! Downloaded: 12 files, 1.2M in 0.4s (3.1 MB/s)
//! ```
//!
//! The log is scanned once, front to back. `Saving to:` lines accumulate in
//! order, the first one being the primary artifact. The last `FINISHED` line
//! wins. A `Downloaded:` line only counts after a `FINISHED` line has been
//! seen, since the summary section is the one that follows it.
//!
//! Filenames are cut at fixed byte offsets: 12 bytes in (the prefix plus the
//! opening quote) up to the final byte (the closing quote). This only holds
//! for wget's untranslated wording with plain ASCII quotes, which is why the
//! fetch runs with a cleared environment and `TERM=xterm`. A filename that
//! itself ends in a different quote, or a translated or re-spaced prefix,
//! yields a wrong name. Lines the offsets cannot cut at all are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const SAVING_TO: &str = "Saving to: ";
/// Byte offset of the first filename byte in a `Saving to:` line
const SAVED_NAME_START: usize = SAVING_TO.len() + 1;
const FINISHED: &str = "FINISHED";
const FINISHED_SEPARATOR: &str = "--";
const DOWNLOADED: &str = "Downloaded:";

/// Everything one pass over a fetch log collected.
///
/// `saved` may be empty; see `ArchiveMetadata::from_parsed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub saved: Vec<String>,
    pub finished: String,
    pub downloaded: String,
}

/// Turns a completed fetch log into a `ParsedLog`
pub trait OutcomeLogParser: Send + Sync + 'static {
    /// Parse a log from any buffered reader in a single forward pass
    ///
    /// # Errors
    ///
    /// Propagates read errors from `reader`.
    fn parse<R: BufRead>(&self, reader: R) -> io::Result<ParsedLog>;

    /// Open and parse a log file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened or read.
    fn parse_file(&self, path: &Path) -> io::Result<ParsedLog> {
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }
}

/// Parser for wget's `--verbose` log
#[derive(Debug, Clone, Copy, Default)]
pub struct WgetLogParser;

impl WgetLogParser {
    fn scan_line(parsed: &mut ParsedLog, line: &str) {
        if line.starts_with(SAVING_TO) {
            match line
                .len()
                .checked_sub(1)
                .and_then(|end| line.get(SAVED_NAME_START..end))
            {
                Some(name) => parsed.saved.push(name.to_string()),
                None => debug!("Skipping unsliceable save line: {line:?}"),
            }
        } else if let Some(rest) = line.strip_prefix(FINISHED) {
            parsed.finished = rest.replace(FINISHED_SEPARATOR, "").trim().to_string();
        } else if let Some(rest) = line.strip_prefix(DOWNLOADED) {
            if !parsed.finished.is_empty() {
                parsed.downloaded = rest.trim().to_string();
            }
        }
    }
}

impl OutcomeLogParser for WgetLogParser {
    fn parse<R: BufRead>(&self, mut reader: R) -> io::Result<ParsedLog> {
        let mut parsed = ParsedLog {
            saved: Vec::with_capacity(10),
            ..ParsedLog::default()
        };

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let mut bytes = buf.as_slice();
            if let Some(rest) = bytes.strip_suffix(b"\n") {
                bytes = rest;
            }
            if let Some(rest) = bytes.strip_suffix(b"\r") {
                bytes = rest;
            }
            Self::scan_line(&mut parsed, &String::from_utf8_lossy(bytes));
        }

        Ok(parsed)
    }
}
