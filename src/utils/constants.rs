//! Shared configuration constants for the archiver
//!
//! Default values and fixed protocol constants used throughout the codebase
//! so the CLI, the config builder and the engine agree on them.

/// Default archive root: where pages, fetch logs and the report are written
pub const DEFAULT_ARCHIVE_ROOT: &str = "/tmp/archive/";

/// Default bookmark folder title to archive
pub const DEFAULT_BOOKMARKS_FOLDER: &str = "archive";

/// Default number of concurrent fetch workers
///
/// Fetches are subprocess- and network-bound, so a small pool keeps the
/// machine responsive while still overlapping slow hosts.
pub const DEFAULT_WORKERS: usize = 4;

/// Default job queue capacity
///
/// One slot keeps the producer at most one job ahead of the workers.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1;

/// Default `profiles.ini` section holding the profile to read
pub const DEFAULT_PROFILE_SECTION: &str = "Profile0";

/// Firefox directory relative to the user's home directory
pub const FIREFOX_DIR_IN_HOME: &str = ".mozilla/firefox";

/// Profile list file inside the Firefox directory
pub const PROFILES_INI: &str = "profiles.ini";

/// Bookmark store file inside a profile directory
pub const PLACES_DB: &str = "places.sqlite";

/// Default fetch program
pub const DEFAULT_FETCH_PROGRAM: &str = "wget";

/// Exit code wget uses for "server issued an error response"
///
/// Any 404 on a page requisite (image, stylesheet, script) yields this code
/// even when the page itself was saved, so it counts as partial success.
pub const PARTIAL_FAILURE_EXIT_CODE: i32 = 8;

/// Terminal type forced on the fetch tool so its log uses plain ASCII quotes
pub const FETCH_TERM: &str = "xterm";

/// Report file written into the archive root
pub const REPORT_FILE_NAME: &str = "index.html";

/// Manifest file written into the archive root
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Number of URL characters shown in per-job warnings before eliding
pub const URL_DISPLAY_CHARS: usize = 50;
