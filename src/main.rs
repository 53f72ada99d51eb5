// Bookmark archiver
//
// Reads one bookmark folder from a Firefox profile, mirrors every bookmarked
// page with wget and writes an index of what was captured.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bookmark_archiver::utils::{
    DEFAULT_ARCHIVE_ROOT, DEFAULT_BOOKMARKS_FOLDER, DEFAULT_FETCH_PROGRAM, DEFAULT_PROFILE_SECTION,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS,
};
use bookmark_archiver::{ArchiveConfig, LogProgress};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "bookmark-archiver",
    about = "Archive a Firefox bookmark folder for offline reading"
)]
struct Cli {
    /// Directory receiving the archived pages, fetch logs and index.html.
    #[arg(long = "archive", env = "BOOKMARK_ARCHIVE_ROOT", default_value = DEFAULT_ARCHIVE_ROOT)]
    archive_root: PathBuf,

    /// Firefox bookmark folder to archive.
    #[arg(long, env = "BOOKMARK_ARCHIVE_FOLDER", default_value = DEFAULT_BOOKMARKS_FOLDER)]
    folder: String,

    /// Number of pages fetched concurrently.
    #[arg(long, env = "BOOKMARK_ARCHIVE_WORKERS", default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Jobs buffered between the dispatcher and the workers.
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Section of profiles.ini naming the Firefox profile.
    #[arg(long = "profile-name", env = "BOOKMARK_ARCHIVE_PROFILE", default_value = DEFAULT_PROFILE_SECTION)]
    profile_section: String,

    /// Firefox directory holding profiles.ini (default: ~/.mozilla/firefox).
    #[arg(long, env = "BOOKMARK_ARCHIVE_FIREFOX_DIR")]
    firefox_dir: Option<PathBuf>,

    /// Program run once per bookmark, with wget's command line.
    #[arg(long, env = "BOOKMARK_ARCHIVE_FETCH_PROGRAM", default_value = DEFAULT_FETCH_PROGRAM)]
    fetch_program: PathBuf,

    /// Skip writing manifest.json next to index.html.
    #[arg(long, default_value_t = false)]
    no_manifest: bool,
}

impl Cli {
    fn into_config(self) -> Result<ArchiveConfig> {
        ArchiveConfig::builder()
            .archive_root(self.archive_root)
            .bookmarks_folder(self.folder)
            .workers(self.workers)
            .queue_capacity(self.queue_capacity)
            .profile_section(self.profile_section)
            .firefox_dir(self.firefox_dir)
            .fetch_program(self.fetch_program)
            .write_manifest(!self.no_manifest)
            .build()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse()
        .into_config()
        .context("Invalid configuration")?;

    let run = bookmark_archiver::archive(config, LogProgress).await?;
    if run.summary.failed > 0 {
        tracing::warn!(
            "{} of {} bookmarks could not be archived",
            run.summary.failed,
            run.summary.total
        );
    }
    Ok(())
}
