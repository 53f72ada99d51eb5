pub mod archive_engine;
pub mod bookmarks;
pub mod config;
pub mod report;
pub mod runtime;
pub mod utils;

pub use archive_engine::{
    ArchiveError, ArchiveResult, ArchiveRun, FetchInvoker, JobOutcome, LogProgress, NoOpProgress,
    Orchestrator, OutcomeLogParser, ProgressReporter, RunSummary, WgetInvoker, WgetLogParser,
};
pub use bookmarks::{
    ArchiveMetadata, BookmarkError, BookmarkRecord, BookmarkStore, FirefoxProfile,
    ProfileLocator,
};
pub use config::ArchiveConfig;
pub use report::{ReportError, ReportPaths, write_report};

use anyhow::{Context, Result};
use tracing::info;

/// Read the configured bookmark folder out of the configured Firefox profile
///
/// # Errors
///
/// Fails when the profile cannot be resolved, the store cannot be opened or
/// the folder does not exist.
pub async fn load_bookmarks(config: &ArchiveConfig) -> Result<Vec<BookmarkRecord>> {
    let profile = ProfileLocator::from_config(config)?
        .resolve(config.profile_section())
        .context("Failed to resolve Firefox profile")?;

    info!("Using Firefox profile {:?}", profile.name);
    let store = BookmarkStore::open(&profile.places_db()).await?;
    let records = store.load_folder(config.bookmarks_folder()).await;
    store.close().await;

    records.with_context(|| format!("Failed to load bookmark folder {:?}", config.bookmarks_folder()))
}

/// Archive the configured bookmark folder and write the report
///
/// # Errors
///
/// Any fatal setup, run or report error. Per-bookmark fetch failures are not
/// errors; they show up as `MISSING` entries.
pub async fn archive<P: ProgressReporter>(config: ArchiveConfig, progress: P) -> Result<ArchiveRun> {
    let records = load_bookmarks(&config).await?;

    let orchestrator = Orchestrator::new(config).with_progress(progress);
    let run = orchestrator
        .run(records)
        .await
        .context("Archive run failed")?;

    write_report(orchestrator.config(), &run.records)
        .await
        .context("Failed to write archive report")?;

    Ok(run)
}
