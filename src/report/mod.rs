//! Report output
//!
//! Everything here runs after the archive run has joined all its workers, so
//! the record list is final and read-only.

pub mod errors;
pub mod index_page;
pub mod manifest;

pub use errors::{ReportError, ReportResult};
pub use index_page::{EntryStatus, IndexEntry, render_index};
pub use manifest::{Manifest, ManifestEntry};

use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::bookmarks::BookmarkRecord;
use crate::config::ArchiveConfig;

/// Files written by [`write_report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub index: PathBuf,
    pub manifest: Option<PathBuf>,
}

/// Render the index page (and the manifest, unless disabled) into the archive root
///
/// # Errors
///
/// Any failure to serialize or write either file.
pub async fn write_report(
    config: &ArchiveConfig,
    records: &[BookmarkRecord],
) -> ReportResult<ReportPaths> {
    let generated_at = Utc::now();

    let index = config.report_path();
    write_atomic(index.clone(), render_index(records, generated_at).into_bytes()).await?;
    info!("Wrote index of {} bookmarks to {}", records.len(), index.display());

    let manifest = if config.write_manifest() {
        let path = config.manifest_path();
        let json = Manifest::from_records(records, generated_at).to_json()?;
        write_atomic(path.clone(), json.into_bytes()).await?;
        info!("Wrote manifest to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(ReportPaths { index, manifest })
}

/// Write through a temp file in the target directory, then rename over the target
async fn write_atomic(path: PathBuf, content: Vec<u8>) -> ReportResult<()> {
    tokio::task::spawn_blocking(move || {
        persist(&path, &content).map_err(|source| ReportError::Write { path, source })
    })
    .await?
}

fn persist(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
