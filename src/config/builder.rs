//! Type-safe builder for `ArchiveConfig` using the typestate pattern
//!
//! The archive root is the only required field; `build()` is only available
//! once it has been set.

use anyhow::{Context, Result, anyhow, bail};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ArchiveConfig;

// Type states for the builder
pub struct WithArchiveRoot;

pub struct ArchiveConfigBuilder<State = ()> {
    pub(crate) archive_root: Option<PathBuf>,
    pub(crate) bookmarks_folder: String,
    pub(crate) workers: usize,
    pub(crate) queue_capacity: usize,
    pub(crate) profile_section: String,
    pub(crate) firefox_dir: Option<PathBuf>,
    pub(crate) fetch_program: PathBuf,
    pub(crate) write_manifest: bool,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ArchiveConfigBuilder<()> {
    fn default() -> Self {
        let defaults = ArchiveConfig::default();
        Self {
            archive_root: None,
            bookmarks_folder: defaults.bookmarks_folder,
            workers: defaults.workers,
            queue_capacity: defaults.queue_capacity,
            profile_section: defaults.profile_section,
            firefox_dir: defaults.firefox_dir,
            fetch_program: defaults.fetch_program,
            write_manifest: defaults.write_manifest,
            _phantom: PhantomData,
        }
    }
}

impl ArchiveConfig {
    /// Create a builder for configuring an `ArchiveConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ArchiveConfigBuilder<()> {
        ArchiveConfigBuilder::default()
    }
}

impl ArchiveConfigBuilder<()> {
    pub fn archive_root(self, dir: impl Into<PathBuf>) -> ArchiveConfigBuilder<WithArchiveRoot> {
        ArchiveConfigBuilder {
            archive_root: Some(dir.into()),
            bookmarks_folder: self.bookmarks_folder,
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            profile_section: self.profile_section,
            firefox_dir: self.firefox_dir,
            fetch_program: self.fetch_program,
            write_manifest: self.write_manifest,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the archive root is set
impl ArchiveConfigBuilder<WithArchiveRoot> {
    /// Validate and build the config
    ///
    /// # Errors
    ///
    /// Fails when `workers` or `queue_capacity` is zero, when the folder,
    /// profile section or fetch program is empty, or when the archive root
    /// cannot be made absolute.
    pub fn build(self) -> Result<ArchiveConfig> {
        if self.workers == 0 {
            bail!("workers must be at least 1");
        }
        if self.queue_capacity == 0 {
            bail!("queue_capacity must be at least 1");
        }
        if self.bookmarks_folder.is_empty() {
            bail!("bookmarks_folder must not be empty");
        }
        if self.profile_section.is_empty() {
            bail!("profile_section must not be empty");
        }
        if self.fetch_program.as_os_str().is_empty() {
            bail!("fetch_program must not be empty");
        }

        // Fetches run with the archive root as their cwd, so a relative root
        // would resolve differently for the child and for the log reader
        let archive_root = self
            .archive_root
            .ok_or_else(|| anyhow!("archive_root is required"))?;
        let archive_root = std::path::absolute(&archive_root).with_context(|| {
            format!("Invalid archive_root {}", archive_root.display())
        })?;

        Ok(ArchiveConfig {
            archive_root,
            bookmarks_folder: self.bookmarks_folder,
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            profile_section: self.profile_section,
            firefox_dir: self.firefox_dir,
            fetch_program: self.fetch_program,
            write_manifest: self.write_manifest,
        })
    }
}

// Methods available for all states
impl<State> ArchiveConfigBuilder<State> {
    #[must_use]
    pub fn bookmarks_folder(mut self, folder: impl Into<String>) -> Self {
        self.bookmarks_folder = folder.into();
        self
    }

    /// Set the number of workers (maximum concurrent fetches)
    ///
    /// # Example
    /// ```rust
    /// # use bookmark_archiver::config::ArchiveConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ArchiveConfig::builder()
    ///     .archive_root("/tmp/archive")
    ///     .workers(8)
    ///     .build()?;
    /// assert_eq!(config.workers(), 8);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub fn profile_section(mut self, section: impl Into<String>) -> Self {
        self.profile_section = section.into();
        self
    }

    #[must_use]
    pub fn firefox_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.firefox_dir = dir;
        self
    }

    /// Override the fetch program (defaults to `wget` on `PATH`)
    #[must_use]
    pub fn fetch_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.fetch_program = program.into();
        self
    }

    #[must_use]
    pub fn write_manifest(mut self, write: bool) -> Self {
        self.write_manifest = write;
        self
    }
}
