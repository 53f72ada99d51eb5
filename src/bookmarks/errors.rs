//! Error types for the bookmark collaborators
//!
//! Every variant is fatal to the run: without a profile or a readable store
//! there is nothing to archive.

use std::path::PathBuf;

/// Result type alias for bookmark source and profile operations
pub type BookmarkResult<T> = Result<T, BookmarkError>;

#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    /// No Firefox directory configured and no home directory to derive it from
    #[error("Cannot locate the Firefox directory: home directory is unknown")]
    NoHomeDir,

    /// `profiles.ini` missing or malformed
    #[error("Failed to read profiles from {path}: {source}")]
    ProfilesIni {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// Requested section absent from `profiles.ini`
    #[error("Profile section [{section}] not found in {path}")]
    ProfileNotFound { section: String, path: PathBuf },

    /// Section present but a required key is missing
    #[error("Profile section [{section}] has no {key} key")]
    ProfileKeyMissing { section: String, key: &'static str },

    /// Bookmark store could not be opened or queried
    #[error("Bookmark store error at {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// No bookmark folder with the requested title
    #[error("Bookmark folder {folder:?} not found")]
    FolderNotFound { folder: String },
}
