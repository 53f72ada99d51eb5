//! Bookmark records and the Firefox collaborators that produce them
//!
//! - `record`: the per-bookmark record and the metadata attached after a fetch
//! - `profile`: resolves a `profiles.ini` section to a profile directory
//! - `places`: reads one bookmark folder out of `places.sqlite`

pub mod errors;
pub mod places;
pub mod profile;
pub mod record;

pub use errors::{BookmarkError, BookmarkResult};
pub use places::BookmarkStore;
pub use profile::{FirefoxProfile, ProfileLocator};
pub use record::{ArchiveMetadata, BookmarkRecord};
