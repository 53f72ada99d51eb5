//! Read-only access to a Firefox `places.sqlite` bookmark store.
//!
//! Folders and bookmarks live in `moz_bookmarks` (`type = 2` folders,
//! `type = 1` bookmarks, `fk` pointing into `moz_places`); titles, URLs and
//! the precomputed `url_hash` live in `moz_places`.
//!
//! The store is opened immutable so a running Firefox holding its lock and
//! WAL does not block the read.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::errors::{BookmarkError, BookmarkResult};
use super::record::BookmarkRecord;

const FOLDER_ID_SQL: &str = "SELECT id FROM moz_bookmarks WHERE title = ? AND type = 2";

const FOLDER_BOOKMARKS_SQL: &str = r#"
SELECT p.title, p.url_hash, p.url
FROM moz_bookmarks b
JOIN moz_places p ON p.id = b.fk
WHERE b.parent = ? AND b.type = 1
ORDER BY b.id
"#;

/// Bookmark source backed by `places.sqlite`
#[derive(Clone, Debug)]
pub struct BookmarkStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl BookmarkStore {
    /// Open the store read-only.
    ///
    /// # Errors
    ///
    /// `BookmarkError::Store` when the database cannot be opened.
    pub async fn open(path: &Path) -> BookmarkResult<Self> {
        info!("Reading bookmarks from {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .immutable(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| BookmarkError::Store {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every bookmark directly inside the folder with the given title.
    ///
    /// Records come back in bookmark id order. Nested folders are not
    /// descended into. A bookmark whose place has a NULL title gets an empty
    /// title.
    ///
    /// One record is returned per bookmark, not per URL: a page bookmarked
    /// twice in the folder yields two records with the same `url_hash`, and
    /// their fetches share one `wget-<hash>.log`, so the two runs may
    /// overwrite each other's log.
    ///
    /// # Errors
    ///
    /// `BookmarkError::FolderNotFound` when no folder has that title,
    /// `BookmarkError::Store` on any query failure.
    pub async fn load_folder(&self, folder: &str) -> BookmarkResult<Vec<BookmarkRecord>> {
        let folder_id: Option<(i64,)> = sqlx::query_as(FOLDER_ID_SQL)
            .bind(folder)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| self.store_error(source))?;

        let (folder_id,) = folder_id.ok_or_else(|| BookmarkError::FolderNotFound {
            folder: folder.to_string(),
        })?;
        debug!("Bookmark folder {folder:?} has id {folder_id}");

        let rows: Vec<(Option<String>, i64, String)> = sqlx::query_as(FOLDER_BOOKMARKS_SQL)
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| self.store_error(source))?;

        info!("Loaded {} bookmarks from folder {folder:?}", rows.len());

        Ok(rows
            .into_iter()
            .map(|(title, url_hash, url)| {
                BookmarkRecord::new(title.unwrap_or_default(), url, url_hash)
            })
            .collect())
    }

    /// Close the underlying connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn store_error(&self, source: sqlx::Error) -> BookmarkError {
        BookmarkError::Store {
            path: self.path.clone(),
            source,
        }
    }
}
