//! Profile lookup, bookmark loading, fetching and reporting in one run
#![cfg(unix)]

use bookmark_archiver::{ArchiveConfig, NoOpProgress, archive, load_bookmarks};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tempfile::TempDir;

mod common;
use common::write_script;

async fn firefox_fixture(firefox_dir: &Path) {
    let profile_dir = firefox_dir.join("x1y2z3.default-release");
    std::fs::create_dir_all(&profile_dir).unwrap();
    std::fs::write(
        firefox_dir.join("profiles.ini"),
        "[Profile0]\nName=default-release\nIsRelative=1\nPath=x1y2z3.default-release\n",
    )
    .unwrap();

    let options = SqliteConnectOptions::new()
        .filename(profile_dir.join("places.sqlite"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    for sql in [
        "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT, title TEXT, url_hash INTEGER)",
        "CREATE TABLE moz_bookmarks (id INTEGER PRIMARY KEY, type INTEGER, fk INTEGER, parent INTEGER, title TEXT)",
        "INSERT INTO moz_bookmarks VALUES (5, 2, NULL, 1, 'archive')",
        "INSERT INTO moz_places VALUES (1, 'https://good.test/', 'Good', 11)",
        "INSERT INTO moz_places VALUES (2, 'https://broken.test/', 'Broken', 22)",
        "INSERT INTO moz_places VALUES (3, 'https://partial.test/', 'Partial', 33)",
        "INSERT INTO moz_bookmarks VALUES (6, 1, 1, 5, 'Good')",
        "INSERT INTO moz_bookmarks VALUES (7, 1, 2, 5, 'Broken')",
        "INSERT INTO moz_bookmarks VALUES (8, 1, 3, 5, 'Partial')",
    ] {
        sqlx::query(sql).execute(&pool).await.unwrap();
    }
    pool.close().await;
}

/// Succeeds for good.test, exits 8 for partial.test, 4 for anything else
const FAKE_WGET: &str = r#"
log=""
url=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) log="$2"; shift ;;
    --*) ;;
    *) url="$1" ;;
  esac
  shift
done
case "$url" in
  https://good.test/) host=good.test; code=0 ;;
  https://partial.test/) host=partial.test; code=8 ;;
  *) printf 'ERROR 500\n' > "$log"; exit 4 ;;
esac
printf 'Saving to: "%s/index.html"\n' "$host" > "$log"
printf 'FINISHED --2024-03-01 09:15:03--\n' >> "$log"
printf 'Downloaded: 1 files, 1K in 0s\n' >> "$log"
exit $code
"#;

fn config(dir: &TempDir) -> ArchiveConfig {
    let program = write_script(dir.path(), "fake-wget", FAKE_WGET);
    ArchiveConfig::builder()
        .archive_root(dir.path().join("archive"))
        .firefox_dir(Some(dir.path().join("firefox")))
        .fetch_program(program)
        .workers(2)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_load_bookmarks_from_profile() {
    let dir = TempDir::new().unwrap();
    firefox_fixture(&dir.path().join("firefox")).await;

    let records = load_bookmarks(&config(&dir)).await.unwrap();
    let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Good", "Broken", "Partial"]);
}

#[tokio::test]
async fn test_full_archive_run_writes_report() {
    let dir = TempDir::new().unwrap();
    firefox_fixture(&dir.path().join("firefox")).await;

    let run = archive(config(&dir), NoOpProgress).await.unwrap();
    assert_eq!(run.summary.total, 3);
    assert_eq!(run.summary.succeeded, 1);
    assert_eq!(run.summary.partial, 1);
    assert_eq!(run.summary.failed, 1);

    let root = dir.path().join("archive");
    assert!(root.join("wget-11.log").is_file());
    assert!(root.join("wget-22.log").is_file());

    let page = std::fs::read_to_string(root.join("index.html")).unwrap();
    let good = page
        .find(r#"<a href="good.test/index.html">Good | OK</a>"#)
        .unwrap();
    let broken = page.find(r##"<a href="#">Broken | MISSING</a>"##).unwrap();
    let partial = page
        .find(r#"<a href="partial.test/index.html">Partial | OK</a>"#)
        .unwrap();
    assert!(good < broken && broken < partial);

    assert!(root.join("manifest.json").is_file());
}

#[tokio::test]
async fn test_missing_folder_aborts_before_fetching() {
    let dir = TempDir::new().unwrap();
    firefox_fixture(&dir.path().join("firefox")).await;

    let config = ArchiveConfig::builder()
        .archive_root(dir.path().join("archive"))
        .firefox_dir(Some(dir.path().join("firefox")))
        .bookmarks_folder("does not exist")
        .build()
        .unwrap();

    assert!(archive(config, NoOpProgress).await.is_err());
    assert!(!dir.path().join("archive").join("index.html").exists());
}
