//! Test utilities shared by the bookmark archiver integration tests

use bookmark_archiver::archive_engine::{
    ArchiveError, ArchiveResult, FetchInvoker, FetchOutcome, FetchReport,
};
use bookmark_archiver::{ArchiveConfig, BookmarkRecord};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// A realistic log for one successfully mirrored page
#[allow(dead_code)]
pub fn wget_log(primary: &str) -> String {
    format!(
        "--2024-03-01 09:15:02--  https://example.com/\n\
         Resolving example.com... 93.184.216.34\n\
         HTTP request sent, awaiting response... 200 OK\n\
         Saving to: \"{primary}\"\n\
         \n\
         Saving to: \"example.com/style.css\"\n\
         \n\
         FINISHED --2024-03-01 09:15:03--\n\
         Downloaded: 2 files, 14K in 0.02s (700 KB/s)\n"
    )
}

/// Config rooted in a fresh temporary directory
#[allow(dead_code)]
pub fn test_config(workers: usize) -> (TempDir, ArchiveConfig) {
    let dir = TempDir::new().unwrap();
    let config = ArchiveConfig::builder()
        .archive_root(dir.path().join("archive"))
        .workers(workers)
        .build()
        .unwrap();
    (dir, config)
}

/// `count` bookmarks with distinct URLs and hashes
#[allow(dead_code)]
pub fn records(count: usize) -> Vec<BookmarkRecord> {
    (0..count)
        .map(|i| {
            BookmarkRecord::new(
                format!("Page {i}"),
                format!("https://site{i}.test/"),
                1000 + i as i64,
            )
        })
        .collect()
}

/// What the fake fetch does for one URL
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct FakeFetch {
    pub exit_code: Option<i32>,
    /// `None` leaves no log behind
    pub log: Option<String>,
    pub delay: Duration,
    pub spawn_fails: bool,
}

#[allow(dead_code)]
impl FakeFetch {
    pub fn ok(primary: &str) -> Self {
        Self::exit(0, Some(wget_log(primary)))
    }

    pub fn exit(code: i32, log: Option<String>) -> Self {
        Self {
            exit_code: Some(code),
            log,
            delay: Duration::ZERO,
            spawn_fails: false,
        }
    }

    pub fn spawn_failure() -> Self {
        Self {
            exit_code: None,
            log: None,
            delay: Duration::ZERO,
            spawn_fails: true,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-process stand-in for wget that records how it was driven
#[allow(dead_code)]
#[derive(Clone)]
pub struct FakeInvoker {
    config: ArchiveConfig,
    plans: Arc<HashMap<String, FakeFetch>>,
    default_plan: FakeFetch,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl FakeInvoker {
    pub fn new(config: ArchiveConfig, default_plan: FakeFetch) -> Self {
        Self {
            config,
            plans: Arc::new(HashMap::new()),
            default_plan,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_plan(mut self, url: &str, plan: FakeFetch) -> Self {
        Arc::make_mut(&mut self.plans).insert(url.to_string(), plan);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> HashMap<String, usize> {
        self.calls.lock().unwrap().clone()
    }
}

impl FetchInvoker for FakeInvoker {
    async fn fetch(&self, record: &BookmarkRecord) -> ArchiveResult<FetchReport> {
        let plan = self
            .plans
            .get(&record.url)
            .unwrap_or(&self.default_plan)
            .clone();
        *self
            .calls
            .lock()
            .unwrap()
            .entry(record.url.clone())
            .or_default() += 1;

        if plan.spawn_fails {
            return Err(ArchiveError::Spawn {
                program: PathBuf::from("fake-wget"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
            });
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(plan.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let log_path = self.config.fetch_log_path(record.url_hash);
        if let Some(log) = &plan.log {
            tokio::fs::write(&log_path, log).await.unwrap();
        }

        Ok(FetchReport {
            outcome: FetchOutcome::from_exit_code(plan.exit_code),
            log_path,
        })
    }
}

/// Writes an executable `/bin/sh` script standing in for wget
#[cfg(unix)]
#[allow(dead_code)]
pub fn write_script(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
