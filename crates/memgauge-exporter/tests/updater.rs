//! Snapshot sources and the periodic updater.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Duration;

use memgauge_core::{MemorySnapshot, NodeStats};
use memgauge_exporter::app_state::AppState;
use memgauge_exporter::collector::MemoryField;
use memgauge_exporter::config;
use memgauge_exporter::source::{JsonFileSource, SnapshotSource, StaticSource};
use memgauge_exporter::updater::{self, refresh_once, spawn_updater};

fn state() -> AppState {
    let cfg = config::load_from_str(
        "version: 1\nexporter:\n  update_interval_ms: 500\nsource:\n  stats_path: \"unused.json\"\n",
    )
    .unwrap();
    AppState::new(cfg).unwrap()
}

/// Stats dump on disk, removed on drop (also when an assertion fails).
struct TempStats {
    path: PathBuf,
}

impl TempStats {
    fn new(name: &str, body: &str) -> Self {
        let path = std::env::temp_dir().join(format!("memgauge-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        Self { path }
    }
}

impl Drop for TempStats {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[tokio::test]
async fn refresh_from_json_file() {
    let stats_file = TempStats::new(
        "ok.json",
        r#"{"version":"1.2.1","topics":[],"memory":{"heap_objects":42,"next_gc_bytes":4096,"gc_total_runs":7}}"#,
    );
    let source = JsonFileSource::new(&stats_file.path);
    assert!(source.name().starts_with("file:"));

    let state = state();
    refresh_once(state.stats_collector(), &source).await.unwrap();

    assert_eq!(state.memory().value(MemoryField::HeapObject), Some(42.0));
    assert_eq!(state.memory().value(MemoryField::NextGcBytes), Some(4096.0));
    assert_eq!(state.memory().value(MemoryField::GcTotalRuns), Some(7.0));
}

#[tokio::test]
async fn missing_file_is_a_source_error_and_keeps_values() {
    let state = state();
    state.memory().update(&MemorySnapshot { heap_object: 5, ..MemorySnapshot::default() });

    let source = JsonFileSource::new(std::env::temp_dir().join("memgauge-does-not-exist.json"));
    let err = refresh_once(state.stats_collector(), &source).await.expect_err("must fail");
    assert_eq!(err.code().as_str(), "SOURCE");
    assert_eq!(state.memory().value(MemoryField::HeapObject), Some(5.0));
}

#[tokio::test]
async fn malformed_file_is_a_decode_error() {
    let stats_file = TempStats::new("bad.json", "{\"memory\": [");
    let state = state();
    let err = refresh_once(state.stats_collector(), &JsonFileSource::new(&stats_file.path))
        .await
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "DECODE");
}

#[tokio::test]
async fn static_source_serves_latest() {
    let source = StaticSource::new(NodeStats::default());
    let state = state();

    refresh_once(state.stats_collector(), &source).await.unwrap();
    assert_eq!(state.memory().value(MemoryField::HeapIdleBytes), Some(0.0));

    source
        .replace(NodeStats::from_memory(MemorySnapshot { heap_idle_bytes: 1000, ..MemorySnapshot::default() }))
        .unwrap();
    refresh_once(state.stats_collector(), &source).await.unwrap();
    assert_eq!(state.memory().value(MemoryField::HeapIdleBytes), Some(1000.0));
}

#[tokio::test]
async fn updater_marks_ready_and_stops_on_shutdown() {
    let state = state();
    let source: Arc<dyn SnapshotSource> = Arc::new(StaticSource::new(NodeStats::from_memory(
        MemorySnapshot { gc_total_runs: 3, ..MemorySnapshot::default() },
    )));
    assert!(!state.is_ready());

    let (tx, rx) = watch::channel(false);
    let handle = spawn_updater(state.clone(), source, Duration::from_millis(10), rx);

    // first tick fires immediately
    for _ in 0..100 {
        if state.is_ready() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(state.is_ready());
    assert_eq!(state.memory().value(MemoryField::GcTotalRuns), Some(3.0));

    tx.send(true).unwrap();
    let clean = tokio::time::timeout(Duration::from_secs(2), updater::join(handle))
        .await
        .expect("updater must stop");
    assert!(clean);
}

#[tokio::test]
async fn updater_survives_failing_source() {
    let state = state();
    let source: Arc<dyn SnapshotSource> =
        Arc::new(JsonFileSource::new(std::env::temp_dir().join("memgauge-never-there.json")));

    let (tx, rx) = watch::channel(false);
    let handle = spawn_updater(state.clone(), source, Duration::from_millis(10), rx);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!state.is_ready());
    assert!(!handle.is_finished());

    drop(tx);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("updater must stop when the sender is gone")
        .unwrap();
}

#[tokio::test]
async fn join_reports_panicked_task() {
    let handle = tokio::spawn(async { panic!("updater blew up") });
    assert!(!updater::join(handle).await);
}

#[tokio::test]
async fn join_reports_cancelled_task() {
    let handle = tokio::spawn(std::future::pending::<()>());
    handle.abort();
    assert!(!updater::join(handle).await);
}
