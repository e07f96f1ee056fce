//! Snapshot sources.
//!
//! A source hands the updater one `NodeStats` per tick. The exporter only
//! ships a file-backed source (an nsqd stats dump refreshed by an external
//! job) and an in-memory one for embedding and tests.

pub mod file;

use std::sync::RwLock;

use async_trait::async_trait;

use memgauge_core::error::{MemGaugeError, Result};
use memgauge_core::NodeStats;

pub use file::JsonFileSource;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;
    async fn fetch(&self) -> Result<NodeStats>;
}

/// Serves whatever stats were last stored.
#[derive(Debug, Default)]
pub struct StaticSource {
    stats: RwLock<NodeStats>,
}

impl StaticSource {
    pub fn new(stats: NodeStats) -> Self {
        Self { stats: RwLock::new(stats) }
    }

    pub fn replace(&self, stats: NodeStats) -> Result<()> {
        let mut guard = self
            .stats
            .write()
            .map_err(|_| MemGaugeError::Internal("static source lock poisoned".into()))?;
        *guard = stats;
        Ok(())
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<NodeStats> {
        self.stats
            .read()
            .map(|s| s.clone())
            .map_err(|_| MemGaugeError::Internal("static source lock poisoned".into()))
    }
}
