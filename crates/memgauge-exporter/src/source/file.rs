use std::path::PathBuf;

use async_trait::async_trait;

use memgauge_core::error::{MemGaugeError, Result};
use memgauge_core::NodeStats;

use super::SnapshotSource;

/// Reads an nsqd `/stats?format=json` dump from disk on every fetch.
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<NodeStats> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            MemGaugeError::Source(format!("read {} failed: {e}", self.path.display()))
        })?;
        NodeStats::from_json(&raw)
    }
}
