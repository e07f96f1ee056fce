use std::time::Duration;

use serde::Deserialize;
use memgauge_core::error::{MemGaugeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    pub source: SourceSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MemGaugeError::UnsupportedVersion);
        }

        self.exporter.validate()?;
        self.source.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Metric name prefix, e.g. `nsqd` -> `nsqd_memory_heap_object`.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            namespace: default_namespace(),
            update_interval_ms: default_update_interval_ms(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        if !is_metric_prefix(&self.namespace) {
            return Err(MemGaugeError::Config(format!(
                "exporter.namespace must match [a-zA-Z_][a-zA-Z0-9_]*, got {:?}",
                self.namespace
            )));
        }
        if !(500..=300_000).contains(&self.update_interval_ms) {
            return Err(MemGaugeError::Config(
                "exporter.update_interval_ms must be between 500 and 300000".into(),
            ));
        }
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// nsqd `/stats?format=json` document on disk.
    pub stats_path: String,
}

impl SourceSection {
    pub fn validate(&self) -> Result<()> {
        if self.stats_path.trim().is_empty() {
            return Err(MemGaugeError::Config("source.stats_path must not be empty".into()));
        }
        Ok(())
    }
}

fn is_metric_prefix(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_listen() -> String {
    "0.0.0.0:9117".into()
}
fn default_namespace() -> String {
    "nsqd".into()
}
fn default_update_interval_ms() -> u64 {
    5000
}
