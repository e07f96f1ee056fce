//! nsqd stats document (JSON).
//!
//! Only the fields the exporter reads are modeled; everything else in the
//! document (topics, channels, producers) is ignored during decoding.

use serde::Deserialize;

use crate::error::{MemGaugeError, Result};

/// Point-in-time memory statistics of one nsqd node.
///
/// Field names follow the exported metric suffixes; JSON keys follow nsqd.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemorySnapshot {
    /// Number of allocated heap objects (`heap_objects` in JSON).
    #[serde(rename = "heap_objects")]
    pub heap_object: u64,
    pub heap_idle_bytes: u64,
    pub heap_in_use_bytes: u64,
    pub heap_released_bytes: u64,
    /// GC pause percentiles, microseconds.
    pub gc_pause_usec_100: u64,
    pub gc_pause_usec_99: u64,
    pub gc_pause_usec_95: u64,
    /// Heap size that triggers the next GC cycle.
    pub next_gc_bytes: u64,
    /// Cumulative number of completed GC cycles.
    pub gc_total_runs: u64,
}

/// Subset of the `/stats?format=json` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeStats {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
    /// Node start time, unix seconds.
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub memory: MemorySnapshot,
}

impl NodeStats {
    /// Wrap a bare snapshot (no node metadata).
    pub fn from_memory(memory: MemorySnapshot) -> Self {
        Self {
            memory,
            ..Self::default()
        }
    }

    /// Decode a stats document.
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw)
            .map_err(|e| MemGaugeError::Decode(format!("invalid stats json: {e}")))
    }
}
