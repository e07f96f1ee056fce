//! Shared application state for the memgauge exporter.
//!
//! Owns the Prometheus registry explicitly (no process-global default
//! registry) and the memory gauge set registered into it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use prometheus::{Encoder, Registry, TextEncoder};

use memgauge_core::error::{MemGaugeError, Result};

use crate::collector::{MemoryGaugeSet, StatsCollector};
use crate::config::ExporterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Registry,
    memory: MemoryGaugeSet,
    ready: AtomicBool,
}

impl AppState {
    /// Build state with a private registry.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        Self::with_registry(cfg, Registry::new())
    }

    /// Build state on top of a caller-provided registry.
    ///
    /// Fails when the gauge names are already registered there (for example
    /// two exporters sharing one namespace).
    pub fn with_registry(cfg: ExporterConfig, registry: Registry) -> Result<Self> {
        let memory = MemoryGaugeSet::build(&cfg.exporter.namespace)?;

        registry.register(Box::new(memory.clone())).map_err(|e| {
            MemGaugeError::Registration(format!(
                "memory gauges (namespace={}): {e}",
                cfg.exporter.namespace
            ))
        })?;

        tracing::debug!(namespace = %cfg.exporter.namespace, gauges = memory.len(), "memory gauges registered");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                memory,
                ready: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn memory(&self) -> &MemoryGaugeSet {
        &self.inner.memory
    }

    /// Collector driven by the updater.
    pub fn stats_collector(&self) -> &dyn StatsCollector {
        &self.inner.memory
    }

    /// Mark that at least one snapshot was applied.
    /// Returns the previous value.
    pub fn mark_ready(&self) -> bool {
        self.inner.ready.swap(true, Ordering::Relaxed)
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::Relaxed)
    }

    /// Render every registered metric in Prometheus text exposition format.
    pub fn render_metrics(&self) -> Result<String> {
        let families = self.inner.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(|e| MemGaugeError::Internal(format!("encode metrics failed: {e}")))?;
        String::from_utf8(buf)
            .map_err(|e| MemGaugeError::Internal(format!("metrics not utf-8: {e}")))
    }
}
