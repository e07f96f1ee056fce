//! Memory gauges of an nsqd node.
//!
//! Nine single-value gauges named `<namespace>_memory_<suffix>`, one per
//! field of `MemorySnapshot`. The binding table is fixed at construction.

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts};

use memgauge_core::error::{MemGaugeError, Result};
use memgauge_core::{MemorySnapshot, NodeStats};

use super::StatsCollector;

const SUBSYSTEM_SUFFIX: &str = "_memory";

/// Snapshot field exported as a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryField {
    HeapObject,
    HeapIdleBytes,
    HeapInUseBytes,
    HeapReleasedBytes,
    GcPauseUsec100,
    GcPauseUsec99,
    GcPauseUsec95,
    NextGcBytes,
    GcTotalRuns,
}

impl MemoryField {
    /// Every field, in exposition order.
    pub const ALL: [MemoryField; 9] = [
        MemoryField::HeapObject,
        MemoryField::HeapIdleBytes,
        MemoryField::HeapInUseBytes,
        MemoryField::HeapReleasedBytes,
        MemoryField::GcPauseUsec100,
        MemoryField::GcPauseUsec99,
        MemoryField::GcPauseUsec95,
        MemoryField::NextGcBytes,
        MemoryField::GcTotalRuns,
    ];

    /// Metric name suffix (after `<namespace>_memory_`).
    pub fn suffix(self) -> &'static str {
        match self {
            MemoryField::HeapObject => "heap_object",
            MemoryField::HeapIdleBytes => "heap_idle_bytes",
            MemoryField::HeapInUseBytes => "heap_in_use_bytes",
            MemoryField::HeapReleasedBytes => "heap_released_bytes",
            MemoryField::GcPauseUsec100 => "gc_pause_usec_100",
            MemoryField::GcPauseUsec99 => "gc_pause_usec_99",
            MemoryField::GcPauseUsec95 => "gc_pause_usec_95",
            MemoryField::NextGcBytes => "next_gc_bytes",
            MemoryField::GcTotalRuns => "gc_total_runs",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            MemoryField::HeapObject => "Heap object",
            MemoryField::HeapIdleBytes => "Heap idle bytes",
            MemoryField::HeapInUseBytes => "Heap in use bytes",
            MemoryField::HeapReleasedBytes => "Heap released bytes",
            MemoryField::GcPauseUsec100 => "GC pause usec 100",
            MemoryField::GcPauseUsec99 => "GC pause usec 99",
            MemoryField::GcPauseUsec95 => "GC pause usec 95",
            MemoryField::NextGcBytes => "Next GC bytes",
            MemoryField::GcTotalRuns => "GC total runs",
        }
    }

    /// Read this field from a snapshot as a gauge value.
    pub fn read(self, m: &MemorySnapshot) -> f64 {
        let v = match self {
            MemoryField::HeapObject => m.heap_object,
            MemoryField::HeapIdleBytes => m.heap_idle_bytes,
            MemoryField::HeapInUseBytes => m.heap_in_use_bytes,
            MemoryField::HeapReleasedBytes => m.heap_released_bytes,
            MemoryField::GcPauseUsec100 => m.gc_pause_usec_100,
            MemoryField::GcPauseUsec99 => m.gc_pause_usec_99,
            MemoryField::GcPauseUsec95 => m.gc_pause_usec_95,
            MemoryField::NextGcBytes => m.next_gc_bytes,
            MemoryField::GcTotalRuns => m.gc_total_runs,
        };
        // exact below 2^53
        v as f64
    }
}

#[derive(Clone)]
struct GaugeBinding {
    field: MemoryField,
    gauge: Gauge,
}

/// Memory gauge set for one metrics namespace.
///
/// Clones share the underlying gauges, so one handle can be registered into a
/// `prometheus::Registry` while another is fed by the updater. Gauge values
/// are atomics; `update` and `collect` may run concurrently.
#[derive(Clone)]
pub struct MemoryGaugeSet {
    bindings: Vec<GaugeBinding>,
}

impl MemoryGaugeSet {
    /// Build the nine gauges under `<namespace>_memory_`.
    ///
    /// Fails only when `namespace` does not form a valid metric name.
    pub fn build(namespace: &str) -> Result<Self> {
        // prometheus drops empty name parts; join by hand so "" still yields `_memory_*`
        let prefix = format!("{namespace}{SUBSYSTEM_SUFFIX}");
        let bindings = MemoryField::ALL
            .iter()
            .map(|&field| {
                let opts = Opts::new(field.suffix(), field.help()).namespace(prefix.as_str());
                Gauge::with_opts(opts)
                    .map(|gauge| GaugeBinding { field, gauge })
                    .map_err(|e| {
                        MemGaugeError::Registration(format!(
                            "memory gauge {} (namespace={namespace}): {e}",
                            field.suffix()
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bindings })
    }

    /// Overwrite every gauge with the snapshot's values.
    pub fn update(&self, snapshot: &MemorySnapshot) {
        for b in &self.bindings {
            b.gauge.set(b.field.read(snapshot));
        }
    }

    pub fn describe<'a>(&'a self, sink: &mut Vec<&'a Desc>) {
        for b in &self.bindings {
            sink.extend(b.gauge.desc());
        }
    }

    pub fn collect(&self, sink: &mut Vec<MetricFamily>) {
        for b in &self.bindings {
            sink.extend(b.gauge.collect());
        }
    }

    /// Set every gauge back to 0.
    pub fn reset(&self) {
        for b in &self.bindings {
            b.gauge.set(0.0);
        }
    }

    /// Current value of one gauge.
    pub fn value(&self, field: MemoryField) -> Option<f64> {
        self.bindings
            .iter()
            .find(|b| b.field == field)
            .map(|b| b.gauge.get())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl StatsCollector for MemoryGaugeSet {
    fn set(&self, stats: &NodeStats) {
        self.update(&stats.memory);
    }

    fn describe<'a>(&'a self, sink: &mut Vec<&'a Desc>) {
        MemoryGaugeSet::describe(self, sink);
    }

    fn collect(&self, sink: &mut Vec<MetricFamily>) {
        MemoryGaugeSet::collect(self, sink);
    }

    fn reset(&self) {
        MemoryGaugeSet::reset(self);
    }
}

impl Collector for MemoryGaugeSet {
    fn desc(&self) -> Vec<&Desc> {
        let mut out = Vec::with_capacity(self.bindings.len());
        MemoryGaugeSet::describe(self, &mut out);
        out
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut out = Vec::with_capacity(self.bindings.len());
        MemoryGaugeSet::collect(self, &mut out);
        out
    }
}
