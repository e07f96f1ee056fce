//! Stat-category collectors.
//!
//! Each collector owns the gauges for one slice of the nsqd stats document and
//! is driven from two sides: the updater pushes fresh `NodeStats` through
//! `set`, the scrape handler pulls descriptors and samples through
//! `describe`/`collect`.

pub mod memory;

use prometheus::core::Desc;
use prometheus::proto::MetricFamily;

use memgauge_core::NodeStats;

pub use memory::{MemoryField, MemoryGaugeSet};

/// Common contract of stat-category collectors.
pub trait StatsCollector: Send + Sync {
    /// Push the current stats into the owned gauges.
    fn set(&self, stats: &NodeStats);
    /// Emit one descriptor per owned metric.
    fn describe<'a>(&'a self, sink: &mut Vec<&'a Desc>);
    /// Emit the current sample of every owned metric.
    fn collect(&self, sink: &mut Vec<MetricFamily>);
    /// Clear every owned metric back to its zero value.
    fn reset(&self);
}
