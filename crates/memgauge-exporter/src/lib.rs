//! memgauge exporter library entry.
//!
//! Wires the memory gauge collector, the snapshot sources, the periodic
//! updater and the operational HTTP endpoints into a Prometheus exporter for
//! nsqd memory statistics. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod collector;
pub mod config;
pub mod ops;
pub mod router;
pub mod shutdown;
pub mod source;
pub mod updater;
