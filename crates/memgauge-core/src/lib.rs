//! memgauge core: the nsqd stats data model and the error surface shared by
//! the exporter crates.
//!
//! This crate carries no runtime, HTTP or metrics dependencies. It only knows
//! how to describe a memory snapshot and how to decode one from the JSON
//! document served by nsqd's `/stats?format=json` endpoint.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed stats documents surface as `MemGaugeError::Decode`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod stats;

/// Shared result type.
pub use error::{Result, MemGaugeError};
pub use stats::{MemorySnapshot, NodeStats};
