//! Top-level facade crate for memgauge.
//!
//! Re-exports the core data model and the exporter library so users can depend on a single crate.

pub mod core {
    pub use memgauge_core::*;
}

pub mod exporter {
    pub use memgauge_exporter::*;
}
