//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;

use memgauge_core::error::{MemGaugeError, Result};

pub use schema::{ExporterConfig, ExporterSection, SourceSection};

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MemGaugeError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| MemGaugeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
