//! Shared error type across memgauge crates.

use thiserror::Error;

/// Stable error codes (used in logs and by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or unreadable configuration.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Metric construction or registry registration rejected.
    Registration,
    /// Snapshot source could not be read.
    Source,
    /// Stats document could not be decoded.
    Decode,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Registration => "REGISTRATION",
            ErrorCode::Source => "SOURCE",
            ErrorCode::Decode => "DECODE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MemGaugeError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum MemGaugeError {
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("registration: {0}")]
    Registration(String),
    #[error("source: {0}")]
    Source(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MemGaugeError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MemGaugeError::Config(_) => ErrorCode::Config,
            MemGaugeError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MemGaugeError::Registration(_) => ErrorCode::Registration,
            MemGaugeError::Source(_) => ErrorCode::Source,
            MemGaugeError::Decode(_) => ErrorCode::Decode,
            MemGaugeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
