//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An integer-valued variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    IntParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A float-valued variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Batch size must be at least 1.
    #[error("invalid batch size {value}: must be at least 1")]
    InvalidBatchSize { value: usize },

    /// Mailbox capacity must be at least 1.
    #[error("invalid channel capacity {value}: must be at least 1")]
    InvalidChannelCapacity { value: usize },

    /// The hide threshold must be a finite number.
    #[error("invalid hide threshold {value}: must be finite")]
    InvalidHideThreshold { value: f32 },

    /// Snapshot path exists but is not a file.
    #[error("filters path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
