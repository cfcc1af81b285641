//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SIFT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHANNEL_CAPACITY, DEFAULT_DEBOUNCE_MS, DEFAULT_HIDE_THRESHOLD,
    DEFAULT_SHOW_TOP_K,
};

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIFT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Posts buffered before a pass triggers immediately. Default: `30`.
    pub batch_size: usize,

    /// Idle debounce in milliseconds before a partial buffer is scored.
    /// Default: `500`.
    pub debounce_ms: u64,

    /// Hide-mode relevance threshold applied when a command names none.
    /// Default: `0.5`.
    pub hide_threshold: f32,

    /// Show-mode retain count applied when a command names none. Default: `20`.
    pub show_top_k: usize,

    /// Path of the JSON filter snapshot. Default: `./.data/filters.json`.
    pub filters_path: PathBuf,

    /// Coordinator mailbox capacity. Default: `256`.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            hide_threshold: DEFAULT_HIDE_THRESHOLD,
            show_top_k: DEFAULT_SHOW_TOP_K,
            filters_path: PathBuf::from("./.data/filters.json"),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    const ENV_BATCH_SIZE: &'static str = "SIFT_BATCH_SIZE";
    const ENV_DEBOUNCE_MS: &'static str = "SIFT_DEBOUNCE_MS";
    const ENV_HIDE_THRESHOLD: &'static str = "SIFT_HIDE_THRESHOLD";
    const ENV_SHOW_TOP_K: &'static str = "SIFT_SHOW_TOP_K";
    const ENV_FILTERS_PATH: &'static str = "SIFT_FILTERS_PATH";
    const ENV_CHANNEL_CAPACITY: &'static str = "SIFT_CHANNEL_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            batch_size: Self::parse_usize_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?,
            debounce_ms: Self::parse_u64_from_env(Self::ENV_DEBOUNCE_MS, defaults.debounce_ms)?,
            hide_threshold: Self::parse_f32_from_env(
                Self::ENV_HIDE_THRESHOLD,
                defaults.hide_threshold,
            )?,
            show_top_k: Self::parse_usize_from_env(Self::ENV_SHOW_TOP_K, defaults.show_top_k)?,
            filters_path: Self::parse_path_from_env(Self::ENV_FILTERS_PATH, defaults.filters_path),
            channel_capacity: Self::parse_usize_from_env(
                Self::ENV_CHANNEL_CAPACITY,
                defaults.channel_capacity,
            )?,
        })
    }

    /// Validates basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                value: self.batch_size,
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::InvalidChannelCapacity {
                value: self.channel_capacity,
            });
        }
        if !self.hide_threshold.is_finite() {
            return Err(ConfigError::InvalidHideThreshold {
                value: self.hide_threshold,
            });
        }
        if self.filters_path.exists() && !self.filters_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.filters_path.clone(),
            });
        }
        Ok(())
    }

    /// The idle debounce as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn parse_usize_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => value.parse().map_err(|source| ConfigError::IntParseError {
                name,
                value,
                source,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_u64_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(name) {
            Ok(value) => value.parse().map_err(|source| ConfigError::IntParseError {
                name,
                value,
                source,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f32_from_env(name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .parse()
                .map_err(|source| ConfigError::FloatParseError {
                    name,
                    value,
                    source,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(name: &'static str, default: PathBuf) -> PathBuf {
        env::var(name).map(PathBuf::from).unwrap_or(default)
    }
}
