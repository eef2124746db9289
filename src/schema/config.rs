//! Configuration types for Game of Life sessions.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compute::{DEFAULT_COLS, DEFAULT_ROWS, PatternSource, PatternStamp};

/// Default delay between generations while running.
pub const DEFAULT_INTERVAL_MS: u64 = 200;

/// Default live-cell probability for randomize.
pub const DEFAULT_DENSITY: f64 = 0.15;

/// Top-level session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid height in cells.
    pub rows: usize,
    /// Grid width in cells.
    pub cols: usize,
    /// Delay between generations while running, in milliseconds.
    pub interval_ms: u64,
    /// Live-cell probability used by the randomize command (0.0-1.0).
    pub density: f64,
    /// Seed for the session's random source. None = entropy.
    pub random_seed: Option<u64>,
    /// Pattern placed by clicks in placement mode.
    pub stamp: PatternSource,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            interval_ms: DEFAULT_INTERVAL_MS,
            density: DEFAULT_DENSITY,
            random_seed: None,
            stamp: PatternSource::default(),
        }
    }
}

impl SessionConfig {
    /// Delay between generations.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        self.stamp
            .resolve()
            .map_err(|e| ConfigError::InvalidStamp(e.to_string()))?;
        Ok(())
    }

    /// Resolve the placement stamp.
    pub fn stamp_pattern(&self) -> Result<PatternStamp, ConfigError> {
        self.stamp
            .resolve()
            .map_err(|e| ConfigError::InvalidStamp(e.to_string()))
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (rows, cols) must be non-zero")]
    InvalidDimensions,
    #[error("Step interval must be positive")]
    InvalidInterval,
    #[error("Density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
    #[error("Invalid stamp pattern: {0}")]
    InvalidStamp(String),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
