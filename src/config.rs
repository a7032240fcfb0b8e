//! Autoplay configuration.
//!
//! Everything here is external to the decision engine: which route to
//! pursue and how the scheduler paces its turns.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::board::Route;

/// Default lower bound for the delay between turns.
pub const DEFAULT_DELAY_MIN_MS: u64 = 700;
/// Default upper bound for the delay between turns.
pub const DEFAULT_DELAY_MAX_MS: u64 = 1500;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("delay bounds are inverted: min {min_ms}ms > max {max_ms}ms")]
    InvertedDelay { min_ms: u64, max_ms: u64 },
}

/// Configuration for an autoplay session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutoplayConfig {
    /// Which target layout to pursue.
    pub route: Route,
    /// Minimum delay between turns (milliseconds).
    pub delay_min_ms: u64,
    /// Maximum delay between turns (milliseconds).
    pub delay_max_ms: u64,
    /// Step one turn at a time on request instead of looping.
    pub manual: bool,
    /// Stop after this many turns (0 = no limit).
    pub max_turns: u64,
    /// Seed for the delay jitter (0 = use entropy).
    pub seed: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            route: Route::Avatar,
            delay_min_ms: DEFAULT_DELAY_MIN_MS,
            delay_max_ms: DEFAULT_DELAY_MAX_MS,
            manual: false,
            max_turns: 0,
            seed: 0,
        }
    }
}

impl AutoplayConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AutoplayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the delay bounds are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_min_ms > self.delay_max_ms {
            return Err(ConfigError::InvertedDelay {
                min_ms: self.delay_min_ms,
                max_ms: self.delay_max_ms,
            });
        }
        Ok(())
    }

    pub fn delay_min(&self) -> Duration {
        Duration::from_millis(self.delay_min_ms)
    }

    pub fn delay_max(&self) -> Duration {
        Duration::from_millis(self.delay_max_ms)
    }
}
