//! Handler configuration.
//!
//! Values come from an optional TOML file, command-line overrides and,
//! for the rollup URL only, the `ROLLUP_HTTP_SERVER_URL` environment
//! variable, in that order of precedence (CLI first).

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable naming the rollup HTTP server.
pub const ROLLUP_URL_ENV: &str = "ROLLUP_HTTP_SERVER_URL";

/// Configuration for the rollup request handler.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DappConfig {
    /// Base URL of the rollup HTTP server.
    #[serde(default)]
    rollup_url: Option<String>,

    /// Side length of every match board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Delay before polling again after a transport failure.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Seed for game id generation; entropy when unset.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_board_size() -> usize {
    3
}

#[instrument]
fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            rollup_url: None,
            board_size: default_board_size(),
            poll_interval_ms: default_poll_interval_ms(),
            seed: None,
        }
    }
}

impl DappConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Applies command-line overrides; `None` keeps the current value.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        rollup_url: Option<String>,
        board_size: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        if rollup_url.is_some() {
            self.rollup_url = rollup_url;
        }
        if let Some(size) = board_size {
            self.board_size = size;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Checks values that would otherwise fail later at startup.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::new("board_size must be at least 1"));
        }
        Ok(())
    }

    /// The configured rollup URL, falling back to the environment.
    #[instrument(skip(self))]
    pub fn resolved_rollup_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.rollup_url {
            return Ok(url.clone());
        }
        std::env::var(ROLLUP_URL_ENV).map_err(|_| {
            ConfigError::new(format!(
                "No rollup URL configured and {} is not set",
                ROLLUP_URL_ENV
            ))
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
