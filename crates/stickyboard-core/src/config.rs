//! Board behaviour configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Minimum note width and height.
pub const DEFAULT_MIN_NOTE_SIZE: f64 = 50.0;

/// User id recorded in snapshots when none is configured.
pub const DEFAULT_USER_ID: &str = "local";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What happens to connectors when an element they point at is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorPolicy {
    /// Leave the connector in place; consumers skip dangling connectors.
    #[default]
    Tolerate,
    /// Delete connectors referencing the removed element in the same edit.
    Cascade,
}

/// Tunables for the reducer and its front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Notes are grown to at least this width and height on commit.
    pub min_note_size: f64,
    /// Maximum number of history snapshots (None = unbounded).
    pub history_limit: Option<usize>,
    pub connector_policy: ConnectorPolicy,
    /// Zoom bounds for front ends; the reducer itself never clamps.
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Recorded as the author of history snapshots.
    pub user_id: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_note_size: DEFAULT_MIN_NOTE_SIZE,
            history_limit: None,
            connector_policy: ConnectorPolicy::default(),
            min_zoom: crate::viewport::MIN_ZOOM,
            max_zoom: crate::viewport::MAX_ZOOM,
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_note_size.is_finite() && self.min_note_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_note_size must be positive, got {}",
                self.min_note_size
            )));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds must satisfy 0 < min_zoom <= max_zoom, got {}..{}",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}
