//! Audio engine configuration.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use cueplay_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Speed of sound in meters per second used by the 3D calculation.
pub const DEFAULT_SPEED_OF_SOUND: f32 = 343.5;

/// Audio engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Override for the output channel count; the backend decides when unset.
    pub output_channels: Option<u16>,
    /// Speed of sound handed to the 3D calculation context.
    pub speed_of_sound: f32,
    /// Log and count cues that are only disposed because they were dropped.
    pub warn_on_implicit_dispose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_channels: None,
            speed_of_sound: DEFAULT_SPEED_OF_SOUND,
            warn_on_implicit_dispose: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values no engine can run with.
    pub fn validate(&self) -> Result<()> {
        if self.output_channels == Some(0) {
            return Err(Error::Config("output_channels must be at least 1".to_string()));
        }
        if !self.speed_of_sound.is_finite() || self.speed_of_sound <= 0.0 {
            return Err(Error::Config(format!(
                "speed_of_sound must be positive, got {}",
                self.speed_of_sound
            )));
        }
        Ok(())
    }
}
