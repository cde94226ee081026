/*!
 * Engine Configuration
 *
 * Runtime configuration for the frame driver and process registry
 */

use super::errors::ConfigError;
use super::limits::{
    DEFAULT_FRAME_RATE_HZ, DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_REGISTRY_CAPACITY,
    DEFAULT_TICK_RATE_HZ, MAX_RATE_HZ,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding `tick_rate_hz`
pub const ENV_TICK_RATE: &str = "GLYPH_TICK_RATE";
/// Environment variable overriding `frame_rate_hz`
pub const ENV_FRAME_RATE: &str = "GLYPH_FRAME_RATE";
/// Environment variable overriding `max_ticks_per_frame`
pub const ENV_MAX_CATCHUP: &str = "GLYPH_MAX_CATCHUP";
/// Environment variable overriding `initial_capacity`
pub const ENV_REGISTRY_CAPACITY: &str = "GLYPH_REGISTRY_CAPACITY";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Rendered frames per second
    pub frame_rate_hz: u32,
    /// Catch-up cap: ticks run at most per frame
    pub max_ticks_per_frame: u32,
    /// Registry slots reserved up front
    pub initial_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            initial_capacity: DEFAULT_REGISTRY_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `GLYPH_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `GLYPH_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TICK_RATE) {
            config.tick_rate_hz = parse_value(ENV_TICK_RATE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FRAME_RATE) {
            config.frame_rate_hz = parse_value(ENV_FRAME_RATE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_CATCHUP) {
            config.max_ticks_per_frame = parse_value(ENV_MAX_CATCHUP, &raw)?;
        }
        if let Some(raw) = lookup(ENV_REGISTRY_CAPACITY) {
            config.initial_capacity = parse_value(ENV_REGISTRY_CAPACITY, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame driver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::MustBePositive("tick_rate_hz".into()));
        }
        if self.frame_rate_hz == 0 {
            return Err(ConfigError::MustBePositive("frame_rate_hz".into()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::MustBePositive("max_ticks_per_frame".into()));
        }
        for (key, value) in [
            ("tick_rate_hz", self.tick_rate_hz),
            ("frame_rate_hz", self.frame_rate_hz),
        ] {
            if value > MAX_RATE_HZ {
                return Err(ConfigError::TooHigh {
                    key: key.into(),
                    value,
                    max: MAX_RATE_HZ,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        super::limits::period_of(self.tick_rate_hz)
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        super::limits::period_of(self.frame_rate_hz)
    }
}

pub(crate) fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
