//! Mover Configuration
//!
//! Per-entity movement settings, loadable from JSON. Durations are written
//! in seconds on disk and converted to fixed-point once at load time.

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::core::fixed::{Fixed, DEFAULT_MOVE_TIME};
use crate::movement::layer::{Layer, LayerMask};

/// What to do with a step requested while a transition is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Refuse the step and report `MoveOutcome::Busy`.
    #[default]
    Ignore,
    /// Finish the running transition instantly, then try the new step
    /// from the tile it was heading to.
    Restart,
    /// Start another transition from the current mid-cell position. The
    /// newest one drives the position; older ones resume after it lands.
    Concurrent,
}

/// Configuration for a single mover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    /// Time to cross one cell (Fixed seconds). Must be positive.
    #[serde(rename = "move_time_secs", with = "seconds")]
    pub move_time: Fixed,
    /// Layers that stop a step.
    pub blocking_layers: LayerMask,
    /// Handling of steps issued mid-transition.
    pub overlap: OverlapPolicy,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            move_time: DEFAULT_MOVE_TIME,
            blocking_layers: LayerMask::of(Layer::BLOCKING),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl MoverConfig {
    /// Config with the given cell crossing time and default everything else.
    pub fn with_move_time(move_time: Fixed) -> Self {
        Self {
            move_time,
            ..Self::default()
        }
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_time <= 0 {
            return Err(ConfigError::NonPositiveMoveTime(self.move_time));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Move time must be greater than zero.
    #[error("Move time must be positive, got {0} (raw Q16.16)")]
    NonPositiveMoveTime(Fixed),

    /// Malformed JSON.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Seconds on disk, Q16.16 in memory.
mod seconds {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::fixed::{to_fixed, Fixed, FIXED_ONE};

    pub fn serialize<S: Serializer>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error> {
        // f64 holds every Q16.16 value exactly
        serializer.serialize_f64(*value as f64 / FIXED_ONE as f64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Fixed, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs.abs() > i16::MAX as f64 {
            return Err(serde::de::Error::custom(format!("move time {secs} out of range")));
        }
        let raw = to_fixed(secs);
        // Positive durations below one raw unit still count as positive
        if secs > 0.0 {
            Ok(raw.max(1))
        } else {
            Ok(raw)
        }
    }
}
