//! Loop configuration, loadable from TOML

use looping_core::{LoopError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the catch-up phase drains the lag accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrainPolicy {
    /// Subtract one step interval per catch-up step.
    #[default]
    FixedStep,
    /// Subtract the measured wall-clock cost of each catch-up step.
    ///
    /// The accumulator only drains as fast as listeners consume real time,
    /// so fast listeners can leave it above one step for many iterations.
    /// `max_catch_up_steps` bounds that.
    UpdateCost,
}

/// Configuration for a fixed-step loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Simulation steps per second.
    pub fps: f64,
    /// Catch-up drain strategy.
    pub drain: DrainPolicy,
    /// Upper bound on elapsed time accepted by a single tick, in milliseconds.
    pub max_frame_ms: f64,
    /// Upper bound on catch-up iterations per tick. 0 = unlimited, which is
    /// only accepted with `DrainPolicy::FixedStep`.
    pub max_catch_up_steps: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            drain: DrainPolicy::FixedStep,
            max_frame_ms: 250.0,
            max_catch_up_steps: 240,
        }
    }
}

impl LoopConfig {
    /// Set the simulation rate.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Set the catch-up drain strategy.
    pub fn with_drain(mut self, drain: DrainPolicy) -> Self {
        self.drain = drain;
        self
    }

    /// Set the per-tick elapsed clamp.
    pub fn with_max_frame_ms(mut self, ms: f64) -> Self {
        self.max_frame_ms = ms;
        self
    }

    /// Set the catch-up iteration bound (0 = unlimited).
    pub fn with_max_catch_up_steps(mut self, steps: u32) -> Self {
        self.max_catch_up_steps = steps;
        self
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LoopConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded loop config from {:?}", path);
        Ok(config)
    }

    /// Render the config as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_fps(self.fps) {
            return Err(LoopError::InvalidFps(self.fps));
        }
        if !(self.max_frame_ms.is_finite() && self.max_frame_ms > 0.0) {
            return Err(LoopError::InvalidConfig(format!(
                "max_frame_ms must be positive and finite, got {}",
                self.max_frame_ms
            )));
        }
        // Cost-based draining never drains under a frozen clock
        if self.drain == DrainPolicy::UpdateCost && self.max_catch_up_steps == 0 {
            return Err(LoopError::InvalidConfig(
                "max_catch_up_steps must be at least 1 with drain = \"update-cost\"".to_string(),
            ));
        }
        Ok(())
    }
}

/// A usable simulation rate is positive and finite.
pub(crate) fn is_valid_fps(fps: f64) -> bool {
    fps.is_finite() && fps > 0.0
}
