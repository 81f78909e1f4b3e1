//! Engine tuning
//!
//! Defaults come from [`crate::consts`]. A front end can ship its own balance
//! as JSON; missing fields fall back to the defaults.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a config is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be decoded
    Parse(String),
    /// A field holds an unusable value
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulated milliseconds per tick
    pub tick_ms: f64,
    pub base_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    /// Spawn interval reduction per unit of speed offset
    pub spawn_interval_per_speed_ms: f64,
    pub spawn_y: f32,
    pub catch_band_top: f32,
    pub catch_band_bottom: f32,
    pub removal_y: f32,
    pub fall_speed_base: f32,
    pub fall_speed_per_level: f32,
    pub speed_offset_min: f32,
    pub speed_offset_max: f32,
    /// Speed offset gained on each level-up
    pub perk_speed_step: f32,
    /// Level N ends at N * level_points_step points
    pub level_points_step: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_per_speed_ms: SPAWN_INTERVAL_PER_SPEED_MS,
            spawn_y: SPAWN_Y,
            catch_band_top: CATCH_BAND_TOP,
            catch_band_bottom: CATCH_BAND_BOTTOM,
            removal_y: REMOVAL_Y,
            fall_speed_base: FALL_SPEED_BASE,
            fall_speed_per_level: FALL_SPEED_PER_LEVEL,
            speed_offset_min: SPEED_OFFSET_MIN,
            speed_offset_max: SPEED_OFFSET_MAX,
            perk_speed_step: PERK_SPEED_STEP,
            level_points_step: LEVEL_POINTS_STEP,
        }
    }
}

impl EngineConfig {
    /// Decode and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded engine config (tick {:.2} ms)", config.tick_ms);
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_f64 = [
            ("tick_ms", self.tick_ms),
            ("base_spawn_interval_ms", self.base_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("spawn_interval_per_speed_ms", self.spawn_interval_per_speed_ms),
        ];
        let finite_f32 = [
            ("spawn_y", self.spawn_y),
            ("catch_band_top", self.catch_band_top),
            ("catch_band_bottom", self.catch_band_bottom),
            ("removal_y", self.removal_y),
            ("fall_speed_base", self.fall_speed_base),
            ("fall_speed_per_level", self.fall_speed_per_level),
            ("speed_offset_min", self.speed_offset_min),
            ("speed_offset_max", self.speed_offset_max),
            ("perk_speed_step", self.perk_speed_step),
        ];
        for (field, value) in finite_f64 {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        for (field, value) in finite_f32 {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }

        if self.tick_ms <= 0.0 {
            return Err(invalid("tick_ms", "must be positive"));
        }
        if self.min_spawn_interval_ms <= 0.0 {
            return Err(invalid("min_spawn_interval_ms", "must be positive"));
        }
        if self.base_spawn_interval_ms < self.min_spawn_interval_ms {
            return Err(invalid(
                "base_spawn_interval_ms",
                "must not be below min_spawn_interval_ms",
            ));
        }
        if self.speed_offset_min > self.speed_offset_max {
            return Err(invalid("speed_offset_min", "must not exceed speed_offset_max"));
        }
        // Items must always move downward
        if self.fall_speed_base + self.fall_speed_per_level + self.speed_offset_min <= 0.0 {
            return Err(invalid(
                "speed_offset_min",
                "slowest fall speed must stay positive",
            ));
        }
        if self.catch_band_top >= self.catch_band_bottom {
            return Err(invalid("catch_band_top", "must be above catch_band_bottom"));
        }
        if self.removal_y < self.catch_band_bottom {
            return Err(invalid("removal_y", "must be at or below the catch band"));
        }
        if self.spawn_y >= self.catch_band_top {
            return Err(invalid("spawn_y", "must be above the catch band"));
        }
        if self.level_points_step == 0 {
            return Err(invalid("level_points_step", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
