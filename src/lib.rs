//! Fruit Catcher - a three-lane catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, catches, scoring)
//! - `session`: Lifecycle, input entry points and observer wiring
//! - `config`: Data-driven engine tuning

pub mod config;
pub mod session;
pub mod sim;

pub use config::{ConfigError, EngineConfig};
pub use session::{Command, Session};
pub use sim::{
    GameEnd, GameState, Item, ItemCategory, ItemKind, ItemView, Lane, PerkChoice, Perks,
    RandomSource, ScoreChange, Snapshot,
};

/// Game configuration constants
pub mod consts {
    /// Scheduler cadence (ticks per second)
    pub const TICK_RATE_HZ: f64 = 60.0;
    /// Simulated milliseconds per tick
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE_HZ;

    /// Logical field size (renderers scale this up)
    pub const FIELD_WIDTH: f32 = 200.0;
    pub const FIELD_HEIGHT: f32 = 200.0;

    /// Items appear on this line and fall downward
    pub const SPAWN_Y: f32 = 0.0;
    /// Catch band is the open interval (CATCH_BAND_TOP, CATCH_BAND_BOTTOM)
    pub const CATCH_BAND_TOP: f32 = 170.0;
    pub const CATCH_BAND_BOTTOM: f32 = FIELD_HEIGHT;
    /// Items past this line are dropped without effect
    pub const REMOVAL_Y: f32 = 220.0;

    /// Spawn interval at speed offset 0 (ms)
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Spawn interval never drops below this (ms)
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;
    /// Spawn interval shrinks by this much per unit of speed offset (ms)
    pub const SPAWN_INTERVAL_PER_SPEED_MS: f64 = 200.0;

    /// Fall speed = FALL_SPEED_BASE + level * FALL_SPEED_PER_LEVEL + speed offset
    pub const FALL_SPEED_BASE: f32 = 1.0;
    pub const FALL_SPEED_PER_LEVEL: f32 = 0.5;

    /// Manual speed offset bounds
    pub const SPEED_OFFSET_MIN: f32 = -1.0;
    pub const SPEED_OFFSET_MAX: f32 = 10.0;
    /// Speed offset added on every level-up
    pub const PERK_SPEED_STEP: f32 = 0.5;

    /// Points needed to leave a level, multiplied by the level number
    pub const LEVEL_POINTS_STEP: u64 = 3000;

    /// Hazard spawn chance at luck 0
    pub const HAZARD_CHANCE_BASE: f64 = 0.15;
    /// Hazard chance removed per luck level
    pub const HAZARD_CHANCE_PER_LUCK: f64 = 0.03;
    /// Hazard chance floor
    pub const HAZARD_CHANCE_MIN: f64 = 0.05;
    /// Random box spawn chance (stacked on top of the hazard chance)
    pub const RANDOM_BOX_CHANCE: f64 = 0.15;

    /// Random box payout range at greed 0 (inclusive)
    pub const RANDOM_BOX_MIN: i64 = -200;
    pub const RANDOM_BOX_MAX: i64 = 600;
    /// Greed bonus per level (added to the min, doubled on the max)
    pub const GREED_BONUS_PER_LEVEL: i64 = 100;
}
