//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (simulated clock, no wall time)
//! - All randomness through `RandomSource`
//! - Stable iteration order (newest item first)
//! - No rendering or platform dependencies

pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;

pub use events::{GameEnd, ItemView, Observers, ScoreChange, Snapshot};
pub use spawn::{
    PcgSource, RandomSource, hazard_chance, random_box_range, roll_kind, roll_lane,
    roll_random_box,
};
pub use state::{GameState, Item, ItemCategory, ItemKind, Lane, PerkChoice, Perks};
pub use tick::{TickReport, effective_spawn_interval_ms, fall_speed, resolve_catch, tick};
