//! Fixed timestep simulation tick
//!
//! One call spawns, moves and resolves everything for a single scheduler tick.

use super::events::ScoreChange;
use super::spawn::{RandomSource, roll_kind, roll_lane, roll_random_box};
use super::state::{GameState, Item, ItemCategory};
use crate::config::EngineConfig;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the tick was skipped (inactive or waiting for a perk)
    pub ran: bool,
    /// ID of the item spawned this tick
    pub spawned: Option<u32>,
    /// Catches in resolution order
    pub catches: Vec<ScoreChange>,
    /// Items that fell past the removal line
    pub missed: u32,
    /// This tick's catches crossed the level threshold
    pub level_up: bool,
}

/// Spawn interval after applying the speed offset
pub fn effective_spawn_interval_ms(state: &GameState, config: &EngineConfig) -> f64 {
    let reduction = f64::from(state.speed_offset) * config.spawn_interval_per_speed_ms;
    (state.spawn_interval_base_ms - reduction).max(config.min_spawn_interval_ms)
}

/// Distance every item falls per tick
pub fn fall_speed(state: &GameState, config: &EngineConfig) -> f32 {
    config.fall_speed_base + state.level as f32 * config.fall_speed_per_level + state.speed_offset
}

fn in_catch_band(y: f32, config: &EngineConfig) -> bool {
    y > config.catch_band_top && y < config.catch_band_bottom
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    config: &EngineConfig,
    rng: &mut impl RandomSource,
) -> TickReport {
    let mut report = TickReport::default();

    // Frozen until started, and while a perk is pending
    if !state.active || state.paused_for_upgrade {
        return report;
    }
    report.ran = true;

    state.time_ticks += 1;
    let now = state.now_ms(config);

    // 1. Spawn
    let interval = effective_spawn_interval_ms(state, config);
    let due = match state.last_spawn_ms {
        None => true,
        Some(last) => now - last > interval,
    };
    log::trace!("tick {}: spawn interval {:.0} ms, due={}", state.time_ticks, interval, due);
    if due {
        let kind = roll_kind(rng, &state.perks);
        let lane = roll_lane(rng);
        let id = state.spawn(kind, lane, config);
        state.last_spawn_ms = Some(now);
        report.spawned = Some(id);
        log::debug!("Spawned {} #{} in {} lane", kind.name(), id, lane.as_str());
    }

    // 2. Move and resolve, newest first
    let speed = fall_speed(state, config);
    let mut i = state.items.len();
    while i > 0 {
        i -= 1;
        state.items[i].y += speed;
        let y = state.items[i].y;

        if in_catch_band(y, config) && state.items[i].lane == state.basket_lane {
            let item = state.items.remove(i);
            let event = resolve_catch(state, config, rng, &item);
            report.catches.push(event);

            if state.paused_for_upgrade {
                // Level-up freezes the field immediately
                report.level_up = true;
                break;
            }
            continue;
        }

        if y > config.removal_y {
            state.items.remove(i);
            report.missed += 1;
        }
    }

    report
}

/// Apply a caught item to score, perks and level progression
pub fn resolve_catch(
    state: &mut GameState,
    config: &EngineConfig,
    rng: &mut impl RandomSource,
    item: &Item,
) -> ScoreChange {
    let delta = match item.kind.category() {
        ItemCategory::Hazard if state.perks.shield > 0 => {
            state.perks.shield -= 1;
            log::info!("Shield absorbed a {} ({} left)", item.kind.name(), state.perks.shield);
            0
        }
        ItemCategory::Hazard | ItemCategory::Fruit => item.base_value(),
        ItemCategory::RandomBox => roll_random_box(rng, &state.perks),
    };
    let applied = state.apply_points(delta);

    log::debug!(
        "Caught {} #{}: {:+} (applied {:+}), score {}",
        item.kind.name(),
        item.id,
        delta,
        applied,
        state.score
    );

    if !state.paused_for_upgrade && state.score >= state.level_threshold(config) {
        state.paused_for_upgrade = true;
        log::info!(
            "Level {} cleared at {} points, waiting for perk",
            state.level,
            state.score
        );
    }

    ScoreChange {
        score: state.score,
        level: state.level,
        delta,
        applied,
        kind: item.kind,
    }
}
