//! Spawn table and the randomness seam
//!
//! Every random decision in the game goes through [`RandomSource`], so tests
//! can script exact outcomes and replays only need the seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{ItemKind, Lane, Perks};
use crate::consts::*;

/// Source of all randomness the engine consumes
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform index in [0, len). `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform integer in [min, max], inclusive on both ends
    fn next_in_range(&mut self, min: i64, max: i64) -> i64;
}

/// Default seeded source
#[derive(Debug, Clone)]
pub struct PcgSource {
    seed: u64,
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for PcgSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len.max(1))
    }

    fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Chance that a spawn is a bomb at the given luck level
pub fn hazard_chance(luck: u32) -> f64 {
    (HAZARD_CHANCE_BASE - f64::from(luck) * HAZARD_CHANCE_PER_LUCK).max(HAZARD_CHANCE_MIN)
}

/// Pick the kind of the next item
pub fn roll_kind(rng: &mut impl RandomSource, perks: &Perks) -> ItemKind {
    let hazard = hazard_chance(perks.luck);
    let roll = rng.next_unit();

    if roll < hazard {
        ItemKind::Bomb
    } else if roll < hazard + RANDOM_BOX_CHANCE {
        ItemKind::RandomBox
    } else {
        ItemKind::FRUITS[rng.next_index(ItemKind::FRUITS.len())]
    }
}

/// Pick the lane of the next item, independent of its kind
pub fn roll_lane(rng: &mut impl RandomSource) -> Lane {
    Lane::ALL[rng.next_index(Lane::ALL.len())]
}

/// Inclusive payout range of a random box at the given greed level
pub fn random_box_range(greed: u32) -> (i64, i64) {
    let bonus = i64::from(greed) * GREED_BONUS_PER_LEVEL;
    (RANDOM_BOX_MIN + bonus, RANDOM_BOX_MAX + 2 * bonus)
}

/// Roll the payout of a caught random box
pub fn roll_random_box(rng: &mut impl RandomSource, perks: &Perks) -> i64 {
    let (min, max) = random_box_range(perks.greed);
    rng.next_in_range(min, max)
}

/// Scripted source for tests: replays queued values, then falls back to a
/// fixed default
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub units: std::collections::VecDeque<f64>,
    pub indices: std::collections::VecDeque<usize>,
    pub ranged: std::collections::VecDeque<i64>,
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.99)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len.max(1)
    }

    fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        self.ranged.pop_front().unwrap_or(min).clamp(min, max)
    }
}
