//! Fruit Catcher headless runner
//!
//! Drives a session at the nominal tick rate with a simple autoplay policy.
//! Rendering and real input devices live in the web front end.

#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

use fruit_catcher::consts::TICK_RATE_HZ;
use fruit_catcher::{Command, ItemCategory, Lane, PerkChoice, Session, Snapshot};

/// Two minutes of play
const DEMO_TICKS: u32 = 120 * TICK_RATE_HZ as u32;

/// Perks picked in rotation at each level-up
const PERK_ROTATION: [PerkChoice; 3] = [PerkChoice::Shield, PerkChoice::Luck, PerkChoice::Greed];

/// Chase the lowest non-bomb item; step out of the way of a bomb about to land
fn choose_lane(snapshot: &Snapshot) -> Lane {
    let lowest_good = snapshot
        .items
        .iter()
        .filter(|item| item.kind.category() != ItemCategory::Hazard)
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    let target = lowest_good.map(|item| item.lane).unwrap_or(snapshot.basket_lane);

    let bomb_incoming = |lane: Lane| {
        snapshot.items.iter().any(|item| {
            item.lane == lane && item.kind.category() == ItemCategory::Hazard && item.y > 140.0
        })
    };

    if !bomb_incoming(target) {
        return target;
    }
    Lane::ALL
        .into_iter()
        .find(|lane| !bomb_incoming(*lane))
        .unwrap_or(target)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    log::info!("Fruit Catcher (headless) starting with seed {}", seed);

    let mut session = Session::new(seed);
    session.on_score_change(|e| {
        log::info!(
            "{} {:+} -> score {} (level {})",
            e.kind.icon(),
            e.delta,
            e.score,
            e.level
        );
    });
    session.on_game_end(|e| {
        println!(
            "Game over! Final score: {} (level {})",
            e.final_score, e.final_level
        );
    });

    session.start();
    let mut perks_taken = 0usize;
    for _ in 0..DEMO_TICKS {
        if session.is_paused_for_upgrade() {
            let perk = PERK_ROTATION[perks_taken % PERK_ROTATION.len()];
            session.apply(Command::SelectPerk { perk });
            perks_taken += 1;
        }

        let lane = choose_lane(&session.snapshot());
        session.apply(Command::SetLane { lane });
        session.advance();
    }
    session.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web front end drives the session directly
}
