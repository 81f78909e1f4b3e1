//! Session engine
//!
//! `Session` owns the game state, the randomness source and the registered
//! observers. A host drives it by calling [`Session::advance`] at a fixed
//! cadence and forwarding input between ticks. Invalid inputs (wrong phase,
//! non-finite values) are ignored rather than reported.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::sim::{
    GameEnd, GameState, ItemKind, Lane, Observers, PcgSource, PerkChoice, RandomSource,
    ScoreChange, Snapshot, TickReport, tick,
};

/// Input commands a front end can forward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Jump straight to a lane (pose classifier output)
    SetLane { lane: Lane },
    /// Move one lane left (arrow key)
    StepLeft,
    /// Move one lane right (arrow key)
    StepRight,
    /// Nudge the fall speed
    AdjustSpeed { delta: f32 },
    /// Pick a perk at a level-up pause
    SelectPerk { perk: PerkChoice },
}

/// One game session
pub struct Session<R: RandomSource = PcgSource> {
    config: EngineConfig,
    state: GameState,
    rng: R,
    observers: Observers,
}

impl Session<PcgSource> {
    /// Session with default tuning and a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_config(EngineConfig::default(), PcgSource::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Session with custom tuning. An invalid config is replaced by the
    /// defaults.
    pub fn with_config(config: EngineConfig, rng: R) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}; using default engine config");
                EngineConfig::default()
            }
        };
        let state = GameState::new(&config);
        Self {
            config,
            state,
            rng,
            observers: Observers::default(),
        }
    }

    // --- Observers ---

    /// Replace the score-change handler
    pub fn on_score_change(&mut self, handler: impl FnMut(&ScoreChange) + Send + 'static) {
        self.observers.on_score_change = Some(Box::new(handler));
    }

    /// Replace the per-tick snapshot handler
    pub fn on_snapshot(&mut self, handler: impl FnMut(&Snapshot) + Send + 'static) {
        self.observers.on_snapshot = Some(Box::new(handler));
    }

    /// Replace the game-end handler
    pub fn on_game_end(&mut self, handler: impl FnMut(&GameEnd) + Send + 'static) {
        self.observers.on_game_end = Some(Box::new(handler));
    }

    // --- Lifecycle ---

    /// Reset everything and begin accepting ticks
    pub fn start(&mut self) {
        self.state = GameState::new(&self.config);
        self.state.active = true;
        log::info!("Session started");
    }

    /// End the run. Only the first stop of an active session notifies.
    pub fn stop(&mut self) {
        if !self.state.active {
            log::debug!("stop() ignored: session not active");
            return;
        }
        self.state.active = false;

        let end = GameEnd {
            final_score: self.state.score,
            final_level: self.state.level,
        };
        log::info!(
            "Session ended: score {} at level {}",
            end.final_score,
            end.final_level
        );
        self.observers.game_ended(&end);
    }

    // --- Tick ---

    /// Run one scheduler tick and notify observers
    pub fn advance(&mut self) -> TickReport {
        let report = tick(&mut self.state, &self.config, &mut self.rng);
        if !report.ran {
            return report;
        }

        for event in &report.catches {
            self.observers.score_changed(event);
        }
        if self.observers.wants_snapshot() {
            let snapshot = Snapshot::capture(&self.state);
            self.observers.snapshot(&snapshot);
        }
        report
    }

    // --- Input ---

    /// Move the basket. Ignored while inactive or waiting for a perk.
    pub fn set_basket_lane(&mut self, lane: Lane) {
        if !self.accepts_movement() {
            log::debug!("Lane change to {} ignored", lane.as_str());
            return;
        }
        self.state.basket_lane = lane;
    }

    /// Shift the fall speed, clamped to the configured bounds. Allowed in
    /// any phase, including the perk pause.
    pub fn adjust_speed(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::debug!("Speed adjustment {} ignored", delta);
            return;
        }
        self.state.adjust_speed(delta, &self.config);
    }

    /// Take a perk and resume play. Only valid during a level-up pause.
    pub fn select_perk(&mut self, choice: PerkChoice) {
        if !self.state.active || !self.state.paused_for_upgrade {
            log::debug!("Perk {:?} ignored: no level-up pending", choice);
            return;
        }

        self.state.perks.add(choice);
        self.state.level += 1;
        let step = self.config.perk_speed_step;
        self.state.adjust_speed(step, &self.config);
        self.state.paused_for_upgrade = false;

        log::info!(
            "Picked {:?}: level {}, speed offset {:.1}, perks {:?}",
            choice,
            self.state.level,
            self.state.speed_offset,
            self.state.perks
        );
    }

    /// Dispatch a front-end command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetLane { lane } => self.set_basket_lane(lane),
            Command::StepLeft => self.set_basket_lane(self.state.basket_lane.step_left()),
            Command::StepRight => self.set_basket_lane(self.state.basket_lane.step_right()),
            Command::AdjustSpeed { delta } => self.adjust_speed(delta),
            Command::SelectPerk { perk } => self.select_perk(perk),
        }
    }

    /// Put a specific item on the spawn line (scripted scenarios)
    pub fn spawn_item(&mut self, kind: ItemKind, lane: Lane) -> u32 {
        self.state.spawn(kind, lane, &self.config)
    }

    // --- Queries ---

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted setups and tests
    #[cfg(any(test, feature = "test-support"))]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn is_paused_for_upgrade(&self) -> bool {
        self.state.paused_for_upgrade
    }

    fn accepts_movement(&self) -> bool {
        self.state.active && !self.state.paused_for_upgrade
    }
}

impl<R: RandomSource> std::fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("observers", &self.observers)
            .finish()
    }
}
