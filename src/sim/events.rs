//! Notifications the engine emits to its front end

use serde::{Deserialize, Serialize};

use super::state::{GameState, ItemKind, Lane, Perks};

/// Fired after every resolved catch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChange {
    pub score: u64,
    pub level: u32,
    /// Contribution of the catch before the zero floor (0 for a shielded bomb)
    pub delta: i64,
    /// Change actually applied to the score
    pub applied: i64,
    pub kind: ItemKind,
}

/// Read-only view of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub kind: ItemKind,
    pub lane: Lane,
    /// Lane centre, for renderers
    pub x: f32,
    pub y: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<ItemView>,
    pub basket_lane: Lane,
    pub score: u64,
    pub level: u32,
    pub paused_for_upgrade: bool,
    pub perks: Perks,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            items: state
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id,
                    kind: item.kind,
                    lane: item.lane,
                    x: item.lane.x(),
                    y: item.y,
                })
                .collect(),
            basket_lane: state.basket_lane,
            score: state.score,
            level: state.level,
            paused_for_upgrade: state.paused_for_upgrade,
            perks: state.perks,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fired once when an active session stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnd {
    pub final_score: u64,
    pub final_level: u32,
}

pub type ScoreHandler = Box<dyn FnMut(&ScoreChange) + Send>;
pub type SnapshotHandler = Box<dyn FnMut(&Snapshot) + Send>;
pub type GameEndHandler = Box<dyn FnMut(&GameEnd) + Send>;

/// At most one handler per notification kind
#[derive(Default)]
pub struct Observers {
    pub on_score_change: Option<ScoreHandler>,
    pub on_snapshot: Option<SnapshotHandler>,
    pub on_game_end: Option<GameEndHandler>,
}

impl Observers {
    pub fn score_changed(&mut self, event: &ScoreChange) {
        if let Some(handler) = self.on_score_change.as_mut() {
            handler(event);
        }
    }

    /// Snapshots are only built when someone listens
    pub fn wants_snapshot(&self) -> bool {
        self.on_snapshot.is_some()
    }

    pub fn snapshot(&mut self, snapshot: &Snapshot) {
        if let Some(handler) = self.on_snapshot.as_mut() {
            handler(snapshot);
        }
    }

    pub fn game_ended(&mut self, event: &GameEnd) {
        if let Some(handler) = self.on_game_end.as_mut() {
            handler(event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("on_score_change", &self.on_score_change.is_some())
            .field("on_snapshot", &self.on_snapshot.is_some())
            .field("on_game_end", &self.on_game_end.is_some())
            .finish()
    }
}
