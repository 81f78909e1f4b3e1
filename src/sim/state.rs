//! Game state and core simulation types
//!
//! Everything the update step mutates lives here.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::consts::FIELD_WIDTH;

/// One of the three discrete columns items fall in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Parse a classifier label ("Left", "Center", "Right")
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Left" => Some(Lane::Left),
            "Center" => Some(Lane::Center),
            "Right" => Some(Lane::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Left => "Left",
            Lane::Center => "Center",
            Lane::Right => "Right",
        }
    }

    /// One lane to the left, saturating at the edge
    pub fn step_left(self) -> Self {
        match self {
            Lane::Right => Lane::Center,
            Lane::Center | Lane::Left => Lane::Left,
        }
    }

    /// One lane to the right, saturating at the edge
    pub fn step_right(self) -> Self {
        match self {
            Lane::Left => Lane::Center,
            Lane::Center | Lane::Right => Lane::Right,
        }
    }

    /// Logical x of the lane centre
    pub fn x(&self) -> f32 {
        let fraction = match self {
            Lane::Left => 0.2,
            Lane::Center => 0.5,
            Lane::Right => 0.8,
        };
        FIELD_WIDTH * fraction
    }
}

/// How a caught item affects the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Fixed positive value
    Fruit,
    /// Value rolled when caught
    RandomBox,
    /// Fixed negative value, absorbed by shields
    Hazard,
}

/// The spawn table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Apple,
    Banana,
    Melon,
    Orange,
    RandomBox,
    Bomb,
}

impl ItemKind {
    /// Fruits in spawn-table order (picked uniformly)
    pub const FRUITS: [ItemKind; 4] = [
        ItemKind::Apple,
        ItemKind::Banana,
        ItemKind::Melon,
        ItemKind::Orange,
    ];

    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Apple | ItemKind::Banana | ItemKind::Melon | ItemKind::Orange => {
                ItemCategory::Fruit
            }
            ItemKind::RandomBox => ItemCategory::RandomBox,
            ItemKind::Bomb => ItemCategory::Hazard,
        }
    }

    /// Printed point value (random boxes resolve at catch time)
    pub fn base_value(&self) -> i64 {
        match self {
            ItemKind::Apple => 100,
            ItemKind::Banana => 200,
            ItemKind::Melon => 300,
            ItemKind::Orange => 150,
            ItemKind::RandomBox => 0,
            ItemKind::Bomb => -500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Apple => "apple",
            ItemKind::Banana => "banana",
            ItemKind::Melon => "melon",
            ItemKind::Orange => "orange",
            ItemKind::RandomBox => "box",
            ItemKind::Bomb => "bomb",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ItemKind::Apple => "🍎",
            ItemKind::Banana => "🍌",
            ItemKind::Melon => "🍈",
            ItemKind::Orange => "🍊",
            ItemKind::RandomBox => "🎁",
            ItemKind::Bomb => "💣",
        }
    }
}

/// A falling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub lane: Lane,
    /// Distance below the spawn line (increasing downward)
    pub y: f32,
}

impl Item {
    pub fn base_value(&self) -> i64 {
        self.kind.base_value()
    }
}

/// Upgrade picked at a level-up pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkChoice {
    /// Absorbs one bomb per charge
    Shield,
    /// Fewer bombs
    Luck,
    /// Better random boxes
    Greed,
}

impl PerkChoice {
    /// Map the "press 1, 2 or 3" prompt onto a perk
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(PerkChoice::Shield),
            2 => Some(PerkChoice::Luck),
            3 => Some(PerkChoice::Greed),
            _ => None,
        }
    }
}

/// Accumulated perks for the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perks {
    /// Remaining shield charges
    pub shield: u32,
    pub luck: u32,
    pub greed: u32,
}

impl Perks {
    pub fn add(&mut self, choice: PerkChoice) {
        match choice {
            PerkChoice::Shield => self.shield += 1,
            PerkChoice::Luck => self.luck += 1,
            PerkChoice::Greed => self.greed += 1,
        }
    }
}

/// Complete mutable session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub level: u32,
    /// Ticks are processed only while active
    pub active: bool,
    /// Frozen waiting for a perk pick
    pub paused_for_upgrade: bool,
    pub basket_lane: Lane,
    /// Manual/level speed adjustment, kept within the configured bounds
    pub speed_offset: f32,
    pub spawn_interval_base_ms: f64,
    /// Simulated time of the last spawn (None = spawn on the next tick)
    pub last_spawn_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Live items, oldest first
    pub items: Vec<Item>,
    pub perks: Perks,
    /// Next item ID
    next_id: u32,
}

impl GameState {
    /// Fresh state as of `start()`
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            active: false,
            paused_for_upgrade: false,
            basket_lane: Lane::Center,
            speed_offset: 0.0,
            spawn_interval_base_ms: config.base_spawn_interval_ms,
            last_spawn_ms: None,
            time_ticks: 0,
            items: Vec::new(),
            perks: Perks::default(),
            next_id: 1,
        }
    }

    /// Allocate a new item ID
    pub fn next_item_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulated clock
    pub fn now_ms(&self, config: &EngineConfig) -> f64 {
        self.time_ticks as f64 * config.tick_ms
    }

    /// Points needed to leave the current level
    pub fn level_threshold(&self, config: &EngineConfig) -> u64 {
        u64::from(self.level) * config.level_points_step
    }

    /// Apply a signed score change with a floor of zero, returning the
    /// change actually applied
    pub fn apply_points(&mut self, points: i64) -> i64 {
        let before = self.score as i64;
        let after = before.saturating_add(points).max(0);
        self.score = after as u64;
        after - before
    }

    /// Add to the speed offset and clamp into the configured bounds
    pub fn adjust_speed(&mut self, delta: f32, config: &EngineConfig) {
        self.speed_offset = (self.speed_offset + delta)
            .max(config.speed_offset_min)
            .min(config.speed_offset_max);
    }

    /// Push a new item onto the spawn line
    pub fn spawn(&mut self, kind: ItemKind, lane: Lane, config: &EngineConfig) -> u32 {
        let id = self.next_item_id();
        self.items.push(Item {
            id,
            kind,
            lane,
            y: config.spawn_y,
        });
        id
    }
}
