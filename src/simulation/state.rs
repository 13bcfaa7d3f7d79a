use std::collections::HashMap;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::core::clock::Millis;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub stone: i64,
    pub wood: i64,
}

impl Resources {
    pub const fn new(stone: i64, wood: i64) -> Self {
        Self { stone, wood }
    }

    pub fn covers(&self, cost: &Resources) -> bool {
        self.stone >= cost.stone && self.wood >= cost.wood
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Resources) -> Resources {
        Resources {
            stone: self.stone.saturating_add(rhs.stone),
            wood: self.wood.saturating_add(rhs.wood),
        }
    }
}

/// Player progress for one session.
///
/// A building id sits in `unlocked_stories` once built (or granted at start)
/// and in `building_start_times` while its construction runs. The two never
/// overlap because `Transition::CompleteBuilding` moves an id across in a
/// single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub resources: Resources,
    /// Append-only; may contain duplicates. Only membership matters.
    pub unlocked_stories: Vec<String>,
    /// Append-only; may contain duplicates.
    pub completed_levels: Vec<String>,
    #[serde(default)]
    pub current_level: Option<String>,
    #[serde(default)]
    pub story_view_times: HashMap<String, Millis>,
    #[serde(default)]
    pub building_start_times: HashMap<String, Millis>,
}

impl GameState {
    pub fn initial(config: &GameConfig) -> Self {
        Self {
            resources: config.initial_resources,
            unlocked_stories: config.starter_buildings.clone(),
            completed_levels: Vec::new(),
            current_level: None,
            story_view_times: HashMap::new(),
            building_start_times: HashMap::new(),
        }
    }

    pub fn is_story_unlocked(&self, id: &str) -> bool {
        self.unlocked_stories.iter().any(|story| story == id)
    }

    pub fn is_level_completed(&self, id: &str) -> bool {
        self.completed_levels.iter().any(|level| level == id)
    }

    pub fn is_under_construction(&self, id: &str) -> bool {
        self.building_start_times.contains_key(id)
    }

    pub fn construction_started_at(&self, id: &str) -> Option<Millis> {
        self.building_start_times.get(id).copied()
    }

    pub fn last_story_view(&self, id: &str) -> Option<Millis> {
        self.story_view_times.get(id).copied()
    }

    /// Produce the next snapshot. Never fails and never mutates `self`.
    pub fn apply(&self, transition: &Transition) -> GameState {
        let mut next = self.clone();
        match transition {
            Transition::AddResources { stone, wood } => {
                next.resources = next.resources + Resources::new(*stone, *wood);
            }
            Transition::UnlockStory { id } => {
                next.unlocked_stories.push(id.clone());
            }
            Transition::CompleteLevel { id } => {
                next.completed_levels.push(id.clone());
            }
            Transition::SetCurrentLevel { id } => {
                next.current_level = id.clone();
            }
            Transition::RecordStoryView { building_id, at } => {
                next.story_view_times.insert(building_id.clone(), *at);
            }
            Transition::StartBuilding { building_id, at } => {
                next.building_start_times.insert(building_id.clone(), *at);
            }
            Transition::CompleteBuilding { building_id } => {
                next.unlocked_stories.push(building_id.clone());
                next.building_start_times.remove(building_id);
            }
        }
        next
    }
}

/// Named state transitions. Timestamps are stamped by the store before the
/// transition is applied, which keeps `GameState::apply` clock-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    AddResources { stone: i64, wood: i64 },
    UnlockStory { id: String },
    CompleteLevel { id: String },
    SetCurrentLevel { id: Option<String> },
    RecordStoryView { building_id: String, at: Millis },
    StartBuilding { building_id: String, at: Millis },
    CompleteBuilding { building_id: String },
}

impl Transition {
    pub fn label(&self) -> &'static str {
        match self {
            Transition::AddResources { .. } => "add_resources",
            Transition::UnlockStory { .. } => "unlock_story",
            Transition::CompleteLevel { .. } => "complete_level",
            Transition::SetCurrentLevel { .. } => "set_current_level",
            Transition::RecordStoryView { .. } => "record_story_view",
            Transition::StartBuilding { .. } => "start_building",
            Transition::CompleteBuilding { .. } => "complete_building",
        }
    }
}
