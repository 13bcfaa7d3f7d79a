//! Building lifecycle: which phase a building is in and when its story can
//! be read again. Everything here is derived from stored timestamps and the
//! time passed in by the caller; nothing mutates state.

use bevy_ecs::prelude::Resource;

use crate::config::GameConfig;
use crate::core::clock::{elapsed_since, Millis, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::data::Building;
use crate::simulation::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingPhase {
    Locked,
    UnderConstruction(ConstructionProgress),
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionProgress {
    Remaining(Millis),
    /// Duration elapsed; the owner must call `complete_building`.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryGate {
    Ready,
    Cooldown { remaining_ms: Millis },
}

impl StoryGate {
    pub fn is_ready(&self) -> bool {
        matches!(self, StoryGate::Ready)
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvaluator {
    pub construction_duration_ms: Millis,
    pub story_cooldown_ms: Millis,
}

impl Default for LifecycleEvaluator {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl LifecycleEvaluator {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            construction_duration_ms: config.construction_duration_ms,
            story_cooldown_ms: config.story_cooldown_ms,
        }
    }

    pub fn phase(&self, state: &GameState, building_id: &str, now: Millis) -> BuildingPhase {
        if state.is_story_unlocked(building_id) {
            return BuildingPhase::Unlocked;
        }
        match self.construction_progress(state, building_id, now) {
            Some(progress) => BuildingPhase::UnderConstruction(progress),
            None => BuildingPhase::Locked,
        }
    }

    pub fn construction_progress(
        &self,
        state: &GameState,
        building_id: &str,
        now: Millis,
    ) -> Option<ConstructionProgress> {
        let started = state.construction_started_at(building_id)?;
        let elapsed = elapsed_since(started, now);
        if elapsed >= self.construction_duration_ms {
            Some(ConstructionProgress::Complete)
        } else {
            Some(ConstructionProgress::Remaining(
                self.construction_duration_ms - elapsed,
            ))
        }
    }

    /// Buildings from `buildings` whose construction time has run out, in
    /// table order. Ids under construction that are not in the table are
    /// never reported.
    pub fn due_for_completion(
        &self,
        state: &GameState,
        buildings: &[Building],
        now: Millis,
    ) -> Vec<String> {
        buildings
            .iter()
            .filter(|building| {
                matches!(
                    self.construction_progress(state, &building.id, now),
                    Some(ConstructionProgress::Complete)
                )
            })
            .map(|building| building.id.clone())
            .collect()
    }

    pub fn story_gate(&self, state: &GameState, building_id: &str, now: Millis) -> StoryGate {
        let Some(last_view) = state.last_story_view(building_id) else {
            return StoryGate::Ready;
        };
        let since = elapsed_since(last_view, now);
        if since >= self.story_cooldown_ms {
            StoryGate::Ready
        } else {
            StoryGate::Cooldown {
                remaining_ms: self.story_cooldown_ms - since,
            }
        }
    }

    pub fn can_view_story(&self, state: &GameState, building_id: &str, now: Millis) -> bool {
        self.story_gate(state, building_id, now).is_ready()
    }

    /// Cooldown text for display, `None` when the story can be read now.
    pub fn time_until_next_view(
        &self,
        state: &GameState,
        building_id: &str,
        now: Millis,
    ) -> Option<String> {
        match self.story_gate(state, building_id, now) {
            StoryGate::Ready => None,
            StoryGate::Cooldown { remaining_ms } => Some(format_cooldown_remaining(remaining_ms)),
        }
    }
}

/// `m:ss`, truncating both fields.
pub fn format_construction_remaining(remaining_ms: Millis) -> String {
    let minutes = remaining_ms / MILLIS_PER_MINUTE;
    let seconds = (remaining_ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    format!("{}:{:02}", minutes, seconds)
}

/// `"{h}h {m}m"` with at least an hour left, otherwise `"{m}m"`. Whole hours
/// truncate; the minute remainder rounds up.
pub fn format_cooldown_remaining(remaining_ms: Millis) -> String {
    let hours = remaining_ms / MILLIS_PER_HOUR;
    let minutes = (remaining_ms % MILLIS_PER_HOUR).div_ceil(MILLIS_PER_MINUTE);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
