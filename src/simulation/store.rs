use std::sync::Arc;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::debug;

use crate::core::clock::{Clock, Millis};
use crate::simulation::state::{GameState, Transition};

/// Single writer for `GameState`.
///
/// Each mutator builds a `Transition`, applies it to the current snapshot and
/// swaps the result in whole. `revision` counts swaps so callers can tell
/// whether anything changed between two reads.
#[derive(Resource)]
pub struct GameStore {
    state: GameState,
    clock: Arc<dyn Clock>,
    revision: u64,
}

impl GameStore {
    pub fn new(state: GameState, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            clock,
            revision: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    /// Replace the whole snapshot, e.g. after loading a save.
    pub fn replace(&mut self, state: GameState) {
        self.state = state;
        self.revision += 1;
    }

    pub fn add_resources(&mut self, stone: i64, wood: i64) {
        self.commit(Transition::AddResources { stone, wood });
    }

    pub fn unlock_story(&mut self, id: &str) {
        self.commit(Transition::UnlockStory { id: id.to_string() });
    }

    pub fn complete_level(&mut self, id: &str) {
        self.commit(Transition::CompleteLevel { id: id.to_string() });
    }

    pub fn set_current_level(&mut self, id: Option<&str>) {
        self.commit(Transition::SetCurrentLevel {
            id: id.map(str::to_string),
        });
    }

    pub fn record_story_view(&mut self, building_id: &str) {
        let at = self.now();
        self.commit(Transition::RecordStoryView {
            building_id: building_id.to_string(),
            at,
        });
    }

    pub fn start_building(&mut self, building_id: &str) {
        let at = self.now();
        self.commit(Transition::StartBuilding {
            building_id: building_id.to_string(),
            at,
        });
    }

    pub fn complete_building(&mut self, building_id: &str) {
        self.commit(Transition::CompleteBuilding {
            building_id: building_id.to_string(),
        });
    }

    fn commit(&mut self, transition: Transition) {
        let next = self.state.apply(&transition);
        self.state = next;
        self.revision += 1;
        debug!(
            transition = transition.label(),
            revision = self.revision,
            "game state updated"
        );
    }
}
