use bevy_ecs::prelude::*;

use crate::core::clock::Millis;
use crate::simulation::state::Resources;

/// Time for the current schedule step.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Now(pub Millis);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ConstructionStarted { building_id: String },
    ConstructionFinished { building_id: String },
    StoryViewed { building_id: String },
    DisputeAdvanced { level_id: String, index: usize },
    CountdownExpired { level_id: String, index: usize },
    LevelCompleted { level_id: String, reward: Resources },
}

/// Events raised during a step, drained by the `Game` afterwards.
#[derive(Resource, Debug, Default)]
pub struct GameEventLog(pub Vec<GameEvent>);

impl GameEventLog {
    pub fn push(&mut self, event: GameEvent) {
        self.0.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.0)
    }
}
