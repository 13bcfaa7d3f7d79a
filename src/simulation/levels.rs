use crate::data::DisputeLevel;
use crate::simulation::state::GameState;

/// A level opens once the level before it in table order has been completed.
/// The first level is always open; ids not in the table are never open.
pub fn is_level_unlocked(levels: &[DisputeLevel], state: &GameState, level_id: &str) -> bool {
    match levels.iter().position(|level| level.id == level_id) {
        Some(0) => true,
        Some(index) => state.is_level_completed(&levels[index - 1].id),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStatus {
    pub level: DisputeLevel,
    pub unlocked: bool,
    pub completed: bool,
}

pub fn level_statuses(levels: &[DisputeLevel], state: &GameState) -> Vec<LevelStatus> {
    levels
        .iter()
        .map(|level| LevelStatus {
            level: level.clone(),
            unlocked: is_level_unlocked(levels, state, &level.id),
            completed: state.is_level_completed(&level.id),
        })
        .collect()
}
