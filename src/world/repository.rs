use crate::config::GameConfig;
use crate::simulation::state::GameState;

/// Durable home for town progress.
pub trait TownRepository {
    fn load_or_init(&mut self, config: &GameConfig)
        -> Result<GameState, Box<dyn std::error::Error>>;
    fn save_state(&mut self, state: &GameState) -> Result<(), Box<dyn std::error::Error>>;
}
