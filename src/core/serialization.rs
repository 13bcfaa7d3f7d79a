use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::clock::Millis;
use crate::simulation::state::GameState;

const SAVE_VERSION: u32 = 1;

/// Portable snapshot of a session's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default = "default_save_version")]
    pub version: u32,
    pub saved_at_ms: Millis,
    pub state: GameState,
}

fn default_save_version() -> u32 {
    SAVE_VERSION
}

impl SaveState {
    pub fn new(state: GameState, saved_at_ms: Millis) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at_ms,
            state,
        }
    }
}

/// Pretty-printed JSON for a save.
pub fn save_state_to_json(state: &SaveState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

/// Parse a save written by `save_state_to_json`.
pub fn load_state_from_json(data: &str) -> serde_json::Result<SaveState> {
    serde_json::from_str(data)
}

/// Write a save as JSON to `path`, replacing any existing file.
pub fn save_state_to_path<P: AsRef<Path>>(state: &SaveState, path: P) -> io::Result<()> {
    let json = save_state_to_json(state).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

/// Read a JSON save. Parse failures surface as `InvalidData`.
pub fn load_state_from_path<P: AsRef<Path>>(path: P) -> io::Result<SaveState> {
    let data = fs::read_to_string(&path)?;
    load_state_from_json(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
