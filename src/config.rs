//! Tunables for the town and the dispute flow.
//!
//! Every field has a default matching the shipped game, so a config file only
//! needs to list the values it overrides.

use std::fs;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::clock::{Millis, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::simulation::state::Resources;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub initial_resources: Resources,
    pub starter_buildings: Vec<String>,
    pub construction_duration_ms: Millis,
    pub story_cooldown_ms: Millis,
    pub tick_interval_ms: Millis,
    pub dispute: DisputeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_resources: Resources::new(32, 19),
            starter_buildings: vec!["settlers-house".to_string()],
            construction_duration_ms: 30 * MILLIS_PER_MINUTE,
            story_cooldown_ms: 24 * MILLIS_PER_HOUR,
            tick_interval_ms: MILLIS_PER_SECOND,
            dispute: DisputeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeConfig {
    pub seconds_per_dispute: u32,
    pub advance_delay_ms: Millis,
    pub reward: Resources,
}

impl Default for DisputeConfig {
    fn default() -> Self {
        Self {
            seconds_per_dispute: 60,
            advance_delay_ms: 1_500,
            reward: Resources::new(4, 6),
        }
    }
}

#[derive(Debug, Error)]
pub enum GameConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GameConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, GameConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| GameConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), GameConfigError> {
        if self.construction_duration_ms == 0 {
            return Err(GameConfigError::Invalid(
                "construction_duration_ms must be positive".to_string(),
            ));
        }
        if self.story_cooldown_ms == 0 {
            return Err(GameConfigError::Invalid(
                "story_cooldown_ms must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameConfigError::Invalid(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.dispute.seconds_per_dispute == 0 {
            return Err(GameConfigError::Invalid(
                "dispute.seconds_per_dispute must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
