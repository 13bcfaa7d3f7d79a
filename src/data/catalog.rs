use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::buildings::{builtin_buildings, Building};
use crate::data::disputes::{builtin_disputes, builtin_levels, Dispute, DisputeLevel};
use crate::data::onboarding::{builtin_onboarding, OnboardingPage};
use crate::data::stories::{builtin_stories, Story};

pub const CONTENT_SCHEMA_VERSION: u32 = 1;

/// All static game content. Read-only once the game is running.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog {
    pub schema_version: u32,
    pub buildings: Vec<Building>,
    pub stories: Vec<Story>,
    pub levels: Vec<DisputeLevel>,
    #[serde(default)]
    pub disputes: Vec<Dispute>,
    #[serde(default)]
    pub onboarding: Vec<OnboardingPage>,
}

#[derive(Debug, Error)]
pub enum ContentDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Validation(String),
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ContentCatalog {
    pub fn builtin() -> Self {
        Self {
            schema_version: CONTENT_SCHEMA_VERSION,
            buildings: builtin_buildings(),
            stories: builtin_stories(),
            levels: builtin_levels(),
            disputes: builtin_disputes(),
            onboarding: builtin_onboarding(),
        }
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|building| building.id == id)
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|story| story.id == id)
    }

    pub fn level(&self, id: &str) -> Option<&DisputeLevel> {
        self.levels.iter().find(|level| level.id == id)
    }

    /// Disputes of one level in table order. Unknown levels have none.
    pub fn disputes_for_level(&self, level_id: &str) -> Vec<Dispute> {
        self.disputes
            .iter()
            .filter(|dispute| dispute.level_id == level_id)
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<(), ContentDataError> {
        if self.levels.is_empty() {
            return Err(ContentDataError::Validation(
                "catalog must define at least one dispute level".to_string(),
            ));
        }
        check_ids("building", self.buildings.iter().map(|b| b.id.as_str()))?;
        check_ids("story", self.stories.iter().map(|s| s.id.as_str()))?;
        check_ids("level", self.levels.iter().map(|l| l.id.as_str()))?;
        check_ids("dispute", self.disputes.iter().map(|d| d.id.as_str()))?;

        for building in &self.buildings {
            if building.cost.stone < 0 || building.cost.wood < 0 {
                return Err(ContentDataError::Validation(format!(
                    "building {} has a negative cost",
                    building.id
                )));
            }
        }

        for dispute in &self.disputes {
            if self.level(&dispute.level_id).is_none() {
                return Err(ContentDataError::Validation(format!(
                    "dispute {} references unknown level {}",
                    dispute.id, dispute.level_id
                )));
            }
            if dispute.text.trim().is_empty() {
                return Err(ContentDataError::Validation(format!(
                    "dispute {} missing text",
                    dispute.id
                )));
            }
            if dispute.choices.len() < 2 {
                return Err(ContentDataError::Validation(format!(
                    "dispute {} needs at least two choices",
                    dispute.id
                )));
            }
            if dispute.correct_choice >= dispute.choices.len() {
                return Err(ContentDataError::Validation(format!(
                    "dispute {} correct_choice {} out of range",
                    dispute.id, dispute.correct_choice
                )));
            }
        }
        Ok(())
    }
}

fn check_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ContentDataError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(ContentDataError::Validation(format!(
                "{} id cannot be empty",
                kind
            )));
        }
        if !seen.insert(id) {
            return Err(ContentDataError::Validation(format!(
                "duplicate {} id {}",
                kind, id
            )));
        }
    }
    Ok(())
}

pub fn load_content_catalog(path: impl AsRef<Path>) -> Result<ContentCatalog, ContentDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ContentDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: ContentCatalog =
        serde_json::from_str(&raw).map_err(|source| ContentDataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}
