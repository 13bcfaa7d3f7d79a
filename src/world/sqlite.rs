use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::config::GameConfig;
use crate::core::clock::Millis;
use crate::simulation::state::{GameState, Resources};

const TOWN_SCHEMA_VERSION: i64 = 1;

const TOWN_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS town_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS resources (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  stone INTEGER NOT NULL,
  wood INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS unlocked_stories (
  sequence INTEGER PRIMARY KEY,
  story_id TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS completed_levels (
  sequence INTEGER PRIMARY KEY,
  level_id TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS current_level (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  level_id TEXT
);

CREATE TABLE IF NOT EXISTS story_views (
  building_id TEXT PRIMARY KEY,
  viewed_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS construction_starts (
  building_id TEXT PRIMARY KEY,
  started_at INTEGER NOT NULL
);
"#;

#[derive(Debug, Error)]
pub enum TownDbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    InvalidData(String),
}

/// SQLite-backed store for town progress. One row set per save.
pub struct TownDb {
    conn: Connection,
}

impl TownDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TownDbError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, TownDbError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, TownDbError> {
        let mut db = Self { conn };
        db.conn.execute_batch(TOWN_DB_SCHEMA)?;
        db.ensure_town_meta()?;
        Ok(db)
    }

    /// Load saved progress, or write and return a fresh state built from
    /// `config` when the database is empty.
    pub fn load_or_init(&mut self, config: &GameConfig) -> Result<GameState, TownDbError> {
        if let Some(state) = self.load_state()? {
            Ok(state)
        } else {
            let state = GameState::initial(config);
            self.save_state(&state)?;
            Ok(state)
        }
    }

    pub fn load_state(&self) -> Result<Option<GameState>, TownDbError> {
        let resources = self
            .conn
            .query_row("SELECT stone, wood FROM resources WHERE id = 1", [], |row| {
                Ok(Resources::new(row.get(0)?, row.get(1)?))
            })
            .optional()?;
        let Some(resources) = resources else {
            return Ok(None);
        };

        let current_level = self
            .conn
            .query_row("SELECT level_id FROM current_level WHERE id = 1", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten();

        Ok(Some(GameState {
            resources,
            unlocked_stories: self.load_ordered_ids("unlocked_stories", "story_id")?,
            completed_levels: self.load_ordered_ids("completed_levels", "level_id")?,
            current_level,
            story_view_times: self.load_timestamps("story_views", "viewed_at")?,
            building_start_times: self.load_timestamps("construction_starts", "started_at")?,
        }))
    }

    pub fn save_state(&mut self, state: &GameState) -> Result<(), TownDbError> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM resources", [])?;
        tx.execute(
            "INSERT INTO resources (id, stone, wood) VALUES (1, ?1, ?2)",
            params![state.resources.stone, state.resources.wood],
        )?;

        tx.execute("DELETE FROM unlocked_stories", [])?;
        for (sequence, story_id) in state.unlocked_stories.iter().enumerate() {
            tx.execute(
                "INSERT INTO unlocked_stories (story_id, sequence) VALUES (?1, ?2)",
                params![story_id, sequence as i64],
            )?;
        }

        tx.execute("DELETE FROM completed_levels", [])?;
        for (sequence, level_id) in state.completed_levels.iter().enumerate() {
            tx.execute(
                "INSERT INTO completed_levels (level_id, sequence) VALUES (?1, ?2)",
                params![level_id, sequence as i64],
            )?;
        }

        tx.execute("DELETE FROM current_level", [])?;
        tx.execute(
            "INSERT INTO current_level (id, level_id) VALUES (1, ?1)",
            params![state.current_level],
        )?;

        tx.execute("DELETE FROM story_views", [])?;
        for (building_id, viewed_at) in &state.story_view_times {
            tx.execute(
                "INSERT INTO story_views (building_id, viewed_at) VALUES (?1, ?2)",
                params![building_id, to_sql_millis(*viewed_at)?],
            )?;
        }

        tx.execute("DELETE FROM construction_starts", [])?;
        for (building_id, started_at) in &state.building_start_times {
            tx.execute(
                "INSERT INTO construction_starts (building_id, started_at) VALUES (?1, ?2)",
                params![building_id, to_sql_millis(*started_at)?],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn ensure_town_meta(&mut self) -> Result<(), TownDbError> {
        let version = self
            .conn
            .query_row(
                "SELECT schema_version FROM town_meta WHERE id = 1",
                [],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        match version {
            Some(TOWN_SCHEMA_VERSION) => Ok(()),
            Some(other) => Err(TownDbError::InvalidData(format!(
                "town_meta version mismatch (schema {}, expected {})",
                other, TOWN_SCHEMA_VERSION
            ))),
            None => {
                self.conn.execute(
                    "INSERT INTO town_meta (id, schema_version) VALUES (1, ?1)",
                    params![TOWN_SCHEMA_VERSION],
                )?;
                Ok(())
            }
        }
    }

    fn load_ordered_ids(&self, table: &str, column: &str) -> Result<Vec<String>, TownDbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {column} FROM {table} ORDER BY sequence"))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    fn load_timestamps(
        &self,
        table: &str,
        column: &str,
    ) -> Result<HashMap<String, Millis>, TownDbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT building_id, {column} FROM {table}"))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut map = HashMap::new();
        for row in rows {
            let (building_id, at) = row?;
            let at = Millis::try_from(at).map_err(|_| {
                TownDbError::InvalidData(format!("negative timestamp {} in {}", at, table))
            })?;
            map.insert(building_id, at);
        }
        Ok(map)
    }
}

fn to_sql_millis(value: Millis) -> Result<i64, TownDbError> {
    i64::try_from(value)
        .map_err(|_| TownDbError::InvalidData(format!("timestamp {} out of range", value)))
}

impl crate::world::repository::TownRepository for TownDb {
    fn load_or_init(
        &mut self,
        config: &GameConfig,
    ) -> Result<GameState, Box<dyn std::error::Error>> {
        Ok(TownDb::load_or_init(self, config)?)
    }

    fn save_state(&mut self, state: &GameState) -> Result<(), Box<dyn std::error::Error>> {
        Ok(TownDb::save_state(self, state)?)
    }
}
