pub mod config;
pub mod core;
pub mod data;
pub mod simulation;
pub mod systems;
pub mod ui;
pub mod world;

// Entry points for the binary and integration tests
pub use crate::config::{GameConfig, GameConfigError};
pub use crate::core::clock::{Clock, ManualClock, Millis, SystemClock};
pub use crate::core::serialization::SaveState;
pub use crate::core::world::{Game, GameError, IntentOutcome, PlayerIntent, Snapshot};
pub use crate::data::ContentCatalog;
