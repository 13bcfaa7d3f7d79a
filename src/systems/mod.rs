pub mod construction;
pub mod dispute;
pub mod events;

pub use construction::{construction_tick_system, ConstructionTicker};
pub use dispute::{dispute_countdown_system, dispute_progress_system, DisputeSession};
pub use events::{GameEvent, GameEventLog, Now};
