pub mod dispute;
pub mod levels;
pub mod lifecycle;
pub mod state;
pub mod store;
pub mod timer;

pub use dispute::{DisputeError, DisputeRound, RoundStep};
pub use levels::{is_level_unlocked, level_statuses, LevelStatus};
pub use lifecycle::{
    format_construction_remaining, format_cooldown_remaining, BuildingPhase, ConstructionProgress,
    LifecycleEvaluator, StoryGate,
};
pub use state::{GameState, Resources, Transition};
pub use store::GameStore;
pub use timer::IntervalTimer;
