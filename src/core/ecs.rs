use bevy_ecs::prelude::*;
use bevy_ecs::schedule::common_conditions::resource_exists;
use bevy_ecs::schedule::{ExecutorKind, SystemSet};

use crate::config::GameConfig;
use crate::data::ContentCatalog;
use crate::simulation::lifecycle::LifecycleEvaluator;
use crate::simulation::store::GameStore;
use crate::systems::construction::{construction_tick_system, ConstructionTicker};
use crate::systems::dispute::{dispute_countdown_system, dispute_progress_system, DisputeSession};
use crate::systems::events::{GameEventLog, Now};

/// Canonical step ordering.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Countdown,
    Progress,
    Construction,
}

/// Build the ECS world with baseline resources. Screen-owned timers are
/// inserted later by the `Game` when their screen opens.
pub fn create_world(config: GameConfig, catalog: ContentCatalog, store: GameStore) -> World {
    let mut world = World::new();
    world.insert_resource(Now(store.now()));
    world.insert_resource(LifecycleEvaluator::from_config(&config));
    world.insert_resource(config);
    world.insert_resource(catalog);
    world.insert_resource(store);
    world.insert_resource(GameEventLog::default());
    world
}

/// Build the system schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);

    schedule.configure_sets(
        (TickSet::Countdown, TickSet::Progress, TickSet::Construction).chain(),
    );

    schedule.add_systems((
        dispute_countdown_system
            .in_set(TickSet::Countdown)
            .run_if(resource_exists::<DisputeSession>),
        dispute_progress_system
            .in_set(TickSet::Progress)
            .run_if(resource_exists::<DisputeSession>),
        construction_tick_system
            .in_set(TickSet::Construction)
            .run_if(resource_exists::<ConstructionTicker>),
    ));

    schedule
}
