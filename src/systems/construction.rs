use bevy_ecs::prelude::*;
use bevy_utils::tracing::info;

use crate::data::ContentCatalog;
use crate::simulation::lifecycle::LifecycleEvaluator;
use crate::simulation::store::GameStore;
use crate::simulation::timer::IntervalTimer;
use crate::systems::events::{GameEvent, GameEventLog, Now};

/// Present only while the town screen is open.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ConstructionTicker {
    pub timer: IntervalTimer,
}

/// System: on each timer tick, completes every building whose construction
/// time has run out.
pub fn construction_tick_system(
    now: Res<Now>,
    mut ticker: ResMut<ConstructionTicker>,
    evaluator: Res<LifecycleEvaluator>,
    catalog: Res<ContentCatalog>,
    mut store: ResMut<GameStore>,
    mut events: ResMut<GameEventLog>,
) {
    if ticker.timer.poll(now.0) == 0 {
        return;
    }
    let due = evaluator.due_for_completion(store.state(), &catalog.buildings, now.0);
    for building_id in due {
        store.complete_building(&building_id);
        info!(building = %building_id, "construction finished");
        events.push(GameEvent::ConstructionFinished { building_id });
    }
}
