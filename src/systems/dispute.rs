use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info};

use crate::config::GameConfig;
use crate::simulation::dispute::{DisputeRound, RoundStep};
use crate::simulation::store::GameStore;
use crate::simulation::timer::IntervalTimer;
use crate::systems::events::{GameEvent, GameEventLog, Now};

/// Present only while the dispute screen is open.
#[derive(Resource, Debug, Clone)]
pub struct DisputeSession {
    pub round: DisputeRound,
    pub countdown: IntervalTimer,
}

/// System: per-second countdown for the current dispute.
pub fn dispute_countdown_system(
    now: Res<Now>,
    mut session: ResMut<DisputeSession>,
    mut events: ResMut<GameEventLog>,
) {
    let session = &mut *session;
    let ticks = session.countdown.poll(now.0);
    if session.round.tick_countdown(ticks) {
        debug!(
            level_id = session.round.level_id(),
            index = session.round.index(),
            "countdown expired"
        );
        events.push(GameEvent::CountdownExpired {
            level_id: session.round.level_id().to_string(),
            index: session.round.index(),
        });
    }
}

/// System: moves to the next dispute once the post-choice delay has passed,
/// or settles the level after the last one.
pub fn dispute_progress_system(
    now: Res<Now>,
    config: Res<GameConfig>,
    mut session: ResMut<DisputeSession>,
    mut store: ResMut<GameStore>,
    mut events: ResMut<GameEventLog>,
) {
    let session = &mut *session;
    match session.round.poll_advance(now.0) {
        Some(RoundStep::Advanced { index }) => {
            session.countdown.restart(now.0);
            events.push(GameEvent::DisputeAdvanced {
                level_id: session.round.level_id().to_string(),
                index,
            });
        }
        Some(RoundStep::Finished) => {
            let level_id = session.round.level_id().to_string();
            let reward = config.dispute.reward;
            store.complete_level(&level_id);
            store.add_resources(reward.stone, reward.wood);
            info!(level_id = %level_id, stone = reward.stone, wood = reward.wood, "level completed");
            events.push(GameEvent::LevelCompleted { level_id, reward });
        }
        None => {}
    }
}
