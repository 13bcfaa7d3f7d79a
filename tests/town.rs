use std::sync::Arc;

use frontier_town::core::clock::{ManualClock, MILLIS_PER_HOUR, MILLIS_PER_MINUTE};
use frontier_town::simulation::lifecycle::{BuildingPhase, ConstructionProgress};
use frontier_town::systems::events::GameEvent;
use frontier_town::ui::navigation::{MenuItem, Screen};
use frontier_town::{ContentCatalog, Game, GameConfig, GameError, IntentOutcome, PlayerIntent};

const START: u64 = 1_700_000_000_000;

fn town_game() -> (Game, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START));
    let mut game = Game::new(GameConfig::default(), ContentCatalog::builtin(), clock.clone());
    game.handle(PlayerIntent::SkipOnboarding).unwrap();
    game.handle(PlayerIntent::OpenMenu(MenuItem::MyTown)).unwrap();
    (game, clock)
}

fn build(id: &str) -> PlayerIntent {
    PlayerIntent::StartConstruction {
        building_id: id.to_string(),
    }
}

fn act(id: &str) -> PlayerIntent {
    PlayerIntent::BuildingAction {
        building_id: id.to_string(),
    }
}

fn phase_of(game: &Game, id: &str) -> BuildingPhase {
    game.snapshot()
        .buildings
        .into_iter()
        .find(|b| b.id == id)
        .map(|b| b.phase)
        .unwrap()
}

#[test]
fn construction_completes_through_the_town_tick() {
    let (mut game, clock) = town_game();
    let outcome = game.handle(build("saloon")).unwrap();
    assert_eq!(
        outcome,
        IntentOutcome::ConstructionStarted {
            building_id: "saloon".into(),
            completes_at: START + 30 * MILLIS_PER_MINUTE,
        }
    );

    clock.advance(29 * MILLIS_PER_MINUTE);
    game.pump();
    assert_eq!(
        phase_of(&game, "saloon"),
        BuildingPhase::UnderConstruction(ConstructionProgress::Remaining(MILLIS_PER_MINUTE))
    );

    clock.advance(MILLIS_PER_MINUTE);
    game.pump();
    assert_eq!(phase_of(&game, "saloon"), BuildingPhase::Unlocked);
    assert!(game.state().is_story_unlocked("saloon"));
    assert!(!game.state().is_under_construction("saloon"));
    assert!(game
        .take_events()
        .contains(&GameEvent::ConstructionFinished {
            building_id: "saloon".into()
        }));
}

#[test]
fn construction_does_not_spend_resources() {
    let (mut game, _clock) = town_game();
    let sheriff = game.catalog().building("sheriff-office").unwrap().cost;
    assert!(sheriff.stone > 0 && sheriff.wood > 0);

    game.handle(build("sheriff-office")).unwrap();
    assert!(game.state().is_under_construction("sheriff-office"));
    assert_eq!(game.state().resources.stone, 32);
    assert_eq!(game.state().resources.wood, 19);
}

#[test]
fn building_actions_follow_phase() {
    let (mut game, clock) = town_game();

    match game.handle(act("doctors-hut")).unwrap() {
        IntentOutcome::BuildPrompt { can_afford, .. } => assert!(can_afford),
        other => panic!("expected build prompt, got {other:?}"),
    }

    game.handle(build("doctors-hut")).unwrap();
    clock.advance(65_000);
    assert_eq!(
        game.handle(act("doctors-hut")).unwrap_err(),
        GameError::UnderConstruction {
            building_id: "doctors-hut".into(),
            remaining: "28:55".into(),
        }
    );
    assert_eq!(
        game.handle(build("doctors-hut")).unwrap_err(),
        GameError::UnderConstruction {
            building_id: "doctors-hut".into(),
            remaining: "28:55".into(),
        }
    );
    assert_eq!(
        game.handle(build("settlers-house")).unwrap_err(),
        GameError::AlreadyBuilt("settlers-house".into())
    );
}

#[test]
fn story_cooldown_gates_the_town_action() {
    let (mut game, clock) = town_game();

    match game.handle(act("settlers-house")).unwrap() {
        IntentOutcome::StoryOpened {
            story,
            recorded_view,
        } => {
            assert_eq!(story.id, "settlers-house");
            assert!(recorded_view);
        }
        other => panic!("expected story, got {other:?}"),
    }
    assert_eq!(game.state().last_story_view("settlers-house"), Some(START));

    clock.advance(23 * MILLIS_PER_HOUR);
    assert_eq!(
        game.handle(act("settlers-house")).unwrap_err(),
        GameError::StoryOnCooldown {
            building_id: "settlers-house".into(),
            remaining: "1h 0m".into(),
        }
    );

    clock.advance(MILLIS_PER_HOUR - 60_000);
    assert_eq!(
        game.handle(act("settlers-house")).unwrap_err(),
        GameError::StoryOnCooldown {
            building_id: "settlers-house".into(),
            remaining: "1m".into(),
        }
    );

    clock.advance(60_000);
    assert!(matches!(
        game.handle(act("settlers-house")).unwrap(),
        IntentOutcome::StoryOpened { .. }
    ));
}

#[test]
fn stories_screen_reads_without_recording_a_view() {
    let clock = Arc::new(ManualClock::new(START));
    let mut game = Game::new(GameConfig::default(), ContentCatalog::builtin(), clock);
    game.handle(PlayerIntent::SkipOnboarding).unwrap();
    game.handle(PlayerIntent::OpenMenu(MenuItem::Stories)).unwrap();

    let outcome = game
        .handle(PlayerIntent::OpenStory {
            story_id: "settlers-house".into(),
        })
        .unwrap();
    assert!(matches!(
        outcome,
        IntentOutcome::StoryOpened {
            recorded_view: false,
            ..
        }
    ));
    assert_eq!(game.state().last_story_view("settlers-house"), None);

    assert_eq!(
        game.handle(PlayerIntent::OpenStory {
            story_id: "saloon".into()
        })
        .unwrap_err(),
        GameError::StoryLocked("saloon".into())
    );
    assert_eq!(
        game.handle(PlayerIntent::OpenStory {
            story_id: "gold-mine".into()
        })
        .unwrap_err(),
        GameError::UnknownStory("gold-mine".into())
    );
}

#[test]
fn leaving_town_tears_down_the_construction_timer() {
    let (mut game, clock) = town_game();
    game.handle(build("saloon")).unwrap();
    game.handle(PlayerIntent::Back).unwrap();
    assert_eq!(game.screen(), &Screen::MainMenu);
    assert!(!game.construction_timer_active());

    let revision = game.store().revision();
    clock.advance(31 * MILLIS_PER_MINUTE);
    game.pump();
    assert_eq!(game.store().revision(), revision);
    assert!(game.state().is_under_construction("saloon"));
    assert_eq!(
        phase_of(&game, "saloon"),
        BuildingPhase::UnderConstruction(ConstructionProgress::Complete)
    );

    // Re-entering arms a fresh timer; its first tick lands one period later.
    game.handle(PlayerIntent::OpenMenu(MenuItem::MyTown)).unwrap();
    assert!(game.state().is_under_construction("saloon"));
    clock.advance(1_000);
    game.pump();
    assert!(game.state().is_story_unlocked("saloon"));
}

#[test]
fn clock_moving_backwards_keeps_construction_running() {
    let (mut game, clock) = town_game();
    game.handle(build("saloon")).unwrap();

    clock.set(START - 10 * MILLIS_PER_MINUTE);
    game.pump();
    assert_eq!(
        phase_of(&game, "saloon"),
        BuildingPhase::UnderConstruction(ConstructionProgress::Remaining(30 * MILLIS_PER_MINUTE))
    );
    assert!(game.state().is_under_construction("saloon"));
}
