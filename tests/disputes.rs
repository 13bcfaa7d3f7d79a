use std::sync::Arc;

use frontier_town::core::clock::ManualClock;
use frontier_town::simulation::dispute::DisputeError;
use frontier_town::simulation::state::Resources;
use frontier_town::systems::events::GameEvent;
use frontier_town::ui::navigation::{MenuItem, Screen};
use frontier_town::{ContentCatalog, Game, GameConfig, GameError, IntentOutcome, PlayerIntent};

const START: u64 = 1_700_000_000_000;
const RANCH: &str = "ranch-disputes";

fn talks_game(catalog: ContentCatalog) -> (Game, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START));
    let mut game = Game::new(GameConfig::default(), catalog, clock.clone());
    game.handle(PlayerIntent::SkipOnboarding).unwrap();
    game.handle(PlayerIntent::OpenMenu(MenuItem::FrontierTalks))
        .unwrap();
    (game, clock)
}

fn enter(game: &mut Game, level_id: &str) -> Result<IntentOutcome, GameError> {
    game.handle(PlayerIntent::EnterLevel {
        level_id: level_id.to_string(),
    })
}

fn play_level(game: &mut Game, clock: &ManualClock, choices: &[usize]) {
    for &choice in choices {
        clock.advance(5_000);
        game.handle(PlayerIntent::ChooseAnswer { choice }).unwrap();
        clock.advance(2_000);
        game.pump();
    }
}

#[test]
fn finishing_a_level_pays_the_fixed_reward_whatever_the_answers() {
    for answers in [[0, 0, 0], [1, 1, 1], [0, 1, 0]] {
        let (mut game, clock) = talks_game(ContentCatalog::builtin());
        enter(&mut game, RANCH).unwrap();
        assert_eq!(game.state().current_level.as_deref(), Some(RANCH));

        play_level(&mut game, &clock, &answers);

        assert_eq!(
            game.screen(),
            &Screen::LevelComplete {
                level_id: RANCH.into()
            }
        );
        assert_eq!(game.state().resources, Resources::new(36, 25));
        assert_eq!(game.state().completed_levels, vec![RANCH.to_string()]);
        assert!(game.dispute_round().is_none());

        let completions = game
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
    }
}

#[test]
fn choice_is_frozen_until_the_round_advances() {
    let (mut game, clock) = talks_game(ContentCatalog::builtin());
    enter(&mut game, RANCH).unwrap();

    game.handle(PlayerIntent::ChooseAnswer { choice: 1 }).unwrap();
    assert_eq!(
        game.handle(PlayerIntent::ChooseAnswer { choice: 0 })
            .unwrap_err(),
        GameError::Dispute(DisputeError::InputFrozen)
    );
    assert_eq!(game.dispute_round().map(|r| r.index()), Some(0));

    clock.advance(1_500);
    game.pump();
    let round = game.dispute_round().unwrap();
    assert_eq!(round.index(), 1);
    assert_eq!(round.selected(), None);
    assert_eq!(round.seconds_left(), 60);
}

#[test]
fn countdown_runs_down_once_per_second_and_stops_at_zero() {
    let (mut game, clock) = talks_game(ContentCatalog::builtin());
    enter(&mut game, RANCH).unwrap();

    clock.advance(10_000);
    game.pump();
    assert_eq!(game.dispute_round().map(|r| r.seconds_left()), Some(50));

    clock.advance(120_000);
    game.pump();
    assert_eq!(game.dispute_round().map(|r| r.seconds_left()), Some(0));
    let expired = game
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::CountdownExpired { .. }))
        .count();
    assert_eq!(expired, 1);

    // An expired countdown does not end the dispute; answering still works.
    game.handle(PlayerIntent::ChooseAnswer { choice: 0 })
        .unwrap();
}

#[test]
fn clock_jump_of_days_settles_the_round_once() {
    let (mut game, clock) = talks_game(ContentCatalog::builtin());
    enter(&mut game, RANCH).unwrap();
    game.handle(PlayerIntent::ChooseAnswer { choice: 1 }).unwrap();
    game.take_events();

    clock.advance(3 * 24 * 60 * 60 * 1_000);
    game.pump();

    let round = game.dispute_round().unwrap();
    assert_eq!(round.index(), 1);
    assert_eq!(round.selected(), None);
    assert_eq!(round.advance_due(), None);
    assert_eq!(round.seconds_left(), 0);

    let events = game.take_events();
    let advanced = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DisputeAdvanced { .. }))
        .count();
    let expired = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CountdownExpired { .. }))
        .count();
    assert_eq!(advanced, 1);
    assert_eq!(expired, 1);
    assert!(game.state().completed_levels.is_empty());

    // Nothing is left to step through, so a second jump changes nothing.
    let revision = game.store().revision();
    clock.advance(24 * 60 * 60 * 1_000);
    game.pump();
    assert!(game.take_events().is_empty());
    assert_eq!(game.store().revision(), revision);
    assert_eq!(game.dispute_round().map(|r| r.index()), Some(1));
}

#[test]
fn leaving_mid_level_discards_the_round_without_reward() {
    let (mut game, clock) = talks_game(ContentCatalog::builtin());
    enter(&mut game, RANCH).unwrap();
    game.handle(PlayerIntent::ChooseAnswer { choice: 0 }).unwrap();
    game.handle(PlayerIntent::Back).unwrap();
    assert_eq!(game.screen(), &Screen::TownDisputes);
    assert!(game.dispute_round().is_none());

    let revision = game.store().revision();
    clock.advance(10 * 60_000);
    game.pump();
    assert_eq!(game.store().revision(), revision);
    assert!(game.state().completed_levels.is_empty());

    enter(&mut game, RANCH).unwrap();
    let round = game.dispute_round().unwrap();
    assert_eq!(round.index(), 0);
    assert_eq!(round.selected(), None);
}

#[test]
fn later_levels_unlock_in_order() {
    let (mut game, clock) = talks_game(ContentCatalog::builtin());
    assert_eq!(
        enter(&mut game, "town-affairs").unwrap_err(),
        GameError::LevelLocked("town-affairs".into())
    );
    assert_eq!(
        enter(&mut game, "no-such-level").unwrap_err(),
        GameError::UnknownLevel("no-such-level".into())
    );

    enter(&mut game, RANCH).unwrap();
    play_level(&mut game, &clock, &[0, 0, 0]);
    game.handle(PlayerIntent::ReturnToDisputes).unwrap();
    assert_eq!(game.screen(), &Screen::TownDisputes);

    let levels = game.snapshot().levels;
    assert!(levels[0].completed);
    assert!(levels[1].unlocked);
    assert!(!levels[2].unlocked);

    // Unlocked, but the built-in tables ship no disputes for it.
    assert_eq!(
        enter(&mut game, "town-affairs").unwrap_err(),
        GameError::EmptyLevel("town-affairs".into())
    );
}

#[test]
fn custom_content_makes_later_levels_playable() {
    let mut catalog = ContentCatalog::builtin();
    let extra: Vec<_> = catalog
        .disputes_for_level(RANCH)
        .into_iter()
        .map(|mut dispute| {
            dispute.id = format!("affairs-{}", dispute.id);
            dispute.level_id = "town-affairs".into();
            dispute
        })
        .collect();
    catalog.disputes.extend(extra);
    catalog.validate().unwrap();

    let (mut game, clock) = talks_game(catalog);
    enter(&mut game, RANCH).unwrap();
    play_level(&mut game, &clock, &[0, 0, 0]);
    game.handle(PlayerIntent::ReturnToDisputes).unwrap();

    enter(&mut game, "town-affairs").unwrap();
    play_level(&mut game, &clock, &[1, 1, 1]);
    assert_eq!(game.state().resources, Resources::new(40, 31));
    assert_eq!(
        game.state().completed_levels,
        vec![RANCH.to_string(), "town-affairs".to_string()]
    );
}

#[test]
fn level_complete_navigation() {
    let (mut game, clock) = talks_game(ContentCatalog::builtin());
    enter(&mut game, RANCH).unwrap();
    play_level(&mut game, &clock, &[0, 1, 0]);

    game.handle(PlayerIntent::ReturnToMenu).unwrap();
    assert_eq!(game.screen(), &Screen::MainMenu);
    assert_eq!(
        game.handle(PlayerIntent::ReturnToMenu).unwrap_err(),
        GameError::WrongScreen {
            intent: "return to menu",
            screen: "MainMenu",
        }
    );
}
